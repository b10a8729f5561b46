//! `Video` and its nested namespaces: `Palette`, `Gfx`, `Mode3`, `Mode4`, `OBJ`.

use log::debug;

use gba::{
    color::Color,
    console::Console,
    mmio::Bus,
    scr::{self, DisplayControl},
    video::attr,
};

use crate::{args::Args, error::CallError, host::Host, value::Value};

pub const VIDEO: &str = "Video";
pub const PALETTE: &str = "Video::Palette";
pub const GFX: &str = "Video::Gfx";
pub const MODE3: &str = "Video::Mode3";
pub const MODE4: &str = "Video::Mode4";
pub const OBJ: &str = "Video::OBJ";

type Ret = Result<Value, CallError>;

const VIDEO_CONSTANTS: &[(&str, i64)] = &[
    ("SCREEN_WIDTH", scr::SCREEN_WIDTH as i64),
    ("SCREEN_HEIGHT", scr::SCREEN_HEIGHT as i64),
    ("REG_MOSAIC", scr::REG_MOSAIC as i64),
    ("MODE_0", scr::MODE_0 as i64),
    ("MODE_1", scr::MODE_1 as i64),
    ("MODE_2", scr::MODE_2 as i64),
    ("MODE_3", scr::MODE_3 as i64),
    ("MODE_4", scr::MODE_4 as i64),
    ("MODE_5", scr::MODE_5 as i64),
    ("OBJ_1D_MAP", DisplayControl::OBJ_1D_MAP.bits() as i64),
    ("BG0_ENABLE", DisplayControl::BG0_ENABLE.bits() as i64),
    ("BG1_ENABLE", DisplayControl::BG1_ENABLE.bits() as i64),
    ("BG2_ENABLE", DisplayControl::BG2_ENABLE.bits() as i64),
    ("BG3_ENABLE", DisplayControl::BG3_ENABLE.bits() as i64),
    ("OBJ_ENABLE", DisplayControl::OBJ_ENABLE.bits() as i64),
    ("WIN0_ENABLE", DisplayControl::WIN0_ENABLE.bits() as i64),
    ("WIN1_ENABLE", DisplayControl::WIN1_ENABLE.bits() as i64),
    ("OBJ_WIN_ENABLE", DisplayControl::OBJ_WIN_ENABLE.bits() as i64),
    ("BG_ALL_ENABLE", DisplayControl::BG_ALL_ENABLE.bits() as i64),
];

const OBJ_CONSTANTS: &[(&str, u16)] = &[
    ("ATTR0_MOSAIC", attr::ATTR0_MOSAIC),
    ("ATTR0_COLOR_256", attr::ATTR0_COLOR_256),
    ("ATTR0_COLOR_16", attr::ATTR0_COLOR_16),
    ("ATTR0_TYPE_NORMAL", attr::ATTR0_TYPE_NORMAL),
    ("ATTR0_TYPE_BLENDED", attr::ATTR0_TYPE_BLENDED),
    ("ATTR0_TYPE_WINDOWED", attr::ATTR0_TYPE_WINDOWED),
    ("ATTR0_NORMAL", attr::ATTR0_NORMAL),
    ("ATTR0_ROTSCALE", attr::ATTR0_ROTSCALE),
    ("ATTR0_DISABLED", attr::ATTR0_DISABLED),
    ("ATTR0_ROTSCALE_DOUBLE", attr::ATTR0_ROTSCALE_DOUBLE),
    ("ATTR0_SQUARE", attr::ATTR0_SQUARE),
    ("ATTR0_WIDE", attr::ATTR0_WIDE),
    ("ATTR0_TALL", attr::ATTR0_TALL),
    ("ATTR1_FLIP_X", attr::ATTR1_FLIP_X),
    ("ATTR1_FLIP_Y", attr::ATTR1_FLIP_Y),
    ("ATTR1_SIZE_8", attr::ATTR1_SIZE_8),
    ("ATTR1_SIZE_16", attr::ATTR1_SIZE_16),
    ("ATTR1_SIZE_32", attr::ATTR1_SIZE_32),
    ("ATTR1_SIZE_64", attr::ATTR1_SIZE_64),
];

/// Register the video namespaces and reset the video state: every sprite
/// disabled in the shadow, mode 4 drawing to the hidden page.
pub fn install<B: Bus, H: Host<B>>(host: &mut H, console: &mut Console<B>) {
    for module in [VIDEO, PALETTE, GFX, MODE3, MODE4, OBJ] {
        host.define_module(module);
    }

    for &(name, value) in VIDEO_CONSTANTS {
        host.define_const(VIDEO, name, value);
    }
    host.define_method(VIDEO, "rgb5", 3, rgb5);
    host.define_method(VIDEO, "rgb8", 3, rgb8);
    host.define_method(VIDEO, "write_reg", 2, write_reg);
    host.define_method(VIDEO, "set_mode", 1, set_mode);

    host.define_method(PALETTE, "bg_set", 2, bg_set);
    host.define_method(PALETTE, "obj_set", 2, obj_set);

    host.define_method(GFX, "bg_write", 3, bg_write);
    host.define_method(GFX, "obj_write", 3, obj_write);

    host.define_method(MODE3, "set_pixel", 3, mode3_set_pixel);

    host.define_method(MODE4, "flip", 0, flip);
    host.define_method(MODE4, "set_pixel", 3, mode4_set_pixel);

    for &(name, value) in OBJ_CONSTANTS {
        host.define_const(OBJ, name, value as i64);
    }
    host.define_method(OBJ, "update_oam", 0, update_oam);
    host.define_method(OBJ, "set_attr", 3, set_attr);
    host.define_method(OBJ, "attr0_objy", 1, attr0_objy);
    host.define_method(OBJ, "attr1_objx", 1, attr1_objx);
    host.define_method(OBJ, "attr1_rot", 1, attr1_rot);
    host.define_method(OBJ, "attr2_priority", 1, attr2_priority);
    host.define_method(OBJ, "attr2_palette", 1, attr2_palette);
    host.define_method(OBJ, "pack_objy", 1, pack_objy);
    host.define_method(OBJ, "pack_objx", 1, pack_objx);
    host.define_method(OBJ, "pack_rot", 1, pack_rot);
    host.define_method(OBJ, "pack_tile", 1, pack_tile);
    host.define_method(OBJ, "pack_priority", 1, pack_priority);
    host.define_method(OBJ, "pack_palette", 1, pack_palette);

    console.reinstall_video();
    debug!("video bindings installed");
}

// Video

fn rgb5<B: Bus>(_: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("rgb5", args, 3)?;
    Ok(Color::rgb5(a.int(0)? as u32, a.int(1)? as u32, a.int(2)? as u32).into())
}

fn rgb8<B: Bus>(_: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("rgb8", args, 3)?;
    Ok(Color::rgb8(a.int(0)? as u32, a.int(1)? as u32, a.int(2)? as u32).into())
}

/// Byte store at any address. Nothing is validated.
fn write_reg<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("write_reg", args, 2)?;
    console.bus.write8(a.usize(0)?, a.u8(1)?);
    Ok(Value::Nil)
}

fn set_mode<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("set_mode", args, 1)?;
    let value = a.u16(0)?;
    console.video.set_mode(&mut console.bus, value);
    Ok(Value::Nil)
}

// Video::Palette

fn bg_set<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("bg_set", args, 2)?;
    let (index, color) = (a.usize(0)?, a.u16(1)?);
    console.video.bg_palette.set(&mut console.bus, index, color);
    Ok(Value::Nil)
}

fn obj_set<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("obj_set", args, 2)?;
    let (index, color) = (a.usize(0)?, a.u16(1)?);
    console.video.obj_palette.set(&mut console.bus, index, color);
    Ok(Value::Nil)
}

// Video::Gfx

fn bg_write<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("bg_write", args, 3)?;
    let (block, offset, bytes) = (a.usize(0)?, a.usize(1)?, a.bytes(2)?);
    console.video.bg_gfx.write(&mut console.bus, block, offset, bytes);
    Ok(Value::Nil)
}

fn obj_write<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("obj_write", args, 3)?;
    let (block, offset, bytes) = (a.usize(0)?, a.usize(1)?, a.bytes(2)?);
    console.video.obj_gfx.write(&mut console.bus, block, offset, bytes);
    Ok(Value::Nil)
}

// Video::Mode3 / Video::Mode4

fn mode3_set_pixel<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("set_pixel", args, 3)?;
    let (x, y, color) = (a.usize(0)?, a.usize(1)?, a.u16(2)?);
    console.video.mode3.set_pixel(&mut console.bus, x, y, color);
    Ok(Value::Nil)
}

fn flip<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    Args::new("flip", args, 0)?;
    console.video.mode4.flip(&mut console.bus);
    Ok(Value::Nil)
}

fn mode4_set_pixel<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("set_pixel", args, 3)?;
    let (x, y, index) = (a.usize(0)?, a.usize(1)?, a.u8(2)?);
    console.video.mode4.set_pixel(&mut console.bus, x, y, index);
    Ok(Value::Nil)
}

// Video::OBJ

fn update_oam<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    Args::new("update_oam", args, 0)?;
    console.video.obj.update_oam(&mut console.bus);
    Ok(Value::Nil)
}

fn set_attr<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
    let a = Args::new("set_attr", args, 3)?;
    console.video.obj.set_attr(a.usize(0)?, a.usize(1)?, a.u16(2)?);
    Ok(Value::Nil)
}

macro_rules! attr_reader {
    ($($name:ident),* $(,)?) => {
        $(
            fn $name<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Ret {
                let a = Args::new(stringify!($name), args, 1)?;
                Ok(Value::from(console.video.obj.$name(&mut console.bus, a.usize(0)?)))
            }
        )*
    };
}

attr_reader!(attr0_objy, attr1_objx, attr1_rot, attr2_priority, attr2_palette);

macro_rules! packer {
    ($($name:ident => $pack:path),* $(,)?) => {
        $(
            fn $name<B: Bus>(_: &mut Console<B>, args: &[Value]) -> Ret {
                let a = Args::new(stringify!($name), args, 1)?;
                Ok(Value::from($pack(a.u16(0)?)))
            }
        )*
    };
}

packer! {
    pack_objy => attr::pack_obj_y,
    pack_objx => attr::pack_obj_x,
    pack_rot => attr::pack_rot_data,
    pack_tile => attr::pack_tile,
    pack_priority => attr::pack_priority,
    pack_palette => attr::pack_palette,
}
