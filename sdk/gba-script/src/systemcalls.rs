//! `Systemcalls`: BIOS services.

use log::debug;

use gba::{
    bios::{self, ResetFlags},
    console::Console,
    mmio::Bus,
};

use crate::{args::Args, error::CallError, host::Host, value::Value};

pub const SYSTEMCALLS: &str = "Systemcalls";

const RESETS: &[(&str, ResetFlags)] = &[
    ("RESET_EWRAM", ResetFlags::EWRAM),
    ("RESET_IWRAM", ResetFlags::IWRAM),
    ("RESET_PALETTE", ResetFlags::PALETTE),
    ("RESET_VRAM", ResetFlags::VRAM),
    ("RESET_OAM", ResetFlags::OAM),
    ("RESET_SIO", ResetFlags::SIO),
    ("RESET_SOUND", ResetFlags::SOUND),
    ("RESET_OTHER", ResetFlags::OTHER),
];

pub fn install<B: Bus, H: Host<B>>(host: &mut H) {
    host.define_module(SYSTEMCALLS);
    host.define_const(SYSTEMCALLS, "ROM_RESTART", bios::ROM_RESTART as i64);
    host.define_const(SYSTEMCALLS, "RAM_RESTART", bios::RAM_RESTART as i64);
    for &(name, flag) in RESETS {
        host.define_const(SYSTEMCALLS, name, flag.bits() as i64);
    }
    host.define_method(SYSTEMCALLS, "soft_reset", 1, soft_reset);
    host.define_method(SYSTEMCALLS, "register_ram_reset", 1, register_ram_reset);
    host.define_method(SYSTEMCALLS, "halt", 0, halt);
    host.define_method(SYSTEMCALLS, "stop", 0, stop);
    host.define_method(SYSTEMCALLS, "bios_checksum", 0, bios_checksum);
    host.define_method(SYSTEMCALLS, "vblank_intr_wait", 0, vblank_intr_wait);
    debug!("systemcall bindings installed");
}

fn soft_reset<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    let a = Args::new("soft_reset", args, 1)?;
    bios::soft_reset(&mut console.bus, a.u8(0)?);
    Ok(Value::Nil)
}

fn register_ram_reset<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    let a = Args::new("register_ram_reset", args, 1)?;
    bios::register_ram_reset(&mut console.bus, ResetFlags::from_bits_retain(a.u8(0)?));
    Ok(Value::Nil)
}

fn halt<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("halt", args, 0)?;
    bios::halt(&mut console.bus);
    Ok(Value::Nil)
}

fn stop<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("stop", args, 0)?;
    bios::stop(&mut console.bus);
    Ok(Value::Nil)
}

fn bios_checksum<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("bios_checksum", args, 0)?;
    Ok(bios::bios_checksum(&mut console.bus).into())
}

fn vblank_intr_wait<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("vblank_intr_wait", args, 0)?;
    bios::vblank_intr_wait(&mut console.bus);
    Ok(Value::Nil)
}
