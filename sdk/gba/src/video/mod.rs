//! # Video
//!
//! [`Video`] is the state the video hardware needs on the CPU side: the OAM
//! shadow and the mode 4 draw target. Palette and tile memory have no
//! CPU-side state, so their handles are plain constants.
//!
//! The memory behind it:
//!
//! | Memory        | Written through                  | Visible           |
//! |---------------|----------------------------------|-------------------|
//! | Palette RAM   | [`PaletteTable`]                 | immediately       |
//! | VRAM (tiles)  | [`TileMemory`]                   | immediately       |
//! | VRAM (bitmap) | [`Mode3`] / [`Mode4`]            | immediately / flip|
//! | OAM           | [`ObjAttrs`] shadow              | on `update_oam`   |
//!
//! ```ignore
//! let mut console = Console::new(unsafe { Mmio::new() });
//! console.video.set_mode(&mut console.bus, MODE_4 | DisplayControl::BG2_ENABLE.bits());
//! PaletteTable::BG.set(&mut console.bus, 1, Color::rgb8(255, 128, 0));
//! console.video.mode4.set_pixel(&mut console.bus, 10, 10, 1);
//! console.video.mode4.flip(&mut console.bus);
//! ```

pub mod attr;
pub mod framebuffers;
pub mod gfx;
pub mod oam;
pub mod palette;

use log::debug;

use crate::{
    mmio::Bus,
    scr::{DisplayControl, REG_DISPCNT},
};

pub use framebuffers::{Mode3, Mode4};
pub use gfx::TileMemory;
pub use oam::{ObjAttr, ObjAttrs, OamState};
pub use palette::PaletteTable;

#[derive(Debug, Clone)]
pub struct Video {
    pub bg_palette: PaletteTable,
    pub obj_palette: PaletteTable,
    pub bg_gfx: TileMemory,
    pub obj_gfx: TileMemory,
    pub mode3: Mode3,
    pub mode4: Mode4,
    pub obj: ObjAttrs,
}

impl Video {
    /// Fresh state: every sprite disabled in the shadow, mode 4 drawing into
    /// whichever page `DISPCNT` is not showing.
    pub fn install<B: Bus>(bus: &mut B) -> Self {
        let mut video = Self {
            bg_palette: PaletteTable::BG,
            obj_palette: PaletteTable::OBJ,
            bg_gfx: TileMemory::BG,
            obj_gfx: TileMemory::OBJ,
            mode3: Mode3,
            mode4: Mode4::for_display(DisplayControl::empty()),
            obj: ObjAttrs::new(),
        };
        video.mode4.sync(bus);
        debug!("video installed, mode4 target {:#010x}", video.mode4.draw_target());
        video
    }

    /// Write `value` (mode | enable flags) to `DISPCNT` as-is.
    pub fn set_mode<B: Bus>(&mut self, bus: &mut B, value: u16) {
        bus.write16(REG_DISPCNT, value);
        self.mode4 = Mode4::for_display(DisplayControl::from_bits_retain(value));
    }

    pub fn display_control<B: Bus>(&self, bus: &mut B) -> DisplayControl {
        DisplayControl::from_bits_retain(bus.read16(REG_DISPCNT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scr::MODE_4, sim::SimBus, video::framebuffers::{MODE4_PAGE0, MODE4_PAGE1}};

    #[test]
    fn install_follows_dispcnt() {
        let mut bus = SimBus::new();
        bus.write16(REG_DISPCNT, MODE_4 | DisplayControl::BACKBUFFER.bits());
        let video = Video::install(&mut bus);
        assert_eq!(video.mode4.draw_target(), MODE4_PAGE0);
        assert_eq!(video.obj.state(), OamState::Committed);
    }

    #[test]
    fn set_mode_writes_verbatim_and_resyncs() {
        let mut bus = SimBus::new();
        let mut video = Video::install(&mut bus);
        assert_eq!(video.mode4.draw_target(), MODE4_PAGE1);

        let value = MODE_4 | (DisplayControl::BG2_ENABLE | DisplayControl::BACKBUFFER).bits();
        video.set_mode(&mut bus, value);
        assert_eq!(bus.read16(REG_DISPCNT), value);
        assert_eq!(video.display_control(&mut bus).mode(), MODE_4);
        assert_eq!(video.mode4.draw_target(), MODE4_PAGE0);
    }
}
