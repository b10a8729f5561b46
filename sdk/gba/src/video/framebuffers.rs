//! # Bitmap Modes
//!
//! ## Mode 3
//!
//! One 240×160 framebuffer of 15-bit colors at `$06000000`. Whatever you
//! write is on screen; there is no second page.
//!
//! ## Mode 4
//!
//! Two 240×160 pages of 8-bit palette indices, at `$06000000` and
//! `$0600A000`. `DISPCNT` bit 4 picks the displayed page; [`Mode4`] always
//! draws into the other one:
//!
//! ```ignore
//! loop {
//!     draw_scene(&mut console);                  // hidden page
//!     bios::vblank_intr_wait(&mut console.bus);
//!     console.video.mode4.flip(&mut console.bus); // show it
//! }
//! ```
//!
//! VRAM only takes 16-bit stores, so a pixel write reads the halfword holding
//! it and its neighbour, replaces one byte, and writes the pair back.

use log::debug;

use crate::{
    mmio::{Bus, Region},
    scr::{DisplayControl, REG_DISPCNT, SCREEN_HEIGHT, SCREEN_WIDTH},
};

pub const MODE3_FB: Region = Region::new("mode3 fb", 0x0600_0000, 2, SCREEN_WIDTH * SCREEN_HEIGHT);

pub const MODE4_PAGE0: usize = 0x0600_0000;
pub const MODE4_PAGE1: usize = 0x0600_A000;
/// Halfword cells per mode 4 row.
pub const MODE4_CELLS_PER_ROW: usize = SCREEN_WIDTH / 2;

#[derive(Debug, Default, Copy, Clone)]
pub struct Mode3;

impl Mode3 {
    /// Unchecked: `x < 240`, `y < 160`.
    #[inline(always)]
    pub fn set_pixel<B: Bus>(&self, bus: &mut B, x: usize, y: usize, color: u16) {
        bus.write16(MODE3_FB.addr(y.wrapping_mul(SCREEN_WIDTH).wrapping_add(x)), color);
    }
}

/// Mode 4 draw state: the base address of the hidden page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mode4 {
    target: usize,
}

impl Mode4 {
    /// Draw target for a given `DISPCNT`: the page it is not displaying.
    pub const fn for_display(dispcnt: DisplayControl) -> Self {
        let target = if dispcnt.contains(DisplayControl::BACKBUFFER) {
            MODE4_PAGE0
        } else {
            MODE4_PAGE1
        };
        Self { target }
    }

    /// Re-derive the draw target from the live register.
    pub fn sync<B: Bus>(&mut self, bus: &mut B) {
        *self = Self::for_display(DisplayControl::from_bits_retain(bus.read16(REG_DISPCNT)));
    }

    #[inline(always)]
    pub fn draw_target(&self) -> usize {
        self.target
    }

    #[inline(always)]
    pub fn displayed_page(&self) -> usize {
        if self.target == MODE4_PAGE0 { MODE4_PAGE1 } else { MODE4_PAGE0 }
    }

    /// Show the page just drawn and start drawing into the other one.
    pub fn flip<B: Bus>(&mut self, bus: &mut B) {
        let mut dispcnt = DisplayControl::from_bits_retain(bus.read16(REG_DISPCNT));
        dispcnt.toggle(DisplayControl::BACKBUFFER);
        bus.write16(REG_DISPCNT, dispcnt.bits());
        *self = Self::for_display(dispcnt);
        debug!("mode4 flip: drawing into {:#010x}", self.target);
    }

    /// Plot palette index `color`. Unchecked: `x < 240`, `y < 160`.
    #[inline]
    pub fn set_pixel<B: Bus>(&self, bus: &mut B, x: usize, y: usize, color: u8) {
        let cell = self.cell_addr(x, y);
        let old = bus.read16(cell);
        let new = if x & 1 == 1 {
            (old & 0x00FF) | ((color as u16) << 8)
        } else {
            (old & 0xFF00) | color as u16
        };
        bus.write16(cell, new);
    }

    #[inline(always)]
    pub fn cell_addr(&self, x: usize, y: usize) -> usize {
        let cell = y.wrapping_mul(MODE4_CELLS_PER_ROW).wrapping_add(x / 2);
        self.target.wrapping_add(cell.wrapping_mul(2))
    }
}
