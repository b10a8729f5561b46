//! # Display Registers
//!
//! Bitflags for the LCD control registers.
//!
//! ## DisplayControl (`REG_DISPCNT`, `$04000000`)
//!
//! | Bits   | Meaning                                        |
//! |--------|------------------------------------------------|
//! | 0-2    | Video mode (0-5)                               |
//! | 4      | `BACKBUFFER`: page shown in modes 4/5          |
//! | 6      | `OBJ_1D_MAP`: linear sprite tile mapping       |
//! | 7      | `LCD_OFF`: forced blank                        |
//! | 8-11   | Background 0-3 enable                          |
//! | 12     | Sprite layer enable                            |
//! | 13-15  | Window 0, window 1, sprite window enable       |
//!
//! ## DisplayStatus (`REG_DISPSTAT`, `$04000004`)
//!
//! Blank status bits plus the per-source interrupt request enables that
//! [`Interrupts::enable`](crate::irq::Interrupts::enable) maintains.

pub const REG_DISPCNT: usize = 0x0400_0000;
pub const REG_DISPSTAT: usize = 0x0400_0004;
pub const REG_MOSAIC: usize = 0x0400_004C;

pub const SCREEN_WIDTH: usize = 240;
pub const SCREEN_HEIGHT: usize = 160;

pub const MODE_0: u16 = 0;
pub const MODE_1: u16 = 1;
pub const MODE_2: u16 = 2;
pub const MODE_3: u16 = 3;
pub const MODE_4: u16 = 4;
pub const MODE_5: u16 = 5;

bitflags::bitflags! {
    /// Flags in `REG_DISPCNT`. The mode lives in bits 0-2 and is not a flag.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct DisplayControl: u16 {
        const BACKBUFFER     = 1 << 4;
        const OBJ_1D_MAP     = 1 << 6;
        const LCD_OFF        = 1 << 7;
        const BG0_ENABLE     = 1 << 8;
        const BG1_ENABLE     = 1 << 9;
        const BG2_ENABLE     = 1 << 10;
        const BG3_ENABLE     = 1 << 11;
        const OBJ_ENABLE     = 1 << 12;
        const WIN0_ENABLE    = 1 << 13;
        const WIN1_ENABLE    = 1 << 14;
        const OBJ_WIN_ENABLE = 1 << 15;

        const BG_ALL_ENABLE  = 0b1111 << 8;

        // mode bits pass through untouched
        const _ = 0b111;
    }

    /// Flags in `REG_DISPSTAT`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct DisplayStatus: u16 {
        const IN_VBLANK     = 1 << 0;
        const IN_HBLANK     = 1 << 1;
        const VCOUNT_MATCH  = 1 << 2;
        /// Request an interrupt on vertical blank.
        const VBLANK_IRQ    = 1 << 3;
        /// Request an interrupt on horizontal blank.
        const HBLANK_IRQ    = 1 << 4;
        /// Request an interrupt when `VCOUNT` matches the setting in bits 8-15.
        const VCOUNT_IRQ    = 1 << 5;

        const _ = !0;
    }
}

impl DisplayControl {
    #[inline(always)]
    pub const fn mode(&self) -> u16 {
        self.bits() & 0b111
    }
}
