//! # Colors
//!
//! The GBA stores colors as 15-bit BGR: `0bbbbbgggggrrrrr`.
//!
//! ```ignore
//! const RED: Color = Color::rgb5(31, 0, 0);      // 0x001F
//! const TEAL: Color = Color::rgb8(0, 128, 128);  // same as rgb5(0, 16, 16)
//! ```

/// A packed 15-bit color, ready for a palette slot or a mode 3 pixel.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0x7FFF);

    /// Pack 5-bit channels.
    ///
    /// Channels are shifted and OR'd without masking: a value above 31 spills
    /// into the next field up (`rgb5(32, 0, 0)` is `0x0020`), and blue bits
    /// past the top of the halfword are dropped.
    #[inline(always)]
    pub const fn rgb5(r: u32, g: u32, b: u32) -> Color {
        Color(((b << 10) | (g << 5) | r) as u16)
    }

    /// Pack 8-bit channels, keeping the top 5 bits of each.
    #[inline(always)]
    pub const fn rgb8(r: u32, g: u32, b: u32) -> Color {
        Color::rgb5(r >> 3, g >> 3, b >> 3)
    }

    #[inline(always)]
    pub const fn red(self) -> u16 {
        self.0 & 0x1F
    }

    #[inline(always)]
    pub const fn green(self) -> u16 {
        (self.0 >> 5) & 0x1F
    }

    #[inline(always)]
    pub const fn blue(self) -> u16 {
        (self.0 >> 10) & 0x1F
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> u16 {
        color.0
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Color {
        Color(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb5_layout() {
        for r in 0..32 {
            for g in 0..32 {
                for b in 0..32 {
                    assert_eq!(Color::rgb5(r, g, b).0 as u32, (b << 10) | (g << 5) | r);
                }
            }
        }
    }

    #[test]
    fn rgb8_keeps_top_bits() {
        for v in 0..256 {
            assert_eq!(Color::rgb8(v, 0, 0), Color::rgb5(v >> 3, 0, 0));
            assert_eq!(Color::rgb8(0, v, 0), Color::rgb5(0, v >> 3, 0));
            assert_eq!(Color::rgb8(0, 0, v), Color::rgb5(0, 0, v >> 3));
        }
        assert_eq!(Color::rgb8(255, 255, 255), Color::WHITE);
    }

    #[test]
    fn pure_red() {
        assert_eq!(Color::rgb5(31, 0, 0).0, 0x001F);
    }

    #[test]
    fn oversized_channel_spills_upward() {
        assert_eq!(Color::rgb5(32, 0, 0).0, 0x0020);
        assert_eq!(Color::rgb5(33, 0, 0).green(), 1);
        assert_eq!(Color::rgb5(0, 32, 0).0, 0x0400);
        assert_eq!(Color::rgb5(0, 0, 64).0, 0);
    }

    #[test]
    fn channel_accessors() {
        let c = Color::rgb5(3, 17, 29);
        assert_eq!((c.red(), c.green(), c.blue()), (3, 17, 29));
    }
}
