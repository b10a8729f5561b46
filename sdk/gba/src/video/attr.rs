//! # Sprite Attribute Bit-fields
//!
//! ```text
//! attr0: SS C M TT DD YYYYYYYY   S shape, C 256-color, M mosaic, T blend type,
//!                                D display mode (normal/affine/disabled/double), Y row
//! attr1: ZZ V H AAA XXXXXXXXX    Z size, V/H flip (or A affine index), X column
//! attr2: PPPP RR NNNNNNNNNN      P palette bank, R priority, N tile
//! ```
//!
//! `pack_*` build a field from a sub-field value; `*_of` extract it again.

use core::ops::Range;

use bit_field::BitField;

pub const OBJ_Y: Range<usize> = 0..8;
pub const OBJ_X: Range<usize> = 0..9;
pub const ROT_DATA: Range<usize> = 9..14;
pub const TILE: Range<usize> = 0..10;
pub const PRIORITY: Range<usize> = 10..12;
pub const PALETTE: Range<usize> = 12..16;

pub const ATTR0_NORMAL: u16 = 0;
pub const ATTR0_ROTSCALE: u16 = 1 << 8;
pub const ATTR0_DISABLED: u16 = 2 << 8;
pub const ATTR0_ROTSCALE_DOUBLE: u16 = 3 << 8;
pub const ATTR0_TYPE_NORMAL: u16 = 0;
pub const ATTR0_TYPE_BLENDED: u16 = 1 << 10;
pub const ATTR0_TYPE_WINDOWED: u16 = 2 << 10;
pub const ATTR0_MOSAIC: u16 = 1 << 12;
pub const ATTR0_COLOR_16: u16 = 0;
pub const ATTR0_COLOR_256: u16 = 1 << 13;
pub const ATTR0_SQUARE: u16 = 0;
pub const ATTR0_WIDE: u16 = 1 << 14;
pub const ATTR0_TALL: u16 = 2 << 14;

pub const ATTR1_FLIP_X: u16 = 1 << 12;
pub const ATTR1_FLIP_Y: u16 = 1 << 13;
pub const ATTR1_SIZE_8: u16 = 0;
pub const ATTR1_SIZE_16: u16 = 1 << 14;
pub const ATTR1_SIZE_32: u16 = 2 << 14;
pub const ATTR1_SIZE_64: u16 = 3 << 14;

#[inline(always)]
fn pack(range: Range<usize>, value: u16) -> u16 {
    let width = range.end - range.start;
    *0u16.set_bits(range, value & ((1 << width) - 1) as u16)
}

#[inline(always)]
pub fn pack_obj_y(y: u16) -> u16 {
    pack(OBJ_Y, y)
}

#[inline(always)]
pub fn pack_obj_x(x: u16) -> u16 {
    pack(OBJ_X, x)
}

#[inline(always)]
pub fn pack_rot_data(index: u16) -> u16 {
    pack(ROT_DATA, index)
}

#[inline(always)]
pub fn pack_tile(tile: u16) -> u16 {
    pack(TILE, tile)
}

#[inline(always)]
pub fn pack_priority(priority: u16) -> u16 {
    pack(PRIORITY, priority)
}

#[inline(always)]
pub fn pack_palette(bank: u16) -> u16 {
    pack(PALETTE, bank)
}

#[inline(always)]
pub fn obj_y_of(attr0: u16) -> u16 {
    attr0.get_bits(OBJ_Y)
}

#[inline(always)]
pub fn obj_x_of(attr1: u16) -> u16 {
    attr1.get_bits(OBJ_X)
}

#[inline(always)]
pub fn rot_data_of(attr1: u16) -> u16 {
    attr1.get_bits(ROT_DATA)
}

#[inline(always)]
pub fn tile_of(attr2: u16) -> u16 {
    attr2.get_bits(TILE)
}

#[inline(always)]
pub fn priority_of(attr2: u16) -> u16 {
    attr2.get_bits(PRIORITY)
}

#[inline(always)]
pub fn palette_of(attr2: u16) -> u16 {
    attr2.get_bits(PALETTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packers_match_hardware_macros() {
        assert_eq!(pack_obj_y(0x1FF), 0x00FF);
        assert_eq!(pack_obj_x(0x3FF), 0x01FF);
        assert_eq!(pack_rot_data(31), 31 << 9);
        assert_eq!(pack_rot_data(32), 0);
        assert_eq!(pack_priority(3), 3 << 10);
        assert_eq!(pack_palette(15), 15 << 12);
        assert_eq!(pack_tile(0x3FF), 0x03FF);
    }

    #[test]
    fn extract_ignores_neighbouring_fields() {
        let attr1 = ATTR1_SIZE_32 | ATTR1_FLIP_Y | pack_obj_x(300);
        assert_eq!(obj_x_of(attr1), 300);

        let attr2 = pack_palette(9) | pack_priority(2) | pack_tile(513);
        assert_eq!(palette_of(attr2), 9);
        assert_eq!(priority_of(attr2), 2);
        assert_eq!(tile_of(attr2), 513);

        let attr0 = ATTR0_WIDE | ATTR0_COLOR_256 | pack_obj_y(200);
        assert_eq!(obj_y_of(attr0), 200);
    }

    #[test]
    fn disabled_has_no_y() {
        assert_eq!(obj_y_of(ATTR0_DISABLED), 0);
        assert_eq!(ATTR0_DISABLED, 0x0200);
    }
}
