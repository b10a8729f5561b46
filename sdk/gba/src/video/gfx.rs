//! # Tile Memory
//!
//! Uploads raw tile, sprite and font data into VRAM. A block is 64 bytes
//! (32 halfwords); `offset` is a byte position inside the addressed range.
//!
//! ```ignore
//! // glyphs for tiles 16.. of the sprite sheet
//! TileMemory::OBJ.write(&mut console.bus, 16, 0, &FONT);
//! ```

use crate::{
    mmio::{Bus, Region},
    Error,
};

pub const BLOCK_SIZE: usize = 64;

pub const BG_GFX: Region = Region::new("bg gfx", 0x0600_0000, 1, 0x1_0000);
pub const OBJ_GFX: Region = Region::new("obj gfx", 0x0601_0000, 1, 0x8000);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileMemory {
    region: Region,
}

impl TileMemory {
    pub const BG: TileMemory = TileMemory { region: BG_GFX };
    pub const OBJ: TileMemory = TileMemory { region: OBJ_GFX };

    /// Absolute address of `block`/`offset`.
    #[inline(always)]
    pub fn addr(&self, block: usize, offset: usize) -> usize {
        self.region
            .base
            .wrapping_add(block.wrapping_mul(BLOCK_SIZE))
            .wrapping_add(offset)
    }

    /// Copy all of `bytes` in one transfer. Unchecked: a long slice runs past
    /// the region into whatever follows.
    pub fn write<B: Bus>(&self, bus: &mut B, block: usize, offset: usize, bytes: &[u8]) {
        bus.copy(self.addr(block, offset), bytes);
    }

    pub fn try_write<B: Bus>(&self, bus: &mut B, block: usize, offset: usize, bytes: &[u8]) -> Result<(), Error> {
        let start = block
            .checked_mul(BLOCK_SIZE)
            .and_then(|b| b.checked_add(offset))
            .unwrap_or(usize::MAX);
        let dst = self.region.check_span(start, bytes.len())?;
        bus.copy(dst, bytes);
        Ok(())
    }
}
