//! # Palettes
//!
//! Two tables of 256 colors in palette RAM. Background layers index the first,
//! sprites the second. Writes are visible on the next scanline; there is no
//! staging.
//!
//! In 16-color mode a table is 16 banks of 16; bank `n` starts at slot `16 * n`.

use crate::{
    color::Color,
    mmio::{Bus, Region},
    Error,
};

pub const BG_PALETTE: Region = Region::new("bg palette", 0x0500_0000, 2, 256);
pub const OBJ_PALETTE: Region = Region::new("obj palette", 0x0500_0200, 2, 256);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    region: Region,
}

impl PaletteTable {
    pub const BG: PaletteTable = PaletteTable { region: BG_PALETTE };
    pub const OBJ: PaletteTable = PaletteTable { region: OBJ_PALETTE };

    pub const fn region(&self) -> Region {
        self.region
    }

    /// Replace slot `index`. Unchecked: `index` must be below 256.
    #[inline(always)]
    pub fn set<B: Bus>(&self, bus: &mut B, index: usize, color: impl Into<u16>) {
        bus.write16(self.region.addr(index), color.into());
    }

    #[inline(always)]
    pub fn get<B: Bus>(&self, bus: &mut B, index: usize) -> Color {
        Color(bus.read16(self.region.addr(index)))
    }

    pub fn try_set<B: Bus>(&self, bus: &mut B, index: usize, color: impl Into<u16>) -> Result<(), Error> {
        let addr = self.region.try_addr(index)?;
        bus.write16(addr, color.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBus;

    #[test]
    fn every_slot_reads_back() {
        let mut bus = SimBus::new();
        for i in 0..256 {
            let c = ((i * 0x81) & 0x7FFF) as u16;
            PaletteTable::BG.set(&mut bus, i, c);
            PaletteTable::OBJ.set(&mut bus, i, Color(0x7FFF - c));
        }
        for i in 0..256 {
            let c = ((i * 0x81) & 0x7FFF) as u16;
            assert_eq!(PaletteTable::BG.get(&mut bus, i), Color(c));
            assert_eq!(PaletteTable::OBJ.get(&mut bus, i), Color(0x7FFF - c));
        }
    }

    #[test]
    fn tables_do_not_overlap() {
        let mut bus = SimBus::new();
        PaletteTable::OBJ.set(&mut bus, 0, Color::WHITE);
        assert_eq!(bus.peek16(0x0500_0200), 0x7FFF);
        assert_eq!(PaletteTable::BG.get(&mut bus, 255), Color::BLACK);
    }

    #[test]
    fn try_set_rejects_index_256() {
        let mut bus = SimBus::new();
        assert!(PaletteTable::BG.try_set(&mut bus, 256, 0x7FFFu16).is_err());
        // would have been obj slot 0
        assert_eq!(bus.peek16(0x0500_0200), 0);
    }
}
