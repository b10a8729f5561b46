//! # Save Memory
//!
//! Battery-backed SRAM at `$0E000000`. The cartridge bus is 8 bits wide, so
//! every access here is a single byte; never DMA into it.

use crate::{mmio::{Bus, Region}, Error};

pub const SRAM: Region = Region::new("sram", 0x0E00_0000, 1, 0x1_0000);

/// Unchecked.
#[inline]
pub fn read_byte<B: Bus>(bus: &mut B, offset: usize) -> u8 {
    bus.read8(SRAM.addr(offset))
}

/// Unchecked.
#[inline]
pub fn write_byte<B: Bus>(bus: &mut B, offset: usize, value: u8) {
    bus.write8(SRAM.addr(offset), value);
}

/// Write `bytes` one at a time from `offset`. No length header is stored and
/// a power loss mid-loop leaves a partial write. Unchecked.
pub fn write_bytes<B: Bus>(bus: &mut B, offset: usize, bytes: &[u8]) {
    for (i, byte) in bytes.iter().enumerate() {
        bus.write8(SRAM.addr(offset.wrapping_add(i)), *byte);
    }
}

pub fn try_write_bytes<B: Bus>(bus: &mut B, offset: usize, bytes: &[u8]) -> Result<(), Error> {
    SRAM.check_span(offset, bytes.len())?;
    write_bytes(bus, offset, bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBus;

    #[test]
    fn bytes_land_in_order() {
        let mut bus = SimBus::new();
        write_bytes(&mut bus, 0x10, b"SAVE");
        assert_eq!(bus.slice(0x0E00_0010, 4), Some(&b"SAVE"[..]));
        assert_eq!(read_byte(&mut bus, 0x13), b'E');
        // untouched SRAM reads back erased
        assert_eq!(read_byte(&mut bus, 0x14), 0xFF);
    }

    #[test]
    fn single_byte_roundtrip() {
        let mut bus = SimBus::new();
        write_byte(&mut bus, 0xFFFF, 0x42);
        assert_eq!(read_byte(&mut bus, 0xFFFF), 0x42);
    }

    #[test]
    fn checked_write_refuses_overrun() {
        let mut bus = SimBus::new();
        assert!(try_write_bytes(&mut bus, 0xFFFE, b"abc").is_err());
        assert_eq!(read_byte(&mut bus, 0xFFFE), 0xFF);
        assert!(try_write_bytes(&mut bus, 0xFFFD, b"abc").is_ok());
    }
}
