//! # Simulated Hardware
//!
//! [`SimBus`] backs the GBA memory map with heap buffers so every subsystem
//! can run off-target. It models just enough register behaviour for the
//! binding to be observable:
//!
//! - `REG_KEYINPUT` reads the keys set with [`SimBus::press`] (active low).
//! - `REG_IF` is write-one-to-clear; [`SimBus::raise`] requests interrupts.
//! - BIOS calls are recorded in [`SimBus::calls`]. RegisterRamReset clears the
//!   selected regions, VBlankIntrWait counts a frame and raises V-blank when
//!   it is enabled.
//!
//! Accesses outside the modelled areas are dropped with a warning.

use alloc::{boxed::Box, vec, vec::Vec};

use log::{debug, warn};

use crate::{
    bios::{ResetFlags, SysCall},
    input::REG_KEYINPUT,
    irq::{IrqFlags, REG_IE, REG_IF},
    mmio::Bus,
};

pub const BIOS_CHECKSUM: u32 = 0xBAAE_187F;

const KEYINPUT_OFFSET: usize = REG_KEYINPUT - 0x0400_0000;
const IF_OFFSET: usize = REG_IF - 0x0400_0000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Area {
    Ewram,
    Iwram,
    Io,
    Palette,
    Vram,
    Oam,
    Sram,
}

impl Area {
    pub const fn base(&self) -> usize {
        match self {
            Area::Ewram => 0x0200_0000,
            Area::Iwram => 0x0300_0000,
            Area::Io => 0x0400_0000,
            Area::Palette => 0x0500_0000,
            Area::Vram => 0x0600_0000,
            Area::Oam => 0x0700_0000,
            Area::Sram => 0x0E00_0000,
        }
    }

    pub const fn size(&self) -> usize {
        match self {
            Area::Ewram => 0x4_0000,
            Area::Iwram => 0x8000,
            Area::Io => 0x400,
            Area::Palette => 0x400,
            Area::Vram => 0x1_8000,
            Area::Oam => 0x400,
            Area::Sram => 0x1_0000,
        }
    }

    /// Map an absolute address to an area and an offset into it.
    pub fn decode(addr: usize) -> Option<(Area, usize)> {
        let area = match addr >> 24 {
            0x02 => Area::Ewram,
            0x03 => Area::Iwram,
            0x04 => Area::Io,
            0x05 => Area::Palette,
            0x06 => Area::Vram,
            0x07 => Area::Oam,
            0x0E => Area::Sram,
            _ => return None,
        };
        let offset = addr - area.base();
        (offset < area.size()).then_some((area, offset))
    }
}

#[derive(Debug)]
pub struct SimBus {
    ewram: Box<[u8]>,
    iwram: Box<[u8]>,
    io: Box<[u8]>,
    palette: Box<[u8]>,
    vram: Box<[u8]>,
    oam: Box<[u8]>,
    sram: Box<[u8]>,

    /// Active-high key state; `REG_KEYINPUT` reads its complement.
    keys: u16,
    /// Every BIOS call issued so far, oldest first.
    pub calls: Vec<SysCall>,
    /// Number of VBlankIntrWait calls.
    pub frames: u32,
}

impl Default for SimBus {
    fn default() -> Self {
        Self {
            // heap allocations keep the test thread's stack small
            ewram: vec![0; Area::Ewram.size()].into_boxed_slice(),
            iwram: vec![0; Area::Iwram.size()].into_boxed_slice(),
            io: vec![0; Area::Io.size()].into_boxed_slice(),
            palette: vec![0; Area::Palette.size()].into_boxed_slice(),
            vram: vec![0; Area::Vram.size()].into_boxed_slice(),
            oam: vec![0; Area::Oam.size()].into_boxed_slice(),
            // erased flash/SRAM reads back as 0xFF
            sram: vec![0xFF; Area::Sram.size()].into_boxed_slice(),
            keys: 0,
            calls: Vec::new(),
            frames: 0,
        }
    }
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn mem(&self, area: Area) -> &[u8] {
        match area {
            Area::Ewram => &self.ewram,
            Area::Iwram => &self.iwram,
            Area::Io => &self.io,
            Area::Palette => &self.palette,
            Area::Vram => &self.vram,
            Area::Oam => &self.oam,
            Area::Sram => &self.sram,
        }
    }

    fn mem_mut(&mut self, area: Area) -> &mut [u8] {
        match area {
            Area::Ewram => &mut self.ewram,
            Area::Iwram => &mut self.iwram,
            Area::Io => &mut self.io,
            Area::Palette => &mut self.palette,
            Area::Vram => &mut self.vram,
            Area::Oam => &mut self.oam,
            Area::Sram => &mut self.sram,
        }
    }

    /// Hold down `keys` (a `KEY_*` mask) until the next call.
    pub fn press(&mut self, keys: u16) {
        self.keys = keys & 0x03FF;
    }

    /// Set bits in `REG_IF`, as the hardware does when a source fires.
    pub fn raise(&mut self, flags: IrqFlags) {
        let pending = self.peek16(REG_IF) | flags.bits();
        self.store16(IF_OFFSET, pending);
    }

    /// Bytes `[addr, addr + len)` if they lie inside one area.
    pub fn slice(&self, addr: usize, len: usize) -> Option<&[u8]> {
        let (area, offset) = Area::decode(addr)?;
        self.mem(area).get(offset..offset.checked_add(len)?)
    }

    /// Read without side effects. Unmapped addresses read as zero.
    pub fn peek8(&self, addr: usize) -> u8 {
        match Area::decode(addr) {
            Some((Area::Io, KEYINPUT_OFFSET)) => self.keyinput() as u8,
            Some((Area::Io, o)) if o == KEYINPUT_OFFSET + 1 => (self.keyinput() >> 8) as u8,
            Some((area, offset)) => self.mem(area)[offset],
            None => 0,
        }
    }

    pub fn peek16(&self, addr: usize) -> u16 {
        let addr = addr & !1;
        u16::from_le_bytes([self.peek8(addr), self.peek8(addr + 1)])
    }

    fn keyinput(&self) -> u16 {
        !self.keys & 0x03FF
    }

    fn store16(&mut self, io_offset: usize, value: u16) {
        self.io[io_offset..io_offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn register_ram_reset(&mut self, flags: ResetFlags) {
        if flags.contains(ResetFlags::EWRAM) {
            self.ewram.fill(0);
        }
        if flags.contains(ResetFlags::IWRAM) {
            let keep = self.iwram.len() - 0x200;
            self.iwram[..keep].fill(0);
        }
        if flags.contains(ResetFlags::PALETTE) {
            self.palette.fill(0);
        }
        if flags.contains(ResetFlags::VRAM) {
            self.vram.fill(0);
        }
        if flags.contains(ResetFlags::OAM) {
            self.oam.fill(0);
        }
        if flags.contains(ResetFlags::SIO) {
            self.io[0x120..KEYINPUT_OFFSET].fill(0);
            self.io[0x134..0x160].fill(0);
        }
        if flags.contains(ResetFlags::SOUND) {
            self.io[0x060..0x0B0].fill(0);
        }
        if flags.contains(ResetFlags::OTHER) {
            self.io[0x000..0x060].fill(0);
            self.io[0x0B0..0x120].fill(0);
        }
    }
}

impl Bus for SimBus {
    fn read8(&mut self, addr: usize) -> u8 {
        if Area::decode(addr).is_none() {
            debug!("read from unmapped address {:#010x}", addr);
        }
        self.peek8(addr)
    }

    fn read16(&mut self, addr: usize) -> u16 {
        if Area::decode(addr).is_none() {
            debug!("read from unmapped address {:#010x}", addr);
        }
        self.peek16(addr)
    }

    fn write8(&mut self, addr: usize, value: u8) {
        match Area::decode(addr) {
            Some((Area::Io, o)) if o == IF_OFFSET || o == IF_OFFSET + 1 => {
                self.io[o] &= !value;
            }
            Some((Area::Io, o)) if o == KEYINPUT_OFFSET || o == KEYINPUT_OFFSET + 1 => {
                warn!("write to read-only KEYINPUT ignored");
            }
            Some((area, offset)) => self.mem_mut(area)[offset] = value,
            None => warn!("write to unmapped address {:#010x} dropped", addr),
        }
    }

    fn write16(&mut self, addr: usize, value: u16) {
        let addr = addr & !1;
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr + 1, hi);
    }

    fn syscall(&mut self, call: SysCall) -> u32 {
        debug!("swi {:#04x}: {:?}", call.number(), call);
        self.calls.push(call);
        match call {
            SysCall::RegisterRamReset(flags) => self.register_ram_reset(flags),
            SysCall::VBlankIntrWait => {
                self.frames += 1;
                let enabled = IrqFlags::from_bits_truncate(self.peek16(REG_IE));
                if enabled.contains(IrqFlags::VBLANK) {
                    self.raise(IrqFlags::VBLANK);
                }
            }
            SysCall::BiosChecksum => return BIOS_CHECKSUM,
            SysCall::SoftReset | SysCall::Halt | SysCall::Stop => {}
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_bounds() {
        assert_eq!(Area::decode(0x0500_03FF), Some((Area::Palette, 0x3FF)));
        assert_eq!(Area::decode(0x0500_0400), None);
        assert_eq!(Area::decode(0x0601_7FFF), Some((Area::Vram, 0x1_7FFF)));
        assert_eq!(Area::decode(0x0601_8000), None);
        assert_eq!(Area::decode(0x0800_0000), None);
    }

    #[test]
    fn halfword_access_is_little_endian_and_aligned() {
        let mut bus = SimBus::new();
        bus.write16(0x0600_0011, 0xBEEF);
        assert_eq!(bus.peek8(0x0600_0010), 0xEF);
        assert_eq!(bus.peek8(0x0600_0011), 0xBE);
        assert_eq!(bus.read32(0x0600_0010), 0x0000_BEEF);
    }

    #[test]
    fn unmapped_write_is_dropped() {
        let mut bus = SimBus::new();
        bus.write16(0x0900_0000, 0x1234);
        assert_eq!(bus.read16(0x0900_0000), 0);
    }

    #[test]
    fn keyinput_is_active_low() {
        let mut bus = SimBus::new();
        assert_eq!(bus.read16(REG_KEYINPUT), 0x03FF);
        bus.press(0b11);
        assert_eq!(bus.read16(REG_KEYINPUT), 0x03FC);
        bus.write16(REG_KEYINPUT, 0);
        assert_eq!(bus.read16(REG_KEYINPUT), 0x03FC);
    }

    #[test]
    fn if_is_write_one_to_clear() {
        let mut bus = SimBus::new();
        bus.raise(IrqFlags::VBLANK | IrqFlags::TIMER0);
        bus.write16(REG_IF, IrqFlags::VBLANK.bits());
        assert_eq!(bus.read16(REG_IF), IrqFlags::TIMER0.bits());
    }

    #[test]
    fn register_ram_reset_clears_selected_areas() {
        let mut bus = SimBus::new();
        bus.write16(0x0500_0000, 0x7FFF);
        bus.write16(0x0700_0000, 0x1234);
        bus.write16(0x0300_7FF8, 0x0001);
        bus.syscall(SysCall::RegisterRamReset(ResetFlags::PALETTE | ResetFlags::IWRAM));
        assert_eq!(bus.peek16(0x0500_0000), 0);
        assert_eq!(bus.peek16(0x0700_0000), 0x1234);
        // the BIOS area at the top of IWRAM survives
        assert_eq!(bus.peek16(0x0300_7FF8), 0x0001);
    }

    #[test]
    fn vblank_wait_counts_frames() {
        let mut bus = SimBus::new();
        assert_eq!(bus.syscall(SysCall::BiosChecksum), BIOS_CHECKSUM);
        bus.syscall(SysCall::VBlankIntrWait);
        assert_eq!(bus.read16(REG_IF), 0);
        bus.write16(REG_IE, IrqFlags::VBLANK.bits());
        bus.syscall(SysCall::VBlankIntrWait);
        assert_eq!(bus.frames, 2);
        assert_eq!(bus.read16(REG_IF), IrqFlags::VBLANK.bits());
        assert_eq!(bus.calls.len(), 3);
    }
}
