//! # Register & Memory Access
//!
//! Every hardware operation in this crate goes through a [`Bus`]. On the
//! console that is [`Mmio`], which turns each call into a volatile load or
//! store at the absolute address. Tests and host tools use
//! [`SimBus`](crate::sim::SimBus) instead, which backs the same memory map
//! with ordinary buffers.
//!
//! Subsystems never hold raw pointers. They describe their memory with a
//! [`Region`] (base address, element stride, element count) and compute
//! addresses through it:
//!
//! ```ignore
//! const BG_PALETTE: Region = Region::new("bg palette", 0x0500_0000, 2, 256);
//! bus.write16(BG_PALETTE.addr(3), 0x7FFF);
//! ```
//!
//! [`Region::addr`] is unchecked: an index past the end yields an address past
//! the end, exactly like pointer arithmetic on the hardware. Enable the
//! `checked` feature to turn those into assertions, or use
//! [`Region::try_addr`].

use volatile_register::WO;

use crate::{bios::SysCall, Error};

/// Typed access to the GBA address space.
///
/// All primitives are unchecked and caller-trusted: an address outside the
/// intended region reaches whatever lives there.
pub trait Bus {
    fn read8(&mut self, addr: usize) -> u8;
    fn read16(&mut self, addr: usize) -> u16;
    fn write8(&mut self, addr: usize, value: u8);
    fn write16(&mut self, addr: usize, value: u16);

    fn read32(&mut self, addr: usize) -> u32 {
        let lo = self.read16(addr) as u32;
        let hi = self.read16(addr.wrapping_add(2)) as u32;
        lo | (hi << 16)
    }

    fn write32(&mut self, addr: usize, value: u32) {
        self.write16(addr, value as u16);
        self.write16(addr.wrapping_add(2), (value >> 16) as u16);
    }

    /// Copy `src` to `dst` in one bulk transfer.
    ///
    /// Video memory only accepts 16-bit stores, so the default moves
    /// halfwords and merges a trailing odd byte into its cell.
    fn copy(&mut self, dst: usize, src: &[u8]) {
        copy_halfwords(self, dst, src);
    }

    /// Issue a BIOS software interrupt and return `r0`.
    fn syscall(&mut self, call: SysCall) -> u32;
}

/// Copy `src` to `dst` one halfword store at a time, merging a trailing odd
/// byte into its cell. Works for any alignment of `src`.
pub fn copy_halfwords<B: Bus + ?Sized>(bus: &mut B, dst: usize, src: &[u8]) {
    let mut chunks = src.chunks_exact(2);
    let mut addr = dst;
    for pair in &mut chunks {
        bus.write16(addr, u16::from_le_bytes([pair[0], pair[1]]));
        addr = addr.wrapping_add(2);
    }
    if let [last] = chunks.remainder() {
        let cell = bus.read16(addr);
        bus.write16(addr, (cell & 0xFF00) | *last as u16);
    }
}

/// A fixed-size array view over a hardware memory region.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub base: usize,
    pub stride: usize,
    pub count: usize,
}

impl Region {
    pub const fn new(name: &'static str, base: usize, stride: usize, count: usize) -> Self {
        Self { name, base, stride, count }
    }

    /// Size of the whole region in bytes.
    #[inline(always)]
    pub const fn len_bytes(&self) -> usize {
        self.stride * self.count
    }

    /// One past the last byte of the region.
    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.base + self.len_bytes()
    }

    /// Address of element `index`. Unchecked unless the `checked` feature is on.
    #[inline(always)]
    pub fn addr(&self, index: usize) -> usize {
        #[cfg(feature = "checked")]
        assert!(
            index < self.count,
            "{} index {} out of range (len {})",
            self.name,
            index,
            self.count
        );
        self.base.wrapping_add(index.wrapping_mul(self.stride))
    }

    /// Address of element `index`, or [`Error::IndexOutOfRange`].
    pub fn try_addr(&self, index: usize) -> Result<usize, Error> {
        if index < self.count {
            Ok(self.base + index * self.stride)
        } else {
            Err(Error::IndexOutOfRange { region: self.name, index, len: self.count })
        }
    }

    /// Check that `len` bytes starting `offset` bytes into the region stay inside it.
    pub fn check_span(&self, offset: usize, len: usize) -> Result<usize, Error> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len_bytes() => Ok(self.base + offset),
            _ => Err(Error::Overrun {
                region: self.name,
                offset,
                len,
                capacity: self.len_bytes(),
            }),
        }
    }
}

/// DMA channel 3 register block at `$040000D4`.
#[repr(C)]
struct Dma3 {
    sad: WO<u32>,
    dad: WO<u32>,
    cnt: WO<u32>,
}

const DMA3_ADDR: usize = 0x0400_00D4;
const DMA_ENABLE: u32 = 1 << 31;
const DMA16: u32 = 0;
/// Widest count the 16-bit DMA3 count field holds.
const DMA_MAX_UNITS: usize = 0xFFFF;

/// DMA16 transfers as `(byte offset, halfword count)` pairs covering the
/// even part of a `len`-byte copy from `src`.
///
/// `None` when `src` is odd: DMA16 ignores bit 0 of the source address and
/// would read every byte shifted by one.
fn dma16_runs(src: usize, len: usize) -> Option<impl Iterator<Item = (usize, u32)>> {
    if src & 1 != 0 {
        return None;
    }
    let halfwords = len / 2;
    Some(
        (0..halfwords)
            .step_by(DMA_MAX_UNITS)
            .map(move |start| (start * 2, (halfwords - start).min(DMA_MAX_UNITS) as u32)),
    )
}

/// Volatile access to the real hardware.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// Only valid when running on the console (or an emulator of it): every
    /// access dereferences the absolute address it is given.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }

    #[inline(always)]
    fn dma3(&mut self) -> &'static mut Dma3 {
        unsafe { &mut *(DMA3_ADDR as *mut Dma3) }
    }
}

impl Bus for Mmio {
    #[inline(always)]
    fn read8(&mut self, addr: usize) -> u8 {
        unsafe { core::ptr::read_volatile(addr as *const u8) }
    }

    #[inline(always)]
    fn read16(&mut self, addr: usize) -> u16 {
        unsafe { core::ptr::read_volatile(addr as *const u16) }
    }

    #[inline(always)]
    fn read32(&mut self, addr: usize) -> u32 {
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write8(&mut self, addr: usize, value: u8) {
        unsafe { core::ptr::write_volatile(addr as *mut u8, value) }
    }

    #[inline(always)]
    fn write16(&mut self, addr: usize, value: u16) {
        unsafe { core::ptr::write_volatile(addr as *mut u16, value) }
    }

    #[inline(always)]
    fn write32(&mut self, addr: usize, value: u32) {
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }

    fn copy(&mut self, dst: usize, src: &[u8]) {
        let base = src.as_ptr() as usize;
        let Some(runs) = dma16_runs(base, src.len()) else {
            copy_halfwords(self, dst, src);
            return;
        };
        for (offset, count) in runs {
            let dma = self.dma3();
            unsafe {
                dma.sad.write(base.wrapping_add(offset) as u32);
                dma.dad.write(dst.wrapping_add(offset) as u32);
                dma.cnt.write(DMA_ENABLE | DMA16 | (count & DMA_MAX_UNITS as u32));
            }
        }
        if let (1, Some(&last)) = (src.len() % 2, src.last()) {
            let addr = dst.wrapping_add(src.len() - 1);
            let cell = self.read16(addr);
            self.write16(addr, (cell & 0xFF00) | last as u16);
        }
    }

    fn syscall(&mut self, call: SysCall) -> u32 {
        crate::bios::swi(call)
    }
}

/// Write a byte to an arbitrary address.
///
/// # Safety
///
/// Nothing about `addr` is validated. This is the escape hatch for registers
/// the rest of the crate does not model.
#[inline(always)]
pub unsafe fn write_reg8(addr: usize, value: u8) {
    unsafe { core::ptr::write_volatile(addr as *mut u8, value) }
}

/// # Safety
///
/// See [`write_reg8`]. `addr` must also be halfword aligned.
#[inline(always)]
pub unsafe fn write_reg16(addr: usize, value: u16) {
    unsafe { core::ptr::write_volatile(addr as *mut u16, value) }
}

/// # Safety
///
/// See [`write_reg8`]. `addr` must also be word aligned.
#[inline(always)]
pub unsafe fn write_reg32(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// # Safety
///
/// See [`write_reg8`]. `addr` must be halfword aligned.
#[inline(always)]
pub unsafe fn read_reg16(addr: usize) -> u16 {
    unsafe { core::ptr::read_volatile(addr as *const u16) }
}
