//! # BIOS Calls
//!
//! Thin wrappers over the BIOS software interrupts the binding exposes. Each
//! goes through [`Bus::syscall`], so the simulator can observe them.
//!
//! ```ignore
//! loop {
//!     bios::vblank_intr_wait(&mut console.bus);
//!     console.video.obj.update_oam(&mut console.bus);
//! }
//! ```
//!
//! `vblank_intr_wait` only returns if the V-blank interrupt is enabled and
//! the dispatcher acknowledges it (see [`crate::irq`]).

use crate::{irq::REG_IME, mmio::Bus};

/// Byte the BIOS reads on SoftReset to pick the restart address.
pub const RESTART_FLAG_ADDR: usize = 0x0300_7FFA;

pub const ROM_RESTART: u8 = 0;
pub const RAM_RESTART: u8 = 1;

bitflags::bitflags! {
    /// Regions cleared by RegisterRamReset.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct ResetFlags: u8 {
        const EWRAM   = 1 << 0;
        /// All of IWRAM except the top `0x200` bytes (stack and BIOS area).
        const IWRAM   = 1 << 1;
        const PALETTE = 1 << 2;
        const VRAM    = 1 << 3;
        const OAM     = 1 << 4;
        const SIO     = 1 << 5;
        const SOUND   = 1 << 6;
        const OTHER   = 1 << 7;
    }
}

/// A BIOS call with its argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SysCall {
    SoftReset,
    RegisterRamReset(ResetFlags),
    Halt,
    Stop,
    VBlankIntrWait,
    BiosChecksum,
}

impl SysCall {
    /// The SWI comment number.
    pub const fn number(&self) -> u8 {
        match self {
            SysCall::SoftReset => 0x00,
            SysCall::RegisterRamReset(_) => 0x01,
            SysCall::Halt => 0x02,
            SysCall::Stop => 0x03,
            SysCall::VBlankIntrWait => 0x05,
            SysCall::BiosChecksum => 0x0D,
        }
    }
}

/// Restart from ROM or RAM depending on `restart_flag`. Does not return on hardware.
pub fn soft_reset<B: Bus>(bus: &mut B, restart_flag: u8) {
    bus.write16(REG_IME, 0);
    bus.write8(RESTART_FLAG_ADDR, restart_flag);
    bus.syscall(SysCall::SoftReset);
}

pub fn register_ram_reset<B: Bus>(bus: &mut B, flags: ResetFlags) {
    bus.syscall(SysCall::RegisterRamReset(flags));
}

/// Low-power wait until the next interrupt.
pub fn halt<B: Bus>(bus: &mut B) {
    bus.syscall(SysCall::Halt);
}

/// Deep sleep until a keypad, cartridge or serial interrupt.
pub fn stop<B: Bus>(bus: &mut B) {
    bus.syscall(SysCall::Stop);
}

/// Block until the next vertical blank interrupt has been acknowledged.
pub fn vblank_intr_wait<B: Bus>(bus: &mut B) {
    bus.syscall(SysCall::VBlankIntrWait);
}

/// `0xBAAE187F` on a GBA, `0xBAAE1880` on a DS.
pub fn bios_checksum<B: Bus>(bus: &mut B) -> u32 {
    bus.syscall(SysCall::BiosChecksum)
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
macro_rules! swi {
    ($num:literal, $r0:expr) => {{
        let mut r0: u32 = $r0;
        unsafe {
            #[cfg(target_feature = "thumb-mode")]
            core::arch::asm!(
                concat!("swi ", $num),
                inlateout("r0") r0,
                clobber_abi("C"),
            );
            #[cfg(not(target_feature = "thumb-mode"))]
            core::arch::asm!(
                concat!("swi ", $num, " << 16"),
                inlateout("r0") r0,
                clobber_abi("C"),
            );
        }
        r0
    }};
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub(crate) fn swi(call: SysCall) -> u32 {
    match call {
        SysCall::SoftReset => swi!("0x00", 0),
        SysCall::RegisterRamReset(flags) => swi!("0x01", flags.bits() as u32),
        SysCall::Halt => swi!("0x02", 0),
        SysCall::Stop => swi!("0x03", 0),
        SysCall::VBlankIntrWait => swi!("0x05", 0),
        SysCall::BiosChecksum => swi!("0x0D", 0),
    }
}

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub(crate) fn swi(call: SysCall) -> u32 {
    log::warn!("BIOS call {:?} (swi {:#04x}) has no effect off-target", call, call.number());
    0
}
