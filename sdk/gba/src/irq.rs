//! # Interrupts
//!
//! [`Interrupts`] owns the handler table and drives `IE`/`IF`/`IME`.
//! The assembly vector at `$03007FFC` belongs to the runtime's startup code;
//! it should call [`Interrupts::dispatch`] (the script-visible `intr_main`).
//!
//! ```ignore
//! console.irq.init(&mut console.bus);
//! console.irq.set_handler(IrqFlags::VBLANK, Some(on_vblank));
//! console.irq.enable(&mut console.bus, IrqFlags::VBLANK);
//! ```

use log::trace;

use crate::{
    mmio::Bus,
    scr::{DisplayStatus, REG_DISPSTAT},
};

pub const REG_IE: usize = 0x0400_0200;
pub const REG_IF: usize = 0x0400_0202;
pub const REG_IME: usize = 0x0400_0208;
/// Flags the BIOS checks in IntrWait/VBlankIntrWait.
pub const BIOS_IF: usize = 0x0300_7FF8;

pub const IRQ_SOURCES: usize = 14;

bitflags::bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct IrqFlags: u16 {
        const VBLANK  = 1 << 0;
        const HBLANK  = 1 << 1;
        const VCOUNT  = 1 << 2;
        const TIMER0  = 1 << 3;
        const TIMER1  = 1 << 4;
        const TIMER2  = 1 << 5;
        const TIMER3  = 1 << 6;
        const SERIAL  = 1 << 7;
        const DMA0    = 1 << 8;
        const DMA1    = 1 << 9;
        const DMA2    = 1 << 10;
        const DMA3    = 1 << 11;
        const KEYPAD  = 1 << 12;
        const GAMEPAK = 1 << 13;
    }
}

pub type Handler = fn();

#[derive(Debug, Clone)]
pub struct Interrupts {
    handlers: [Option<Handler>; IRQ_SOURCES],
}

impl Default for Interrupts {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupts {
    pub const fn new() -> Self {
        Self { handlers: [None; IRQ_SOURCES] }
    }

    /// Reset the controller: nothing enabled, nothing pending, no handlers.
    pub fn init<B: Bus>(&mut self, bus: &mut B) {
        bus.write16(REG_IME, 0);
        self.handlers = [None; IRQ_SOURCES];
        bus.write16(REG_IE, 0);
        bus.write16(REG_IF, 0xFFFF);
        bus.write16(REG_IME, 1);
    }

    /// Install `handler` for every source in `mask`.
    pub fn set_handler(&mut self, mask: IrqFlags, handler: Option<Handler>) {
        for (bit, slot) in self.handlers.iter_mut().enumerate() {
            if mask.bits() & (1 << bit) != 0 {
                *slot = handler;
            }
        }
    }

    pub fn enable<B: Bus>(&mut self, bus: &mut B, mask: IrqFlags) {
        bus.write16(REG_IME, 0);
        let stat = DisplayStatus::from_bits_retain(bus.read16(REG_DISPSTAT)) | display_requests(mask);
        bus.write16(REG_DISPSTAT, stat.bits());
        let ie = bus.read16(REG_IE) | mask.bits();
        bus.write16(REG_IE, ie);
        bus.write16(REG_IME, 1);
    }

    pub fn disable<B: Bus>(&mut self, bus: &mut B, mask: IrqFlags) {
        bus.write16(REG_IME, 0);
        let stat = DisplayStatus::from_bits_retain(bus.read16(REG_DISPSTAT)) - display_requests(mask);
        bus.write16(REG_DISPSTAT, stat.bits());
        let ie = bus.read16(REG_IE) & !mask.bits();
        bus.write16(REG_IE, ie);
        bus.write16(REG_IME, 1);
    }

    /// Serve the lowest-numbered pending, enabled source.
    ///
    /// Acknowledges it in `IF` and the BIOS flag word, then calls its handler.
    /// Returns the served source, or `None` if nothing was pending.
    pub fn dispatch<B: Bus>(&self, bus: &mut B) -> Option<IrqFlags> {
        let pending = bus.read16(REG_IE) & bus.read16(REG_IF);
        if pending == 0 {
            return None;
        }
        let bit = pending.trailing_zeros() as usize;
        let flag = 1u16 << bit;

        bus.write16(REG_IF, flag);
        let bios = bus.read16(BIOS_IF) | flag;
        bus.write16(BIOS_IF, bios);

        trace!("irq {} served", bit);
        if let Some(handler) = self.handlers.get(bit).copied().flatten() {
            handler();
        }
        Some(IrqFlags::from_bits_retain(flag))
    }
}

/// The `DISPSTAT` request bits that must accompany display interrupt sources.
fn display_requests(mask: IrqFlags) -> DisplayStatus {
    let mut stat = DisplayStatus::empty();
    stat.set(DisplayStatus::VBLANK_IRQ, mask.contains(IrqFlags::VBLANK));
    stat.set(DisplayStatus::HBLANK_IRQ, mask.contains(IrqFlags::HBLANK));
    stat.set(DisplayStatus::VCOUNT_IRQ, mask.contains(IrqFlags::VCOUNT));
    stat
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::sim::SimBus;

    static TIMER_HITS: AtomicU32 = AtomicU32::new(0);

    fn on_timer() {
        TIMER_HITS.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn enable_mirrors_display_sources() {
        let mut bus = SimBus::new();
        let mut irq = Interrupts::new();
        irq.init(&mut bus);

        irq.enable(&mut bus, IrqFlags::VBLANK | IrqFlags::TIMER1);
        assert_eq!(bus.read16(REG_IE), 0b1_0001);
        assert_eq!(bus.read16(REG_DISPSTAT), DisplayStatus::VBLANK_IRQ.bits());
        assert_eq!(bus.read16(REG_IME), 1);

        irq.disable(&mut bus, IrqFlags::VBLANK);
        assert_eq!(bus.read16(REG_IE), IrqFlags::TIMER1.bits());
        assert_eq!(bus.read16(REG_DISPSTAT), 0);
    }

    #[test]
    fn dispatch_serves_lowest_pending_and_acks() {
        let mut bus = SimBus::new();
        let mut irq = Interrupts::new();
        irq.init(&mut bus);
        irq.set_handler(IrqFlags::TIMER0, Some(on_timer));
        irq.enable(&mut bus, IrqFlags::TIMER0 | IrqFlags::KEYPAD);

        bus.raise(IrqFlags::KEYPAD | IrqFlags::TIMER0 | IrqFlags::SERIAL);
        assert_eq!(irq.dispatch(&mut bus), Some(IrqFlags::TIMER0));
        assert_eq!(TIMER_HITS.load(Ordering::Relaxed), 1);
        assert_eq!(bus.read16(BIOS_IF), IrqFlags::TIMER0.bits());

        assert_eq!(irq.dispatch(&mut bus), Some(IrqFlags::KEYPAD));
        // serial is pending but not enabled
        assert_eq!(irq.dispatch(&mut bus), None);
        assert_eq!(bus.read16(REG_IF), IrqFlags::SERIAL.bits());
    }

    #[test]
    fn init_clears_pending_and_enabled() {
        let mut bus = SimBus::new();
        let mut irq = Interrupts::new();
        irq.enable(&mut bus, IrqFlags::HBLANK);
        bus.raise(IrqFlags::HBLANK);
        irq.init(&mut bus);
        assert_eq!(bus.read16(REG_IE), 0);
        assert_eq!(bus.read16(REG_IF), 0);
        assert_eq!(irq.dispatch(&mut bus), None);
    }
}
