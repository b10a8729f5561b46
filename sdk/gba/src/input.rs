use crate::mmio::Bus;

pub const REG_KEYINPUT: usize = 0x0400_0130;

bitflags::bitflags! {
    /// Keypad bits, active high. `REG_KEYINPUT` itself is active low.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct Keys: u16 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;

        const DPAD = Self::RIGHT.bits() | Self::LEFT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

/// Latched keypad state with auto-repeat.
///
/// Call [`scan`](Keypad::scan) once per frame; the queries report edges
/// relative to the previous scan.
#[derive(Debug, Clone)]
pub struct Keypad {
    held: Keys,
    held_last: Keys,
    repeat: Keys,
    /// Frames before a held key starts repeating. Zero disables repeat.
    delay: u8,
    /// Frames between repeats once started.
    rate: u8,
    countdown: u8,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    pub const fn new() -> Self {
        Self {
            held: Keys::empty(),
            held_last: Keys::empty(),
            repeat: Keys::empty(),
            delay: 60,
            rate: 30,
            countdown: 60,
        }
    }

    pub fn set_repeat(&mut self, delay: u8, rate: u8) {
        self.delay = delay;
        self.rate = rate;
        self.countdown = delay;
    }

    pub fn scan<B: Bus>(&mut self, bus: &mut B) {
        self.held_last = self.held;
        self.held = Keys::from_bits_truncate(!bus.read16(REG_KEYINPUT));

        if self.delay != 0 {
            if self.held != self.held_last {
                self.countdown = self.delay;
                self.repeat = self.down();
            }
            self.countdown = self.countdown.saturating_sub(1);
            if self.countdown == 0 {
                self.countdown = self.rate.max(1);
                self.repeat = self.held;
            }
        }
    }

    /// Keys pressed since the previous scan.
    #[inline]
    pub fn down(&self) -> Keys {
        self.held & !self.held_last
    }

    /// Keys released since the previous scan.
    #[inline]
    pub fn up(&self) -> Keys {
        self.held_last & !self.held
    }

    #[inline]
    pub fn held(&self) -> Keys {
        self.held
    }

    /// Keys pressed on the last change of keypad state, or held through an
    /// expired repeat countdown. A later change replaces them. Reading
    /// consumes them.
    pub fn down_repeat(&mut self) -> Keys {
        core::mem::take(&mut self.repeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBus;

    #[test]
    fn edges_follow_scans() {
        let mut bus = SimBus::new();
        let mut pad = Keypad::new();

        bus.press(Keys::A.bits());
        pad.scan(&mut bus);
        assert_eq!(pad.down(), Keys::A);
        assert_eq!(pad.held(), Keys::A);

        bus.press((Keys::A | Keys::UP).bits());
        pad.scan(&mut bus);
        assert_eq!(pad.down(), Keys::UP);
        assert_eq!(pad.up(), Keys::empty());

        bus.press(Keys::UP.bits());
        pad.scan(&mut bus);
        assert_eq!(pad.up(), Keys::A);
        assert_eq!(pad.held(), Keys::UP);
    }

    #[test]
    fn repeat_after_delay_then_rate() {
        let mut bus = SimBus::new();
        let mut pad = Keypad::new();
        pad.set_repeat(3, 2);

        bus.press(Keys::B.bits());
        pad.scan(&mut bus);
        assert_eq!(pad.down_repeat(), Keys::B);
        assert_eq!(pad.down_repeat(), Keys::empty());

        pad.scan(&mut bus);
        assert_eq!(pad.down_repeat(), Keys::empty());
        pad.scan(&mut bus);
        assert_eq!(pad.down_repeat(), Keys::B);

        pad.scan(&mut bus);
        assert_eq!(pad.down_repeat(), Keys::empty());
        pad.scan(&mut bus);
        assert_eq!(pad.down_repeat(), Keys::B);
    }

    #[test]
    fn release_replaces_pending_press() {
        let mut bus = SimBus::new();
        let mut pad = Keypad::new();

        bus.press(Keys::A.bits());
        pad.scan(&mut bus);
        bus.press(0);
        pad.scan(&mut bus);
        assert_eq!(pad.down_repeat(), Keys::empty());

        bus.press(Keys::A.bits());
        pad.scan(&mut bus);
        bus.press((Keys::A | Keys::B).bits());
        pad.scan(&mut bus);
        assert_eq!(pad.down_repeat(), Keys::B);
    }

    #[test]
    fn zero_delay_disables_repeat() {
        let mut bus = SimBus::new();
        let mut pad = Keypad::new();
        pad.set_repeat(0, 0);
        bus.press(Keys::START.bits());
        for _ in 0..100 {
            pad.scan(&mut bus);
        }
        assert_eq!(pad.down_repeat(), Keys::empty());
    }

    #[test]
    fn dpad_mask() {
        assert_eq!(Keys::DPAD.bits(), 0x00F0);
    }
}
