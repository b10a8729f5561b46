use log::debug;

use crate::{input::Keypad, irq::Interrupts, mmio::Bus, video::Video};

/// Everything the binding owns, created once at startup and passed by `&mut`
/// into each call. There are no other globals.
pub struct Console<B: Bus> {
    pub bus: B,
    pub video: Video,
    pub keypad: Keypad,
    pub irq: Interrupts,
}

impl<B: Bus> Console<B> {
    pub fn new(mut bus: B) -> Console<B> {
        let video = Video::install(&mut bus);
        debug!("console initialized");
        Self {
            bus,
            video,
            keypad: Keypad::new(),
            irq: Interrupts::new(),
        }
    }

    /// Re-run video install: disable every sprite in the shadow and re-derive
    /// the mode 4 draw target.
    pub fn reinstall_video(&mut self) {
        self.video = Video::install(&mut self.bus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sim::SimBus, video::OamState};

    #[test]
    fn reinstall_discards_uncommitted_edits() {
        let mut console = Console::new(SimBus::new());
        console.video.obj.set_attr(0, 0, 0x0010);
        assert_eq!(console.video.obj.state(), OamState::Uncommitted);

        console.reinstall_video();
        assert_eq!(console.video.obj.state(), OamState::Committed);
        assert_eq!(console.video.obj.shadow(0).attr0, crate::video::attr::ATTR0_DISABLED);
    }

    #[test]
    fn red_backdrop_and_one_sprite() {
        use crate::{color::Color, video::oam::hw_attr};

        let mut console = Console::new(SimBus::new());
        let red = Color::rgb5(31, 0, 0);
        assert_eq!(red.0, 0x001F);

        console.video.bg_palette.set(&mut console.bus, 0, red);
        assert_eq!(console.bus.peek16(0x0500_0000), 0x001F);

        let before = hw_attr(&mut console.bus, 5, 0);
        console.video.obj.set_attr(5, 0, 0x0000);
        assert_eq!(hw_attr(&mut console.bus, 5, 0), before);

        console.video.obj.update_oam(&mut console.bus);
        assert_eq!(hw_attr(&mut console.bus, 5, 0), 0x0000);
        assert_eq!(hw_attr(&mut console.bus, 4, 0), crate::video::attr::ATTR0_DISABLED);
    }
}
