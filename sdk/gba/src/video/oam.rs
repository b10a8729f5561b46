//! # Sprite Attributes
//!
//! OAM holds 128 sprite entries that the PPU reads while it draws. Editing it
//! piecemeal mid-frame can show a sprite with half its fields updated, so
//! edits go into a RAM shadow first and reach the hardware in one transfer:
//!
//! ```ignore
//! let obj = &mut console.video.obj;
//! obj.set_attr(0, 0, attr::ATTR0_SQUARE | attr::pack_obj_y(40));
//! obj.set_attr(0, 1, attr::ATTR1_SIZE_16 | attr::pack_obj_x(60));
//! obj.set_attr(0, 2, attr::pack_palette(1) | 4);
//!
//! bios::vblank_intr_wait(&mut console.bus);
//! obj.update_oam(&mut console.bus);
//! ```
//!
//! Until [`ObjAttrs::update_oam`] runs, the hardware keeps showing the last
//! committed table. Committing outside V-blank works, but may tear.

use bytemuck::{Pod, Zeroable};
use log::debug;

use crate::{
    mmio::{Bus, Region},
    video::attr::{self, ATTR0_DISABLED},
    Error,
};

pub const OBJ_COUNT: usize = 128;
/// Halfwords per hardware entry: three attributes plus an affine parameter.
pub const ENTRY_HALFWORDS: usize = 4;

pub const OAM: Region = Region::new("oam", 0x0700_0000, 8, OBJ_COUNT);

/// One OAM entry as laid out in hardware.
///
/// `affine` is the interleaved rotation/scale parameter slot, not part of the
/// sprite; it is carried so a commit is a byte-exact image of OAM.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct ObjAttr {
    pub attr0: u16,
    pub attr1: u16,
    pub attr2: u16,
    pub affine: u16,
}

impl ObjAttr {
    pub const DISABLED: ObjAttr = ObjAttr { attr0: ATTR0_DISABLED, attr1: 0, attr2: 0, affine: 0 };
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OamState {
    /// Shadow and hardware hold the same bytes.
    Committed,
    /// The shadow has edits the hardware has not seen.
    Uncommitted,
}

/// The OAM shadow buffer.
#[derive(Debug, Clone)]
pub struct ObjAttrs {
    shadow: [ObjAttr; OBJ_COUNT],
    state: OamState,
}

impl Default for ObjAttrs {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjAttrs {
    /// Every sprite disabled.
    pub const fn new() -> Self {
        Self {
            shadow: [ObjAttr::DISABLED; OBJ_COUNT],
            state: OamState::Committed,
        }
    }

    /// Disable every sprite in the shadow. Hardware is untouched until the
    /// next [`update_oam`](Self::update_oam).
    pub fn reset(&mut self) {
        self.shadow = [ObjAttr::DISABLED; OBJ_COUNT];
        self.state = OamState::Uncommitted;
    }

    pub fn state(&self) -> OamState {
        self.state
    }

    pub fn shadow(&self, index: usize) -> &ObjAttr {
        &self.shadow[index]
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.shadow[..])
    }

    /// Replace attribute `field` of shadow entry `index`.
    ///
    /// Unchecked: the shadow is addressed as a flat halfword array at
    /// `index * 4 + field`, so field 3 is the affine slot and larger fields
    /// spill into later entries. Only an address past the whole buffer panics.
    #[inline]
    pub fn set_attr(&mut self, index: usize, field: usize, value: u16) {
        let halfwords: &mut [u16] = bytemuck::cast_slice_mut(&mut self.shadow[..]);
        halfwords[index.wrapping_mul(ENTRY_HALFWORDS).wrapping_add(field)] = value;
        self.state = OamState::Uncommitted;
    }

    pub fn try_set_attr(&mut self, index: usize, field: usize, value: u16) -> Result<(), Error> {
        if index >= OBJ_COUNT {
            return Err(Error::IndexOutOfRange { region: "oam shadow", index, len: OBJ_COUNT });
        }
        if field > 2 {
            return Err(Error::InvalidField(field));
        }
        self.set_attr(index, field, value);
        Ok(())
    }

    /// Copy the whole shadow into OAM in one transfer.
    pub fn update_oam<B: Bus>(&mut self, bus: &mut B) {
        bus.copy(OAM.base, bytemuck::cast_slice(&self.shadow[..]));
        if self.state == OamState::Uncommitted {
            debug!("oam committed");
        }
        self.state = OamState::Committed;
    }

    /// Y of live hardware entry `index`.
    pub fn attr0_objy<B: Bus>(&self, bus: &mut B, index: usize) -> u16 {
        attr::obj_y_of(hw_attr(bus, index, 0))
    }

    /// X of live hardware entry `index`.
    pub fn attr1_objx<B: Bus>(&self, bus: &mut B, index: usize) -> u16 {
        attr::obj_x_of(hw_attr(bus, index, 1))
    }

    /// Affine parameter index of live hardware entry `index`.
    pub fn attr1_rot<B: Bus>(&self, bus: &mut B, index: usize) -> u16 {
        attr::rot_data_of(hw_attr(bus, index, 1))
    }

    pub fn attr2_priority<B: Bus>(&self, bus: &mut B, index: usize) -> u16 {
        attr::priority_of(hw_attr(bus, index, 2))
    }

    pub fn attr2_palette<B: Bus>(&self, bus: &mut B, index: usize) -> u16 {
        attr::palette_of(hw_attr(bus, index, 2))
    }
}

/// Raw attribute `field` of hardware entry `index`. Unchecked.
#[inline(always)]
pub fn hw_attr<B: Bus>(bus: &mut B, index: usize, field: usize) -> u16 {
    bus.read16(OAM.addr(index).wrapping_add(field * 2))
}
