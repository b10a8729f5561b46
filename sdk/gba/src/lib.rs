//! # GBA hardware layer
//!
//! Typed, bus-generic access to the Game Boy Advance video, keypad, interrupt,
//! BIOS and save hardware, shaped for a scripting binding: every operation is
//! one synchronous call over a [`Bus`](mmio::Bus), and all state lives in a
//! [`Console`](console::Console).
//!
//! The primitives are unchecked on purpose. An out-of-range index writes
//! wherever the address arithmetic lands, as it would on the hardware. The
//! `try_*` variants and the `checked` feature add bounds checks on top.
//!
//! Enable `sim` for [`sim::SimBus`], a memory-backed bus for tests and tools.

#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "sim"))]
extern crate alloc;

pub mod bios;
pub mod color;
pub mod console;
mod error;
pub mod input;
pub mod irq;
pub mod mmio;
pub mod scr;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod sram;
pub mod video;

pub use error::Error;
