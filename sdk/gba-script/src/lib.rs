//! Script-host bindings for the [`gba`] hardware layer.
//!
//! Each subsystem exposes an `install` entry point that defines one namespace
//! of integer constants and methods on a [`Host`]. Methods check argument
//! count and type, then forward to the unchecked hardware primitives on the
//! shared [`Console`](gba::console::Console).
//!
//! ```ignore
//! let mut console = Console::new(SimBus::new());
//! let mut registry = Registry::new();
//! gba_script::install_all(&mut registry, &mut console);
//!
//! let red = registry.call(&mut console, "Video", "rgb5", &[Value::Int(31), Value::Int(0), Value::Int(0)])?;
//! registry.call(&mut console, "Video::Palette", "bg_set", &[Value::Int(0), red])?;
//! ```

pub mod args;
pub mod error;
pub mod host;
pub mod input;
pub mod interrupt;
pub mod registry;
pub mod sram;
pub mod systemcalls;
pub mod value;
pub mod video;

use gba::{console::Console, mmio::Bus};

pub use error::CallError;
pub use host::{Host, Method};
pub use registry::Registry;
pub use value::Value;

pub fn install_all<B: Bus, H: Host<B>>(host: &mut H, console: &mut Console<B>) {
    input::install(host);
    video::install(host, console);
    interrupt::install(host);
    systemcalls::install(host);
    sram::install(host);
}
