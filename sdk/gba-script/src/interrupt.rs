//! `Interrupt`: controller setup and the dispatcher.
//!
//! Scripts cannot install handlers (those are Rust `fn()`s set through
//! [`Interrupts::set_handler`](gba::irq::Interrupts::set_handler)); they can
//! enable sources and run `intr_main`, which acknowledges whatever is pending.

use log::debug;

use gba::{console::Console, irq::IrqFlags, mmio::Bus};

use crate::{args::Args, error::CallError, host::Host, value::Value};

pub const INTERRUPT: &str = "Interrupt";

const SOURCES: &[(&str, IrqFlags)] = &[
    ("IRQ_VBLANK", IrqFlags::VBLANK),
    ("IRQ_HBLANK", IrqFlags::HBLANK),
    ("IRQ_VCOUNT", IrqFlags::VCOUNT),
    ("IRQ_TIMER0", IrqFlags::TIMER0),
    ("IRQ_TIMER1", IrqFlags::TIMER1),
    ("IRQ_TIMER2", IrqFlags::TIMER2),
    ("IRQ_TIMER3", IrqFlags::TIMER3),
    ("IRQ_SERIAL", IrqFlags::SERIAL),
    ("IRQ_DMA0", IrqFlags::DMA0),
    ("IRQ_DMA1", IrqFlags::DMA1),
    ("IRQ_DMA2", IrqFlags::DMA2),
    ("IRQ_DMA3", IrqFlags::DMA3),
    ("IRQ_KEYPAD", IrqFlags::KEYPAD),
    ("IRQ_GAMEPAK", IrqFlags::GAMEPAK),
];

pub fn install<B: Bus, H: Host<B>>(host: &mut H) {
    host.define_module(INTERRUPT);
    for &(name, flag) in SOURCES {
        host.define_const(INTERRUPT, name, flag.bits() as i64);
    }
    host.define_method(INTERRUPT, "irq_init", 0, irq_init);
    host.define_method(INTERRUPT, "irq_enable", 1, irq_enable);
    host.define_method(INTERRUPT, "irq_disable", 1, irq_disable);
    host.define_method(INTERRUPT, "intr_main", 0, intr_main);
    debug!("interrupt bindings installed");
}

fn irq_init<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("irq_init", args, 0)?;
    console.irq.init(&mut console.bus);
    Ok(Value::Nil)
}

fn irq_enable<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    let a = Args::new("irq_enable", args, 1)?;
    let mask = IrqFlags::from_bits_truncate(a.u16(0)?);
    console.irq.enable(&mut console.bus, mask);
    Ok(Value::Nil)
}

fn irq_disable<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    let a = Args::new("irq_disable", args, 1)?;
    let mask = IrqFlags::from_bits_truncate(a.u16(0)?);
    console.irq.disable(&mut console.bus, mask);
    Ok(Value::Nil)
}

/// Returns the source that was served, or 0 when nothing was pending.
fn intr_main<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("intr_main", args, 0)?;
    let served = console.irq.dispatch(&mut console.bus);
    Ok(served.map_or(0, |f| f.bits()).into())
}
