//! `SRAM`: battery-backed save memory, one byte at a time.

use log::debug;

use gba::{console::Console, mmio::Bus, sram};

use crate::{args::Args, error::CallError, host::Host, value::Value};

pub const SRAM: &str = "SRAM";

pub fn install<B: Bus, H: Host<B>>(host: &mut H) {
    host.define_module(SRAM);
    host.define_const(SRAM, "SIZE", sram::SRAM.count as i64);
    host.define_method(SRAM, "read_byte", 1, read_byte);
    host.define_method(SRAM, "write_byte", 2, write_byte);
    host.define_method(SRAM, "write_string", 2, write_string);
    debug!("sram bindings installed");
}

fn read_byte<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    let a = Args::new("read_byte", args, 1)?;
    Ok(sram::read_byte(&mut console.bus, a.usize(0)?).into())
}

fn write_byte<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    let a = Args::new("write_byte", args, 2)?;
    sram::write_byte(&mut console.bus, a.usize(0)?, a.u8(1)?);
    Ok(Value::Nil)
}

/// No length header is stored; the caller remembers how much was written.
fn write_string<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    let a = Args::new("write_string", args, 2)?;
    sram::write_bytes(&mut console.bus, a.usize(0)?, a.bytes(1)?);
    Ok(Value::Nil)
}
