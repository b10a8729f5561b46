//! `Input`: keypad polling and edge queries.

use log::debug;

use gba::{console::Console, input::Keys, mmio::Bus};

use crate::{args::Args, error::CallError, host::Host, value::Value};

pub const INPUT: &str = "Input";

const KEYS: &[(&str, Keys)] = &[
    ("KEY_A", Keys::A),
    ("KEY_B", Keys::B),
    ("KEY_SELECT", Keys::SELECT),
    ("KEY_START", Keys::START),
    ("KEY_RIGHT", Keys::RIGHT),
    ("KEY_LEFT", Keys::LEFT),
    ("KEY_UP", Keys::UP),
    ("KEY_DOWN", Keys::DOWN),
    ("KEY_R", Keys::R),
    ("KEY_L", Keys::L),
    ("DPAD", Keys::DPAD),
];

pub fn install<B: Bus, H: Host<B>>(host: &mut H) {
    host.define_module(INPUT);
    for &(name, keys) in KEYS {
        host.define_const(INPUT, name, keys.bits() as i64);
    }
    host.define_method(INPUT, "update", 0, update);
    host.define_method(INPUT, "keys_down", 0, keys_down);
    host.define_method(INPUT, "keys_up", 0, keys_up);
    host.define_method(INPUT, "keys_held", 0, keys_held);
    host.define_method(INPUT, "keys_down_repeat", 0, keys_down_repeat);
    debug!("input bindings installed");
}

fn update<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("update", args, 0)?;
    console.keypad.scan(&mut console.bus);
    Ok(Value::Nil)
}

fn keys_down<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("keys_down", args, 0)?;
    Ok(console.keypad.down().bits().into())
}

fn keys_up<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("keys_up", args, 0)?;
    Ok(console.keypad.up().bits().into())
}

fn keys_held<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("keys_held", args, 0)?;
    Ok(console.keypad.held().bits().into())
}

fn keys_down_repeat<B: Bus>(console: &mut Console<B>, args: &[Value]) -> Result<Value, CallError> {
    Args::new("keys_down_repeat", args, 0)?;
    Ok(console.keypad.down_repeat().bits().into())
}
