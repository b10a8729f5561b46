use gba::{console::Console, mmio::Bus};

use crate::{error::CallError, value::Value};

/// A bound operation. Receives the console and the raw script arguments.
pub type Method<B> = fn(&mut Console<B>, &[Value]) -> Result<Value, CallError>;

/// What a script runtime provides to receive the bindings.
///
/// Module paths use `::` for nesting (`"Video::OBJ"`); a host should create a
/// module the first time anything is defined under it.
pub trait Host<B: Bus> {
    fn define_module(&mut self, path: &'static str);
    fn define_const(&mut self, module: &'static str, name: &'static str, value: i64);
    fn define_method(&mut self, module: &'static str, name: &'static str, arity: usize, method: Method<B>);
}
