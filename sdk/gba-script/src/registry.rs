use indexmap::IndexMap;
use log::trace;

use gba::{console::Console, mmio::Bus};

use crate::{
    error::CallError,
    host::{Host, Method},
    value::Value,
};

pub struct Entry<B: Bus> {
    pub arity: usize,
    pub method: Method<B>,
}

pub struct Namespace<B: Bus> {
    pub constants: IndexMap<&'static str, i64>,
    pub methods: IndexMap<&'static str, Entry<B>>,
}

impl<B: Bus> Default for Namespace<B> {
    fn default() -> Self {
        Self { constants: IndexMap::new(), methods: IndexMap::new() }
    }
}

/// Table-driven host: keeps what the bindings define, in definition order,
/// and dispatches calls by module path and method name.
pub struct Registry<B: Bus> {
    modules: IndexMap<&'static str, Namespace<B>>,
}

impl<B: Bus> Default for Registry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bus> Registry<B> {
    pub fn new() -> Self {
        Self { modules: IndexMap::new() }
    }

    pub fn modules(&self) -> impl Iterator<Item = (&'static str, &Namespace<B>)> {
        self.modules.iter().map(|(path, ns)| (*path, ns))
    }

    pub fn namespace(&self, module: &str) -> Option<&Namespace<B>> {
        self.modules.get(module)
    }

    pub fn constant(&self, module: &str, name: &str) -> Option<i64> {
        self.modules.get(module)?.constants.get(name).copied()
    }

    pub fn call(
        &self,
        console: &mut Console<B>,
        module: &str,
        name: &str,
        args: &[Value],
    ) -> Result<Value, CallError> {
        let ns = self
            .modules
            .get(module)
            .ok_or_else(|| CallError::UnknownModule(module.to_string()))?;
        let (method, entry) = ns.methods.get_key_value(name).ok_or_else(|| CallError::UnknownMethod {
            module: module.to_string(),
            name: name.to_string(),
        })?;

        if args.len() != entry.arity {
            return Err(CallError::Arity { method, expected: entry.arity, got: args.len() });
        }

        trace!("{}.{}({} args)", module, method, args.len());
        (entry.method)(console, args)
    }

    fn entry(&mut self, module: &'static str) -> &mut Namespace<B> {
        self.modules.entry(module).or_default()
    }
}

impl<B: Bus> Host<B> for Registry<B> {
    fn define_module(&mut self, path: &'static str) {
        self.entry(path);
    }

    fn define_const(&mut self, module: &'static str, name: &'static str, value: i64) {
        self.entry(module).constants.insert(name, value);
    }

    fn define_method(&mut self, module: &'static str, name: &'static str, arity: usize, method: Method<B>) {
        self.entry(module).methods.insert(name, Entry { arity, method });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gba::sim::SimBus;

    fn answer(_: &mut Console<SimBus>, _: &[Value]) -> Result<Value, CallError> {
        Ok(Value::Int(42))
    }

    #[test]
    fn dispatch_by_path() {
        let mut reg = Registry::<SimBus>::new();
        reg.define_module("Video::OBJ");
        reg.define_const("Video::OBJ", "ATTR0_DISABLED", 0x200);
        reg.define_method("Video::OBJ", "answer", 0, answer);

        let mut console = Console::new(SimBus::new());
        assert_eq!(reg.call(&mut console, "Video::OBJ", "answer", &[]), Ok(Value::Int(42)));
        assert_eq!(reg.constant("Video::OBJ", "ATTR0_DISABLED"), Some(0x200));
        assert_eq!(reg.constant("Video", "ATTR0_DISABLED"), None);
    }

    #[test]
    fn rejects_before_calling() {
        let mut reg = Registry::<SimBus>::new();
        reg.define_method("Input", "answer", 0, answer);
        let mut console = Console::new(SimBus::new());

        assert!(matches!(
            reg.call(&mut console, "Nope", "answer", &[]),
            Err(CallError::UnknownModule(_))
        ));
        assert!(matches!(
            reg.call(&mut console, "Input", "nope", &[]),
            Err(CallError::UnknownMethod { .. })
        ));
        assert_eq!(
            reg.call(&mut console, "Input", "answer", &[Value::Nil]),
            Err(CallError::Arity { method: "answer", expected: 0, got: 1 })
        );
    }
}
