use std::collections::HashMap;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info};

use gba::{console::Console, sim::SimBus};
use gba_script::{Registry, Value};

use crate::script::{Arg, Stmt, Term};

/// A console on the simulated bus with every binding installed.
pub struct Interp {
    pub registry: Registry<SimBus>,
    pub console: Console<SimBus>,
    vars: HashMap<String, Value>,
}

impl Default for Interp {
    fn default() -> Self {
        Self::new()
    }
}

impl Interp {
    pub fn new() -> Self {
        let mut registry = Registry::new();
        let mut console = Console::new(SimBus::new());
        gba_script::install_all(&mut registry, &mut console);
        Self { registry, console, vars: HashMap::new() }
    }

    #[cfg(test)]
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Run statements in order, stopping at the first failure.
    ///
    /// Returns the results of unbound calls that produced a value, with the
    /// line they came from.
    pub fn run(&mut self, stmts: &[Stmt]) -> Result<Vec<(usize, Value)>> {
        let mut echoed = Vec::new();
        for stmt in stmts {
            let value = self
                .exec(stmt)
                .with_context(|| format!("line {}: {}.{}", stmt.line, stmt.module, stmt.method))?;
            match &stmt.bind {
                Some(name) => {
                    debug!("{} = {}", name, value);
                    self.vars.insert(name.clone(), value);
                }
                None if value != Value::Nil => echoed.push((stmt.line, value)),
                None => {}
            }
        }
        info!("{} statements, {} frames waited", stmts.len(), self.console.bus.frames);
        Ok(echoed)
    }

    fn exec(&mut self, stmt: &Stmt) -> Result<Value> {
        let args = stmt
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.eval(arg).with_context(|| format!("argument {}", i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.registry.call(&mut self.console, &stmt.module, &stmt.method, &args)?)
    }

    fn eval(&self, arg: &Arg) -> Result<Value> {
        if let [single] = arg.0.as_slice() {
            return self.term(single);
        }
        let mut acc = 0i64;
        for term in &arg.0 {
            match self.term(term)? {
                Value::Int(v) => acc |= v,
                other => bail!("cannot '|' a {}", other.type_name()),
            }
        }
        Ok(Value::Int(acc))
    }

    fn term(&self, term: &Term) -> Result<Value> {
        Ok(match term {
            Term::Int(v) => Value::Int(*v),
            Term::Str(s) => Value::Bytes(s.clone()),
            Term::Var(name) => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow!("undefined variable ${}", name))?,
            Term::Const { module, name } => self
                .registry
                .constant(module, name)
                .map(Value::Int)
                .ok_or_else(|| anyhow!("uninitialized constant {}::{}", module, name))?,
        })
    }
}
