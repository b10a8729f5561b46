use core::fmt;

/// A call the binding refused before it reached the hardware layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    UnknownModule(String),
    UnknownMethod {
        module: String,
        name: String,
    },
    Arity {
        method: &'static str,
        expected: usize,
        got: usize,
    },
    Type {
        method: &'static str,
        index: usize,
        expected: &'static str,
        got: &'static str,
    },
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModule(module) => write!(f, "uninitialized constant {}", module),
            Self::UnknownMethod { module, name } => {
                write!(f, "undefined method '{}' for {}", name, module)
            }
            Self::Arity { method, expected, got } => write!(
                f,
                "wrong number of arguments to {} (given {}, expected {})",
                method, got, expected,
            ),
            Self::Type { method, index, expected, got } => write!(
                f,
                "{}: argument {} must be {}, got {}",
                method, index, expected, got,
            ),
        }
    }
}

impl std::error::Error for CallError {}
