use core::fmt;

/// Returned by the `try_*` checked variants. The primary primitives never fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    IndexOutOfRange {
        region: &'static str,
        index: usize,
        len: usize,
    },
    Overrun {
        region: &'static str,
        offset: usize,
        len: usize,
        capacity: usize,
    },
    InvalidField(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { region, index, len } => {
                write!(f, "{} index {} out of range (len {})", region, index, len)
            }
            Self::Overrun { region, offset, len, capacity } => write!(
                f,
                "{} write of {} bytes at offset {:#x} overruns {:#x}-byte region",
                region, len, offset, capacity,
            ),
            Self::InvalidField(field) => write!(f, "attribute field {} is not 0, 1 or 2", field),
        }
    }
}

impl core::error::Error for Error {}
