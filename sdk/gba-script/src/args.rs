use crate::{error::CallError, value::Value};

/// Positional argument decoder for one call.
///
/// Integers convert to hardware widths with `as`, so negative or oversized
/// script values wrap exactly as they would in the C binding. Past this
/// point nothing is range-checked.
#[derive(Debug, Copy, Clone)]
pub struct Args<'a> {
    method: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(method: &'static str, values: &'a [Value], arity: usize) -> Result<Self, CallError> {
        if values.len() != arity {
            return Err(CallError::Arity { method, expected: arity, got: values.len() });
        }
        Ok(Self { method, values })
    }

    pub fn int(&self, index: usize) -> Result<i64, CallError> {
        match &self.values[index] {
            Value::Int(v) => Ok(*v),
            other => Err(self.type_error(index, "integer", other)),
        }
    }

    #[inline]
    pub fn usize(&self, index: usize) -> Result<usize, CallError> {
        self.int(index).map(|v| v as usize)
    }

    #[inline]
    pub fn u16(&self, index: usize) -> Result<u16, CallError> {
        self.int(index).map(|v| v as u16)
    }

    #[inline]
    pub fn u8(&self, index: usize) -> Result<u8, CallError> {
        self.int(index).map(|v| v as u8)
    }

    pub fn bytes(&self, index: usize) -> Result<&'a [u8], CallError> {
        match &self.values[index] {
            Value::Bytes(b) => Ok(b),
            other => Err(self.type_error(index, "string", other)),
        }
    }

    fn type_error(&self, index: usize, expected: &'static str, got: &Value) -> CallError {
        CallError::Type { method: self.method, index, expected, got: got.type_name() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_is_exact() {
        let vals = [Value::Int(1)];
        assert_eq!(
            Args::new("set_pixel", &vals, 3).unwrap_err(),
            CallError::Arity { method: "set_pixel", expected: 3, got: 1 }
        );
        assert!(Args::new("rgb5", &[], 0).is_ok());
    }

    #[test]
    fn types_are_checked_per_position() {
        let vals = [Value::Int(-1), Value::from("tile")];
        let args = Args::new("bg_write", &vals, 2).unwrap();
        assert_eq!(args.u16(0), Ok(0xFFFF));
        assert_eq!(args.bytes(1), Ok(&b"tile"[..]));
        assert_eq!(
            args.bytes(0),
            Err(CallError::Type { method: "bg_write", index: 0, expected: "string", got: "integer" })
        );
        assert!(args.int(1).is_err());
    }
}
