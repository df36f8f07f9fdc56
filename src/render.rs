//! Human-readable rendering of operation results.

use crate::bytes;
use crate::executor::ResultHandler;
use crate::value::Value;
use std::io::Write;

/// Renders a value as a recursive human-readable dump.
///
/// `Unit` prints as `null`, byte arrays as uppercase hex, lists bracketed and
/// comma-joined.
pub fn to_full_string(value: &Value) -> String {
    match value {
        Value::Unit => "null".to_string(),
        Value::Integer(value) => value.to_string(),
        Value::Float(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Str(value) => value.clone(),
        Value::Bytes(value) => bytes::to_hex_string(value),
        Value::List(items) => format!("[{}]", items.join(", ")),
    }
}

/// The default result handler: writes the rendered value and a newline to the
/// shell output.
pub fn default_result_handler() -> ResultHandler {
    Box::new(|output, value| {
        writeln!(output, "{}", to_full_string(value))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::to_full_string;
    use crate::value::Value;

    #[test]
    fn test_scalars() {
        assert_eq!(to_full_string(&Value::Integer(5)), "5");
        assert_eq!(to_full_string(&Value::Float(2.5)), "2.5");
        assert_eq!(to_full_string(&Value::Bool(true)), "true");
        assert_eq!(to_full_string(&Value::Str("plain".to_string())), "plain");
        assert_eq!(to_full_string(&Value::Unit), "null");
    }

    #[test]
    fn test_bytes_render_as_uppercase_hex() {
        assert_eq!(to_full_string(&Value::Bytes(vec![0xDE, 0xAD])), "DEAD");
    }

    #[test]
    fn test_lists_are_bracketed() {
        let list = Value::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(to_full_string(&list), "[a, b]");
        assert_eq!(to_full_string(&Value::List(Vec::new())), "[]");
    }
}
