//! JSON output rendering.

use serde_json::Value;

/// How drilled values are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Two-space indented output.
    #[default]
    Pretty,
    /// Single line.
    Compact,
}

impl OutputFormat {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            OutputFormat::Pretty
        } else {
            OutputFormat::Compact
        }
    }

    /// Serialize `value`. Object keys come out sorted.
    pub fn render(&self, value: &Value) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            OutputFormat::Pretty => serde_json::to_vec_pretty(value),
            OutputFormat::Compact => serde_json::to_vec(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_output_is_sorted_and_indented() {
        let out = OutputFormat::Pretty.render(&json!({"b": 1, "a": 2})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": 2,\n  \"b\": 1\n}");
    }

    #[test]
    fn test_pretty_string_stays_quoted() {
        let out = OutputFormat::Pretty.render(&json!("A17")).unwrap();
        assert_eq!(out, br#""A17""#);
    }
}
