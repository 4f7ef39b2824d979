use serde_json::{Map, Value};

use super::ToolError;

/// Argument bag of one tool call.
///
/// Optional strings treat `null` and blank values as absent, so empty
/// filters never reach the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    inner: Map<String, Value>,
}

fn invalid(key: &str, reason: &str) -> ToolError {
    ToolError::InvalidArgument {
        name: key.to_string(),
        reason: reason.to_string(),
    }
}

impl ToolArgs {
    pub fn new(inner: Map<String, Value>) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.inner
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.inner
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.inner.get(key).filter(|v| !v.is_null())
    }

    fn require(&self, key: &str) -> Result<&Value, ToolError> {
        self.present(key)
            .ok_or_else(|| ToolError::MissingArgument(key.to_string()))
    }

    pub fn required_str(&self, key: &str) -> Result<&str, ToolError> {
        match self.require(key)? {
            Value::String(s) if !s.trim().is_empty() => Ok(s),
            Value::String(_) => Err(invalid(key, "must not be empty")),
            _ => Err(invalid(key, "must be a string")),
        }
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&str>, ToolError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(key, "must be a string")),
        }
    }

    pub fn optional_u64(&self, key: &str) -> Result<Option<u64>, ToolError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| invalid(key, "must be an unsigned integer")),
            // Hosts sometimes send numbers as strings
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| invalid(key, "must be an unsigned integer")),
            Some(_) => Err(invalid(key, "must be an unsigned integer")),
        }
    }

    pub fn required_u64(&self, key: &str) -> Result<u64, ToolError> {
        self.optional_u64(key)?
            .ok_or_else(|| ToolError::MissingArgument(key.to_string()))
    }

    pub fn required_i64(&self, key: &str) -> Result<i64, ToolError> {
        match self.require(key)? {
            Value::Number(n) => n.as_i64().ok_or_else(|| invalid(key, "must be an integer")),
            Value::String(s) => s.trim().parse().map_err(|_| invalid(key, "must be an integer")),
            _ => Err(invalid(key, "must be an integer")),
        }
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>, ToolError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(invalid(key, "must be a boolean")),
            },
            Some(_) => Err(invalid(key, "must be a boolean")),
        }
    }

    pub fn required_bool(&self, key: &str) -> Result<bool, ToolError> {
        self.optional_bool(key)?
            .ok_or_else(|| ToolError::MissingArgument(key.to_string()))
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ToolError> {
        Ok(self.optional_bool(key)?.unwrap_or(default))
    }

    /// A JSON object argument, passed through unchanged.
    pub fn required_object(&self, key: &str) -> Result<Value, ToolError> {
        match self.require(key)? {
            v @ Value::Object(_) => Ok(v.clone()),
            _ => Err(invalid(key, "must be an object")),
        }
    }

    /// A JSON array argument, passed through unchanged.
    pub fn required_array(&self, key: &str) -> Result<Value, ToolError> {
        match self.require(key)? {
            v @ Value::Array(_) => Ok(v.clone()),
            _ => Err(invalid(key, "must be an array")),
        }
    }

    pub fn optional_array(&self, key: &str) -> Result<Option<Value>, ToolError> {
        match self.present(key) {
            None => Ok(None),
            Some(v @ Value::Array(_)) => Ok(Some(v.clone())),
            Some(_) => Err(invalid(key, "must be an array")),
        }
    }

    /// Identifier list given either as an array of strings or as one
    /// comma-separated string.
    pub fn id_list(&self, key: &str) -> Result<Vec<String>, ToolError> {
        let ids: Vec<String> = match self.require(key)? {
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.trim().to_string()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(invalid(key, "must be an array of strings")),
                })
                .collect::<Result<_, _>>()?,
            _ => return Err(invalid(key, "must be an array of strings")),
        };
        if ids.is_empty() {
            return Err(invalid(key, "must contain at least one id"));
        }
        Ok(ids)
    }

    /// Integer list given as an array (numbers or numeric strings).
    pub fn i64_list(&self, key: &str) -> Result<Vec<i64>, ToolError> {
        match self.require(key)? {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                })
                .map(|v| v.ok_or_else(|| invalid(key, "must be an array of integers")))
                .collect(),
            _ => Err(invalid(key, "must be an array of integers")),
        }
    }
}

impl From<Map<String, Value>> for ToolArgs {
    fn from(inner: Map<String, Value>) -> Self {
        Self::new(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        match value {
            Value::Object(map) => ToolArgs::new(map),
            _ => panic!("test args must be an object"),
        }
    }

    #[test]
    fn test_required_str() {
        let a = args(json!({"facility_id": "NODE1", "blank": " ", "num": 3}));
        assert_eq!(a.required_str("facility_id").unwrap(), "NODE1");
        assert!(matches!(a.required_str("missing"), Err(ToolError::MissingArgument(k)) if k == "missing"));
        assert!(matches!(a.required_str("blank"), Err(ToolError::InvalidArgument { .. })));
        assert!(matches!(a.required_str("num"), Err(ToolError::InvalidArgument { .. })));
    }

    #[test]
    fn test_optional_str_treats_blank_and_null_as_absent() {
        let a = args(json!({"a": "", "b": null, "c": "ADMINISTRATORS"}));
        assert_eq!(a.optional_str("a").unwrap(), None);
        assert_eq!(a.optional_str("b").unwrap(), None);
        assert_eq!(a.optional_str("c").unwrap(), Some("ADMINISTRATORS"));
        assert_eq!(a.optional_str("d").unwrap(), None);
    }

    #[test]
    fn test_numbers_accept_numeric_strings() {
        let a = args(json!({"size": 10, "s": "25", "neg": -1, "year": "2024"}));
        assert_eq!(a.optional_u64("size").unwrap(), Some(10));
        assert_eq!(a.optional_u64("s").unwrap(), Some(25));
        assert!(a.optional_u64("neg").is_err());
        assert_eq!(a.required_i64("year").unwrap(), 2024);
        assert_eq!(a.required_i64("neg").unwrap(), -1);
    }

    #[test]
    fn test_bools() {
        let a = args(json!({"t": true, "s": "false", "bad": 1}));
        assert!(a.required_bool("t").unwrap());
        assert_eq!(a.optional_bool("s").unwrap(), Some(false));
        assert!(a.optional_bool("bad").is_err());
        assert!(a.bool_or("missing", true).unwrap());
    }

    #[test]
    fn test_id_list_forms() {
        let a = args(json!({
            "arr": ["NODE001", "NODE002"],
            "csv": "K1, K2,K3",
            "empty": [],
            "bad": [{"x": 1}]
        }));
        assert_eq!(a.id_list("arr").unwrap(), vec!["NODE001", "NODE002"]);
        assert_eq!(a.id_list("csv").unwrap(), vec!["K1", "K2", "K3"]);
        assert!(a.id_list("empty").is_err());
        assert!(a.id_list("bad").is_err());
    }

    #[test]
    fn test_object_and_array() {
        let a = args(json!({"o": {"k": 1}, "l": [1, 2]}));
        assert_eq!(a.required_object("o").unwrap(), json!({"k": 1}));
        assert!(a.required_object("l").is_err());
        assert_eq!(a.required_array("l").unwrap(), json!([1, 2]));
        assert_eq!(a.optional_array("missing").unwrap(), None);
        assert_eq!(a.i64_list("l").unwrap(), vec![1, 2]);
    }
}
