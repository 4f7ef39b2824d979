//! Builder for tool input schemas (JSON Schema subset used by MCP hosts).

use serde_json::{json, Map, Value};

#[derive(Debug, Default)]
pub struct Schema {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl Schema {
    pub fn object() -> Self {
        Self::default()
    }

    fn prop(mut self, name: &str, mut spec: Value, description: &str) -> Self {
        spec["description"] = Value::String(description.to_string());
        self.properties.insert(name.to_string(), spec);
        self
    }

    pub fn string(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "string"}), description)
    }

    pub fn integer(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "integer"}), description)
    }

    pub fn boolean(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "boolean"}), description)
    }

    pub fn json_object(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "object"}), description)
    }

    pub fn string_array(self, name: &str, description: &str) -> Self {
        self.prop(
            name,
            json!({"type": "array", "items": {"type": "string"}}),
            description,
        )
    }

    pub fn integer_array(self, name: &str, description: &str) -> Self {
        self.prop(
            name,
            json!({"type": "array", "items": {"type": "integer"}}),
            description,
        )
    }

    pub fn object_array(self, name: &str, description: &str) -> Self {
        self.prop(
            name,
            json!({"type": "array", "items": {"type": "object"}}),
            description,
        )
    }

    pub fn required(mut self, names: &[&str]) -> Self {
        self.required.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn build(self) -> Value {
        let mut schema = json!({
            "type": "object",
            "properties": Value::Object(self.properties),
        });
        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }
        schema
    }
}
