//! Schema-shape classification shared by masking and the CLI.
//!
//! Malformedness is decided once per schema node; downstream logic
//! dispatches on the resulting tag instead of re-inspecting shape during
//! recursion.

use serde_json::{Map, Value};

/// Tagged result of classifying one schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaShape<'a> {
    /// A recognizable `type`-wrapped schema object.
    WellFormed(WellFormedSchema<'a>),
    /// Anything else: a non-object descriptor (e.g. a bare `"bool"`), an
    /// object without `type` (including `{}` and the legacy flat-properties
    /// shape), or a non-string `type`.
    Malformed,
}

/// Fields of a well-formed schema node.
///
/// `properties` is captured only when the `properties` key is itself a JSON
/// object; descriptors inside it are classified lazily as the walk reaches
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellFormedSchema<'a> {
    pub type_name: &'a str,
    pub properties: Option<&'a Map<String, Value>>,
    pub secret: bool,
    pub additional_properties: Option<bool>,
}

impl WellFormedSchema<'_> {
    /// True for `type: object` nodes, the only shape the field walk descends
    /// into.
    pub fn is_object(&self) -> bool {
        self.type_name == "object"
    }
}

/// Classify one schema node as well-formed or malformed.
pub fn classify(schema: &Value) -> SchemaShape<'_> {
    let Some(object) = schema.as_object() else {
        return SchemaShape::Malformed;
    };
    let Some(type_name) = object.get("type").and_then(Value::as_str) else {
        return SchemaShape::Malformed;
    };

    SchemaShape::WellFormed(WellFormedSchema {
        type_name,
        properties: object.get("properties").and_then(Value::as_object),
        secret: object.get("secret").and_then(Value::as_bool).unwrap_or(false),
        additional_properties: object.get("additionalProperties").and_then(Value::as_bool),
    })
}
