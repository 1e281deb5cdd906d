//! Schema-guided masking of secret fields in execution results.
//!
//! Masking is defense-in-depth over results that were already computed and
//! validated: any shape that cannot be interpreted safely (malformed schema,
//! missing output key, schema/value mismatch) leaves the result untouched
//! rather than failing the pipeline.

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::schema::{SchemaShape, classify};
use crate::core::types::{ExecutionRecord, MASKED_OUTPUT_VALUE};

/// Replace every schema-marked secret in `result` with
/// [`MASKED_OUTPUT_VALUE`].
///
/// Reads `execution.action.output_schema` and `execution.runner.output_key`.
/// Returns a freshly built value; the caller's `result` is never mutated.
/// No-op paths return a structural clone of the input.
pub fn mask_secret_output(execution: &ExecutionRecord, result: &Value) -> Value {
    let fields = match result.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return result.clone(),
    };

    let root = match classify(&execution.action.output_schema) {
        SchemaShape::WellFormed(root) => root,
        SchemaShape::Malformed => return result.clone(),
    };

    let output_key = execution.runner.output_key.as_str();
    let Some(output) = fields.get(output_key) else {
        return result.clone();
    };

    // A secret root masks the whole output regardless of its runtime shape.
    if root.secret {
        debug!(output_key, "masking entire output");
        return with_output(fields, output_key, masked());
    }

    if let (true, Some(properties), Value::Object(nested)) =
        (root.is_object(), root.properties, output)
    {
        return with_output(
            fields,
            output_key,
            Value::Object(mask_properties(properties, nested)),
        );
    }

    // Schema and value disagree on shape; skip rather than fail.
    result.clone()
}

/// Walk schema properties and the value map in parallel, masking every
/// property whose descriptor classifies well-formed with `secret = true`.
/// Value keys without a schema entry pass through unchanged; sensitivity is
/// never inferred.
fn mask_properties(
    properties: &Map<String, Value>,
    fields: &Map<String, Value>,
) -> Map<String, Value> {
    let mut result = fields.clone();
    for (name, descriptor) in properties {
        let Some(slot) = result.get_mut(name) else {
            continue;
        };
        let SchemaShape::WellFormed(shape) = classify(descriptor) else {
            continue;
        };
        if shape.secret {
            *slot = masked();
        } else if let (true, Some(nested), Value::Object(inner)) =
            (shape.is_object(), shape.properties, &*slot)
        {
            *slot = Value::Object(mask_properties(nested, inner));
        }
    }
    result
}

fn with_output(fields: &Map<String, Value>, output_key: &str, output: Value) -> Value {
    let mut result = fields.clone();
    result.insert(output_key.to_string(), output);
    Value::Object(result)
}

fn masked() -> Value {
    Value::String(MASKED_OUTPUT_VALUE.to_string())
}
