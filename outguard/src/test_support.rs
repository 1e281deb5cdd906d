//! Test-only fixtures for schemas, results, and execution records.

use serde_json::{Value, json};

use crate::core::types::{ActionSpec, ExecutionRecord, RunnerSpec};

/// Output key used by every fixture runner.
pub const OUTPUT_KEY: &str = "output";

/// Envelope schema: an `output` object plus an `error` channel, nothing else.
pub fn runner_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "output": { "type": "object" },
            "error": { "type": "array" },
        },
        "additionalProperties": false,
    })
}

/// Action schema matching [`action_result`], no secrets.
pub fn action_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "output_1": { "type": "string" },
            "output_2": { "type": "integer" },
            "output_3": { "type": "string" },
            "deep_output": {
                "type": "object",
                "properties": {
                    "deep_item_1": { "type": "string" },
                },
            },
        },
        "additionalProperties": false,
    })
}

/// Same as [`action_output_schema`] with `output_3` marked secret.
pub fn action_output_schema_with_secret() -> Value {
    let mut schema = action_output_schema();
    schema["properties"]["output_3"] = json!({ "type": "string", "secret": true });
    schema
}

/// Schema that rejects any realistic result via `additionalProperties`.
pub fn failing_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "not_a_key_you_have": { "type": "string" },
        },
        "additionalProperties": false,
    })
}

/// Canonical conforming result for the fixture schemas.
pub fn action_result() -> Value {
    json!({
        "output": {
            "output_1": "Bobby",
            "output_2": 5,
            "output_3": "shhh!",
            "deep_output": {
                "deep_item_1": "Jindal",
            },
        }
    })
}

/// Execution record with the given action output schema and the fixture
/// runner (output key + envelope schema).
pub fn execution(action_output_schema: Value) -> ExecutionRecord {
    ExecutionRecord {
        action: ActionSpec {
            output_schema: action_output_schema,
        },
        runner: RunnerSpec {
            output_key: OUTPUT_KEY.to_string(),
            output_schema: runner_output_schema(),
        },
    }
}
