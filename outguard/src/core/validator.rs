//! Layered output validation for completed action executions.
//!
//! A result is checked against the runner's envelope schema first, then the
//! value under the output key is checked against the action's own schema.
//! Violations never raise: they become an error payload plus a `failed`
//! status so callers can persist the execution with its diagnostic.

use jsonschema::Draft;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::core::types::ExecutionStatus;

/// Message attached to every validation-failure payload.
pub const VALIDATION_FAILED_MESSAGE: &str =
    "Error validating output. See error output for more details.";

/// Validate `result` against the runner envelope schema, then the value at
/// `output_key` against the action schema.
///
/// On success both `result` and `status` come back unmodified (the result is
/// moved through, not rebuilt). On the first violation the result is replaced
/// by a two-key `{error, message}` payload and the status transitions to
/// [`ExecutionStatus::Failed`]; the second layer is not consulted after the
/// envelope check fails.
pub fn validate_output(
    runner_schema: &Value,
    action_schema: &Value,
    result: Value,
    status: ExecutionStatus,
    output_key: &str,
) -> (Value, ExecutionStatus) {
    debug!(output_key, "validating action output");

    if let Err(diagnostic) = check_instance(runner_schema, &result) {
        warn!("runner output schema violated");
        return (error_payload(diagnostic), ExecutionStatus::Failed);
    }

    let content = match result.get(output_key) {
        Some(content) => content,
        None => {
            warn!(output_key, "result has no output key to validate");
            return (
                error_payload(format!("result has no '{output_key}' key to validate")),
                ExecutionStatus::Failed,
            );
        }
    };
    if let Err(diagnostic) = check_instance(action_schema, content) {
        warn!("action output schema violated");
        return (error_payload(diagnostic), ExecutionStatus::Failed);
    }

    (result, status)
}

/// Validate one instance against one schema (Draft 2020-12).
///
/// Returns the engine's first diagnostic, rendered together with the
/// offending schema and the serialized instance. Which violation is reported
/// first when several exist at once is up to the engine; callers should only
/// match on a known violation as a substring.
fn check_instance(schema: &Value, instance: &Value) -> Result<(), String> {
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| format!("invalid schema: {err}"))?;

    match compiled.iter_errors(instance).next() {
        None => Ok(()),
        Some(violation) => Err(render_diagnostic(&violation.to_string(), schema, instance)),
    }
}

fn render_diagnostic(message: &str, schema: &Value, instance: &Value) -> String {
    format!(
        "{message}\n\nFailed validating output in schema:\n{schema}\n\nOn instance:\n{instance}",
        schema = pretty(schema),
        instance = pretty(instance),
    )
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn error_payload(diagnostic: String) -> Value {
    json!({ "error": diagnostic, "message": VALIDATION_FAILED_MESSAGE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        OUTPUT_KEY, action_output_schema, action_result, failing_output_schema,
        runner_output_schema,
    };

    fn assert_error_payload(result: &Value, violation: &str) {
        let payload = result.as_object().expect("payload object");
        assert_eq!(payload.len(), 2, "payload must carry exactly two keys");
        assert_eq!(payload["message"], VALIDATION_FAILED_MESSAGE);
        let error = payload["error"].as_str().expect("error string");
        assert!(
            error.contains(violation),
            "diagnostic missing '{violation}': {error}"
        );
    }

    #[test]
    fn conforming_result_passes_through_unchanged() {
        let (result, status) = validate_output(
            &runner_output_schema(),
            &action_output_schema(),
            action_result(),
            ExecutionStatus::Succeeded,
            OUTPUT_KEY,
        );

        assert_eq!(result, action_result());
        assert_eq!(status, ExecutionStatus::Succeeded);
    }

    /// Non-succeeded statuses also pass through untouched; the validator only
    /// ever transitions toward failed.
    #[test]
    fn conforming_result_preserves_arbitrary_status() {
        let (_, status) = validate_output(
            &runner_output_schema(),
            &action_output_schema(),
            action_result(),
            ExecutionStatus::TimedOut,
            OUTPUT_KEY,
        );

        assert_eq!(status, ExecutionStatus::TimedOut);
    }

    #[test]
    fn runner_schema_violation_fails_before_action_schema() {
        // The action schema would accept this result's output; the envelope
        // violation must win regardless.
        let (result, status) = validate_output(
            &failing_output_schema(),
            &action_output_schema(),
            action_result(),
            ExecutionStatus::Succeeded,
            OUTPUT_KEY,
        );

        assert_error_payload(&result, "Additional properties are not allowed");
        assert_eq!(status, ExecutionStatus::Failed);
    }

    #[test]
    fn action_schema_violation_fails_with_same_payload_shape() {
        let (result, status) = validate_output(
            &runner_output_schema(),
            &failing_output_schema(),
            action_result(),
            ExecutionStatus::Succeeded,
            OUTPUT_KEY,
        );

        assert_error_payload(&result, "Additional properties are not allowed");
        assert_eq!(status, ExecutionStatus::Failed);
    }

    #[test]
    fn diagnostic_includes_schema_and_instance_renderings() {
        let (result, _) = validate_output(
            &failing_output_schema(),
            &action_output_schema(),
            action_result(),
            ExecutionStatus::Succeeded,
            OUTPUT_KEY,
        );

        let error = result["error"].as_str().expect("error string");
        assert!(error.contains("Failed validating output in schema:"));
        assert!(error.contains("not_a_key_you_have"));
        assert!(error.contains("On instance:"));
        assert!(error.contains("Bobby"));
    }

    #[test]
    fn missing_output_key_fails_content_check() {
        let runner_schema = serde_json::json!({ "type": "object" });
        let (result, status) = validate_output(
            &runner_schema,
            &action_output_schema(),
            serde_json::json!({ "stdout": "done" }),
            ExecutionStatus::Succeeded,
            OUTPUT_KEY,
        );

        assert_error_payload(&result, "result has no 'output' key");
        assert_eq!(status, ExecutionStatus::Failed);
    }

    #[test]
    fn type_violation_reports_engine_message() {
        let runner_schema = serde_json::json!({ "type": "object" });
        let action_schema = serde_json::json!({ "type": "string" });
        let (result, status) = validate_output(
            &runner_schema,
            &action_schema,
            serde_json::json!({ "output": 5 }),
            ExecutionStatus::Succeeded,
            OUTPUT_KEY,
        );

        assert_error_payload(&result, "is not of type");
        assert_eq!(status, ExecutionStatus::Failed);
    }

    #[test]
    fn uncompilable_schema_becomes_error_payload() {
        let broken = serde_json::json!({ "type": "not-a-real-type" });
        let (result, status) = validate_output(
            &broken,
            &action_output_schema(),
            action_result(),
            ExecutionStatus::Succeeded,
            OUTPUT_KEY,
        );

        assert_error_payload(&result, "invalid schema");
        assert_eq!(status, ExecutionStatus::Failed);
    }
}
