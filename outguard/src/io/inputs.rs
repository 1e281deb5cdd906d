//! JSON input loading for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::types::ExecutionRecord;

/// Load an arbitrary JSON value (schema or result) from disk.
pub fn load_json(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

/// Load and deserialize an execution record from disk.
pub fn load_execution(path: &Path) -> Result<ExecutionRecord> {
    let value = load_json(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("deserialize execution record {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{action_output_schema_with_secret, execution};

    #[test]
    fn load_json_reads_value() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("result.json");
        fs::write(&path, "{\"output\": {\"output_1\": \"Bobby\"}}").expect("write");

        let value = load_json(&path).expect("load");
        assert_eq!(value["output"]["output_1"], "Bobby");
    }

    #[test]
    fn load_json_errors_name_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.json");
        fs::write(&path, "{not json").expect("write");

        let err = load_json(&path).expect_err("expected parse failure");
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn load_execution_round_trips_record() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("execution.json");
        let record = execution(action_output_schema_with_secret());
        fs::write(&path, serde_json::to_string_pretty(&record).expect("serialize"))
            .expect("write");

        let loaded = load_execution(&path).expect("load");
        assert_eq!(loaded, record);
    }

    #[test]
    fn load_execution_rejects_missing_runner() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("execution.json");
        fs::write(&path, "{\"action\": {}}").expect("write");

        let err = load_execution(&path).expect_err("expected deserialize failure");
        assert!(format!("{err:#}").contains("execution.json"));
    }
}
