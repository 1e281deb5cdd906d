//! Shared types for execution results and their lifecycle status.
//!
//! These types define stable contracts between the validator, the redactor,
//! and the callers that persist execution records. They must stay free of
//! I/O and remain deterministic across calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder substituted for every masked value.
///
/// Display and alerting layers match on this exact literal; do not change it
/// without migrating those layers.
pub const MASKED_OUTPUT_VALUE: &str = "********";

/// Lifecycle status of an action execution.
///
/// The validator only ever transitions a status toward [`Failed`]; every
/// other variant passes through unchanged.
///
/// [`Failed`]: ExecutionStatus::Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Requested,
    Running,
    Succeeded,
    Failed,
    TimedOut,
}

impl ExecutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionStatus::Requested => "requested",
            ExecutionStatus::Running => "running",
            ExecutionStatus::Succeeded => "succeeded",
            ExecutionStatus::Failed => "failed",
            ExecutionStatus::TimedOut => "timed_out",
        }
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(ExecutionStatus::Requested),
            "running" => Ok(ExecutionStatus::Running),
            "succeeded" => Ok(ExecutionStatus::Succeeded),
            "failed" => Ok(ExecutionStatus::Failed),
            "timed_out" => Ok(ExecutionStatus::TimedOut),
            other => Err(format!("unknown execution status '{other}'")),
        }
    }
}

/// One run of a task, as seen by the masking layer.
///
/// Only `action.output_schema` and `runner.output_key` are read during
/// masking; `runner.output_schema` is consumed by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub action: ActionSpec,
    pub runner: RunnerSpec,
}

/// Task-definition side of an execution record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Schema the task declares for the value under the output key.
    #[serde(default)]
    pub output_schema: Value,
}

/// Execution-engine side of an execution record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerSpec {
    /// Top-level result field holding the task's actual output.
    pub output_key: String,
    /// Envelope schema the whole result must satisfy.
    #[serde(default)]
    pub output_schema: Value,
}
