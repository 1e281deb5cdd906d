//! Output validation and secret masking for action executions.
//!
//! Checks a completed execution's result against the runner envelope schema
//! and the action's own output schema, and masks schema-marked secrets before
//! results are stored or displayed. The (possibly rewritten) result JSON is
//! printed to stdout; outcomes map to stable exit codes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use outguard::core::redactor::mask_secret_output;
use outguard::core::schema::{SchemaShape, classify};
use outguard::core::types::ExecutionStatus;
use outguard::core::validator::validate_output;
use outguard::exit_codes;
use outguard::io::config::{OutguardConfig, load_config};
use outguard::io::inputs::{load_execution, load_json};
use outguard::logging;

#[derive(Parser)]
#[command(
    name = "outguard",
    version,
    about = "Validate and mask action execution output"
)]
struct Cli {
    /// Path to the processing-gate config (defaults apply when missing).
    #[arg(long, default_value = "outguard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a result against the runner envelope and action output schemas.
    Validate {
        /// Envelope schema owned by the execution engine.
        #[arg(long)]
        runner_schema: PathBuf,
        /// Output schema declared by the action.
        #[arg(long)]
        action_schema: PathBuf,
        /// Result JSON produced by the execution.
        #[arg(long)]
        result: PathBuf,
        /// Status the execution finished with.
        #[arg(long, default_value = "succeeded")]
        status: ExecutionStatus,
        /// Override the configured output key.
        #[arg(long)]
        output_key: Option<String>,
    },
    /// Mask schema-marked secrets in a result.
    Mask {
        /// Execution record carrying the action schema and output key.
        #[arg(long)]
        execution: PathBuf,
        /// Result JSON produced by the execution.
        #[arg(long)]
        result: PathBuf,
    },
    /// Report whether a schema is usable for masking.
    Classify {
        /// Schema JSON to inspect.
        #[arg(long)]
        schema: PathBuf,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    match cli.command {
        Command::Validate {
            runner_schema,
            action_schema,
            result,
            status,
            output_key,
        } => cmd_validate(&cfg, &runner_schema, &action_schema, &result, status, output_key),
        Command::Mask { execution, result } => cmd_mask(&cfg, &execution, &result),
        Command::Classify { schema } => cmd_classify(&schema),
    }
}

fn cmd_validate(
    cfg: &OutguardConfig,
    runner_schema: &Path,
    action_schema: &Path,
    result: &Path,
    status: ExecutionStatus,
    output_key: Option<String>,
) -> Result<i32> {
    let result = load_json(result)?;

    if !cfg.validate_output {
        debug!("output validation disabled; passing result through");
        print_json(&result)?;
        return Ok(exit_codes::OK);
    }

    let runner_schema = load_json(runner_schema)?;
    let action_schema = load_json(action_schema)?;
    let output_key = output_key.unwrap_or_else(|| cfg.output_key.clone());

    let (result, final_status) =
        validate_output(&runner_schema, &action_schema, result, status, &output_key);
    debug!(status = final_status.as_str(), "validation finished");
    print_json(&result)?;

    if final_status == ExecutionStatus::Failed && status != ExecutionStatus::Failed {
        return Ok(exit_codes::VALIDATION_FAILED);
    }
    Ok(exit_codes::OK)
}

fn cmd_mask(cfg: &OutguardConfig, execution: &Path, result: &Path) -> Result<i32> {
    let result = load_json(result)?;

    if !cfg.mask_secrets {
        debug!("secret masking disabled; passing result through");
        print_json(&result)?;
        return Ok(exit_codes::OK);
    }

    let execution = load_execution(execution)?;
    let masked = mask_secret_output(&execution, &result);
    print_json(&masked)?;
    Ok(exit_codes::OK)
}

fn cmd_classify(schema: &Path) -> Result<i32> {
    let schema = load_json(schema)?;
    match classify(&schema) {
        SchemaShape::WellFormed(shape) => {
            println!("well-formed: type={}", shape.type_name);
            Ok(exit_codes::OK)
        }
        SchemaShape::Malformed => {
            println!("malformed");
            Ok(exit_codes::MALFORMED_SCHEMA)
        }
    }
}

/// Serialize `value` to pretty-printed JSON with trailing newline on stdout.
fn print_json(value: &Value) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(value).context("serialize json")?;
    payload.push('\n');
    print!("{payload}");
    Ok(())
}
