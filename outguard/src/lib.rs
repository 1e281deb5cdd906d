//! Output-contract enforcement for action executions.
//!
//! This crate validates the result of a completed action execution against
//! two layered schema contracts (runner envelope, then action output) and
//! masks schema-marked secrets before results are stored or displayed. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (classification, validation,
//!   masking). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config and JSON input loading).
//!   Isolated to enable simple file-based fixtures in tests.
//!
//! The CLI binary (`main.rs`) coordinates core logic with I/O to implement
//! the `validate`, `mask`, and `classify` commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
