//! ui
//!
//! User-facing output for the `shortnames` binary.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! All command output goes through this module so the quiet flag is
//! honored in one place. Library diagnostics use `tracing` instead.

pub mod output;
