//! Unified exit codes for the tribunal CLI.

pub const SUCCESS: i32 = 0;
pub const PARTIAL_FAILURE: i32 = 1; // Some datasets were skipped
pub const INTERNAL_ERROR: i32 = 2; // Setup or config error
