//! Exit codes for the CLI

#![allow(dead_code)]

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Input-shape error (bad trigger message, unreadable document)
pub const INPUT_ERROR: i32 = 2;
