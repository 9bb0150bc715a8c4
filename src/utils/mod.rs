//! Utility functions shared across the application
//!
//! Formatting helpers used by the view-model mapper and the shell.

mod format;

pub use format::*;
