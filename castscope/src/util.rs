//! Helpers for programs embedding castscope.

/// Log filtering for hosts which install their own logger.
pub mod log;
