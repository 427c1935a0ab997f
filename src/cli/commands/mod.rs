//! Command implementations

pub mod completions;
pub mod rollup;
