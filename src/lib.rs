//! Stockroll: raw-stock rollup for manufacturing quotes
//!
//! Walks a quote's hierarchy (quote -> part line item -> routing -> input
//! material) on the quoting service and sums physical dimensions into
//! per-shape stock totals usable for procurement.

pub mod api;
pub mod cli;
pub mod core;
pub mod entities;
