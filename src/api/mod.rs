//! HTTP access to the quoting service

pub mod client;

pub use client::{ApiClient, ApiError, RetryPolicy};
