//! HTTP request handlers.
//!
//! # Responsibility
//! - Translate validated requests into core service calls.
//! - Keep each handler to exactly one persistence operation.

pub mod health;
pub mod tasks;
