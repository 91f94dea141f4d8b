//! # praxis-session
//!
//! Controller for one student's exam attempt: start against a cached bank,
//! resume after interruption, cooperative timed expiry, and an idempotent
//! finish that is durable-first-local.

pub mod controller;
pub mod expiry;

pub use controller::{ExamPhase, ExamSessionController};
pub use expiry::ExpiryWatcher;
