//! Shared primitives for the infoval model-evaluation toolkit.
//!
//! `infoval-core` provides the foundation that `infoval-eval` builds on:
//!
//! - **Error types** — [`InfovalError`] and [`Result`] for structured error handling
//! - **Observations** — [`Observations`], aligned `(actual, score)` pairs with
//!   per-value missingness

pub mod error;
pub mod observation;

pub use error::{ensure_same_length, InfovalError, Result};
pub use observation::{Observations, EVENT};
