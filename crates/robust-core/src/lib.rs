//! Core types for robust regime analysis
//!
//! This crate holds the pieces every other workspace crate leans on:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`utils`]: total numeric helpers (mean, sample variance, median)
//! - [`VARIANCE_FLOOR`]: the additive floor used wherever a variance or
//!   dispersion estimate ends up in a denominator
//!
//! # Example
//!
//! ```rust
//! use robust_core::{utils, VARIANCE_FLOOR};
//!
//! let data = [5.0, 5.0, 5.0];
//! let scaled = (data[0] - utils::mean(&data)) / (utils::variance(&data) + VARIANCE_FLOOR).sqrt();
//! assert_eq!(scaled, 0.0);
//! ```

pub mod error;
pub mod utils;

pub use error::{Error, Result};

/// Additive floor applied to variances and dispersion estimates before
/// dividing by them, so constant sub-sequences never divide by zero.
pub const VARIANCE_FLOOR: f64 = 1e-12;
