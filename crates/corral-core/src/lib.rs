//! # corral-core
//!
//! Core primitives shared across the corral workspace.
//!
//! This crate provides:
//! - [`Shape`] — n-dimensional buffer geometry
//! - [`DenseBuffer`] / [`TensorView`] — allocate-once batch storage and
//!   zero-copy views over it
//! - [`Error`] / [`Result`] — the single error type used by the whole
//!   library, plus the [`bail!`] macro

pub mod dense;
pub mod error;
pub mod shape;

pub use dense::{DenseBuffer, TensorView};
pub use error::{Error, Result};
pub use shape::Shape;
