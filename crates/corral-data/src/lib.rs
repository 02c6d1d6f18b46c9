//! # corral-data
//!
//! Sample sources and batch assembly for corral.
//!
//! This crate provides:
//! - [`SampleSource`] trait — unified pull contract for any per-sample stream
//! - [`Batcher`] — packs a source into fixed-size dense batches with
//!   round-robin or declared-padding handling of the short final batch
//! - Source variants — [`InMemorySource`], file-backed [`CsvSource`],
//!   composed [`TransformSource`] and [`ChainSource`]
//! - Per-sample transforms — [`Normalize`], [`Standardize`],
//!   [`OneHotEncode`], and random augmentations
//!
//! A batch is published as zero-copy views over buffers the batcher
//! allocates once and reuses; the borrow checker keeps a published batch
//! from outliving the next fill.

pub mod augment;
pub mod batcher;
pub mod chain;
pub mod csv;
pub mod in_memory;
pub mod source;
pub mod transform;

pub use augment::{RandomHorizontalFlip, RandomNoise};
pub use batcher::{Batch, BatchConfig, Batcher};
pub use chain::ChainSource;
pub use csv::{CsvConfig, CsvSource};
pub use in_memory::InMemorySource;
pub use source::{Sample, SampleSource, SampleView};
pub use transform::{Compose, Normalize, OneHotEncode, Standardize, Transform, TransformSource};
