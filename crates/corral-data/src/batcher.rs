// Batcher — packs a sample stream into fixed-size dense batches
//
// The batcher owns its backing buffers: a [batch, C, H, W] data buffer,
// a [batch, label_width] label buffer, and a per-slot index array, all
// allocated once at construction and overwritten in place by every fill.
// A short final batch is handled one of two ways:
//   - round_batch on:  restart the source and keep filling from the next
//     epoch; the borrowed slots are declared as padding, and the next
//     epoch resumes past them instead of re-reading.
//   - round_batch off: publish the batch with the trailing slots left as
//     they were, declaring how many of them are padding.

use corral_core::{DenseBuffer, Error, Result, TensorView};

use crate::source::SampleSource;

/// Batch assembly configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of samples per batch.
    pub batch_size: usize,
    /// Geometry of one data row: `[channels, height, width]`.
    pub input_shape: [usize; 3],
    /// Width of one label row.
    pub label_width: usize,
    /// Complete a short final batch with samples wrapped around from the
    /// next epoch instead of publishing it partially filled.
    pub round_batch: bool,
    /// Test harnesses only: the first advance after a restart succeeds
    /// without consuming from the source.
    pub test_skip_read: bool,
    /// Suppress informational logging.
    pub silent: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            input_shape: [3, 224, 224],
            label_width: 1,
            round_batch: true,
            test_skip_read: false,
            silent: false,
        }
    }
}

impl BatchConfig {
    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs;
        self
    }

    pub fn input_shape(mut self, shape: [usize; 3]) -> Self {
        self.input_shape = shape;
        self
    }

    pub fn label_width(mut self, w: usize) -> Self {
        self.label_width = w;
        self
    }

    pub fn round_batch(mut self, r: bool) -> Self {
        self.round_batch = r;
        self
    }

    pub fn test_skip_read(mut self, s: bool) -> Self {
        self.test_skip_read = s;
        self
    }

    pub fn silent(mut self, s: bool) -> Self {
        self.silent = s;
        self
    }

    /// Reject structurally invalid configurations before any allocation
    /// or I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".to_string()));
        }
        if self.input_shape.iter().any(|&d| d == 0) {
            return Err(Error::InvalidConfig(format!(
                "input_shape {:?} has a zero dimension",
                self.input_shape
            )));
        }
        if self.label_width == 0 {
            return Err(Error::InvalidConfig("label_width must be positive".to_string()));
        }
        Ok(())
    }
}

/// One published batch: zero-copy views into the batcher's buffers.
///
/// The views borrow the batcher, so a batch cannot be held across the
/// next `advance` call.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// Dense data, shape `[batch_size, channels, height, width]`.
    pub data: TensorView<'a>,
    /// Dense labels, shape `[batch_size, label_width]`.
    pub label: TensorView<'a>,
    /// Source index of the sample in each slot.
    pub indices: &'a [u64],
    /// Number of trailing slots that are not genuine next-in-order
    /// samples: wrapped-around reuse (round batches) or leftovers from a
    /// previous fill (short batches).
    pub padding: usize,
}

/// Packs a [`SampleSource`] into fixed-size dense batches.
///
/// Driven pull-style: `advance()` fills the next batch and `batch()`
/// exposes it. Single-threaded by design — the batcher mutates its
/// buffers without synchronization, so batches on multiple threads need
/// independent batcher/source pairs.
pub struct Batcher<S: SampleSource> {
    source: S,
    config: BatchConfig,
    data: DenseBuffer,
    label: DenseBuffer,
    indices: Vec<u64>,
    /// Padding of the most recently published batch.
    padding: usize,
    /// Set by construction and `restart`, cleared by the first `advance`.
    fresh: bool,
    /// Samples borrowed from the next epoch by the last round-robin
    /// refill. Nonzero means the current epoch is finished and the source
    /// already stands inside the next one.
    num_overflow: usize,
}

impl<S: SampleSource> Batcher<S> {
    /// Validate the configuration and allocate the backing buffers.
    ///
    /// This is the only allocation in the batcher's lifetime; every
    /// `advance` overwrites the same buffers. No I/O happens here.
    pub fn new(source: S, config: BatchConfig) -> Result<Self> {
        config.validate()?;
        let [c, h, w] = config.input_shape;
        let data = DenseBuffer::zeros(config.batch_size, (c, h, w));
        let label = DenseBuffer::zeros(config.batch_size, config.label_width);
        let indices = vec![0u64; config.batch_size];
        if !config.silent {
            log::debug!(
                "batcher ready: {} slots of {}x{}x{} data, label width {}",
                config.batch_size,
                c,
                h,
                w,
                config.label_width
            );
        }
        Ok(Self {
            source,
            config,
            data,
            label,
            indices,
            padding: 0,
            fresh: true,
            num_overflow: 0,
        })
    }

    /// Reset to emit from the beginning.
    ///
    /// If the previous epoch ended with a round-robin wrap, the source is
    /// *not* restarted — it already stands past the wrapped samples — and
    /// only the overflow count is cleared, so the new epoch resumes
    /// without re-reading them.
    pub fn restart(&mut self) -> Result<()> {
        if !self.config.round_batch || self.num_overflow == 0 {
            self.source.restart()?;
        } else {
            self.num_overflow = 0;
        }
        self.fresh = true;
        Ok(())
    }

    /// Fill the next batch. `Ok(false)` means the epoch is exhausted and
    /// nothing was produced; call [`restart`](Self::restart) to begin the
    /// next epoch.
    pub fn advance(&mut self) -> Result<bool> {
        // Test harness path: the first call after a restart publishes
        // whatever the buffers already hold.
        if self.config.test_skip_read && self.fresh {
            self.fresh = false;
            return Ok(true);
        }
        self.fresh = false;

        // A wrap already consumed the head of the next epoch; the epoch
        // stays exhausted until restart.
        if self.num_overflow != 0 {
            return Ok(false);
        }

        self.padding = 0;
        let batch_size = self.config.batch_size;
        let mut top = 0;

        while self.source.advance()? {
            self.fill_slot(top)?;
            top += 1;
            if top == batch_size {
                return Ok(true);
            }
        }

        if top == 0 {
            return Ok(false);
        }

        if self.config.round_batch {
            // Short batch: wrap around and borrow the head of the next
            // epoch to complete it.
            self.source.restart()?;
            while top < batch_size {
                if !self.source.advance()? {
                    return Err(Error::InsufficientData {
                        needed: batch_size,
                        got: top,
                    });
                }
                self.fill_slot(top)?;
                top += 1;
                self.num_overflow += 1;
            }
            self.padding = self.num_overflow;
            if !self.config.silent {
                log::info!(
                    "final batch wrapped {} samples from the next epoch",
                    self.num_overflow
                );
            }
        } else {
            // Publish short: trailing slots keep whatever the previous
            // fill wrote; `padding` is the only authoritative signal.
            self.padding = batch_size - top;
            if !self.config.silent {
                log::debug!("final batch short by {} samples", self.padding);
            }
        }
        Ok(true)
    }

    /// The most recently published batch.
    ///
    /// Errors with [`Error::BatchNotReady`] if `advance` has not been
    /// called since construction or the last restart.
    pub fn batch(&self) -> Result<Batch<'_>> {
        if self.fresh {
            return Err(Error::BatchNotReady);
        }
        Ok(Batch {
            data: self.data.view(),
            label: self.label.view(),
            indices: &self.indices,
            padding: self.padding,
        })
    }

    /// Padding of the most recently published batch.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// The active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Release the batcher and hand back its source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Copy the source's current sample into slot `slot` of the batch
    /// buffers, length-checking both rows against the configured
    /// geometry.
    fn fill_slot(&mut self, slot: usize) -> Result<()> {
        let sample = self.source.current();
        if sample.data.len() != self.data.row_len() {
            return Err(Error::SampleShape {
                slot,
                expected: self.data.row_len(),
                got: sample.data.len(),
            });
        }
        if sample.label.len() != self.label.row_len() {
            return Err(Error::SampleShape {
                slot,
                expected: self.label.row_len(),
                got: sample.label.len(),
            });
        }
        self.data.row_mut(slot).copy_from_slice(sample.data);
        self.label.row_mut(slot).copy_from_slice(sample.label);
        self.indices[slot] = sample.index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemorySource;

    fn counting_source(n: usize) -> InMemorySource {
        InMemorySource::new(
            (0..n)
                .map(|i| (vec![i as f32, i as f32], vec![i as f32]))
                .collect(),
        )
        .unwrap()
    }

    fn config(batch_size: usize) -> BatchConfig {
        BatchConfig::default()
            .batch_size(batch_size)
            .input_shape([1, 1, 2])
            .silent(true)
    }

    #[test]
    fn rejects_zero_batch_size() {
        let err = Batcher::new(counting_source(4), config(0)).err().unwrap();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_input_dim() {
        let cfg = config(2).input_shape([3, 0, 4]);
        assert!(Batcher::new(counting_source(4), cfg).is_err());
    }

    #[test]
    fn rejects_zero_label_width() {
        let cfg = config(2).label_width(0);
        assert!(Batcher::new(counting_source(4), cfg).is_err());
    }

    #[test]
    fn batch_before_advance_is_an_error() {
        let batcher = Batcher::new(counting_source(4), config(2)).unwrap();
        assert!(matches!(batcher.batch(), Err(Error::BatchNotReady)));
    }

    #[test]
    fn skip_read_consumes_nothing_on_first_advance() {
        let cfg = config(2).test_skip_read(true);
        let mut batcher = Batcher::new(counting_source(4), cfg).unwrap();

        // First advance: success, buffers untouched (still zeroed).
        assert!(batcher.advance().unwrap());
        let batch = batcher.batch().unwrap();
        assert!(batch.data.data().iter().all(|&v| v == 0.0));

        // Second advance: a normal fill from the start of the source.
        assert!(batcher.advance().unwrap());
        let batch = batcher.batch().unwrap();
        assert_eq!(batch.indices, &[0, 1]);
        assert_eq!(batch.data.row(0), &[0.0, 0.0]);
        assert_eq!(batch.data.row(1), &[1.0, 1.0]);
    }

    #[test]
    fn shape_mismatch_is_reported_with_slot() {
        let src = InMemorySource::new(vec![(vec![1.0, 2.0, 3.0], vec![0.0])]).unwrap();
        let mut batcher = Batcher::new(src, config(1)).unwrap();
        match batcher.advance() {
            Err(Error::SampleShape { slot, expected, got }) => {
                assert_eq!(slot, 0);
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("expected shape error, got {other:?}"),
        }
    }
}
