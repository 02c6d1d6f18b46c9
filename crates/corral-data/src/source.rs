// SampleSource trait — unified pull contract for any per-sample stream

use corral_core::Result;

/// A single owned sample: one data row, one label row, and the index the
/// producing source assigned to it.
///
/// Rows are flat `Vec<f32>` in row-major order; their geometry (e.g.
/// `[3, 32, 32]` data, width-10 labels) is agreed between the source and
/// the batcher configuration rather than carried per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Flattened data row.
    pub data: Vec<f32>,
    /// Flattened label row.
    pub label: Vec<f32>,
    /// Position of this sample in the original source order.
    pub index: u64,
}

impl Sample {
    /// Borrow this sample as a [`SampleView`].
    pub fn view(&self) -> SampleView<'_> {
        SampleView {
            data: &self.data,
            label: &self.label,
            index: self.index,
        }
    }
}

/// Borrowed view of the source's current sample.
///
/// The batcher copies out of the view immediately and never retains it
/// past the copy; the view is invalidated by the source's next advance.
#[derive(Debug, Clone, Copy)]
pub struct SampleView<'a> {
    /// Flattened data row.
    pub data: &'a [f32],
    /// Flattened label row.
    pub label: &'a [f32],
    /// Position of this sample in the original source order.
    pub index: u64,
}

/// A pull-based stream of labeled samples.
///
/// Implementations produce one sample at a time and can restart from the
/// beginning. The batcher drives a source through repeated
/// `advance` / `current` calls and occasionally `restart`s it at epoch
/// boundaries.
///
/// One contract detail matters for round-robin batching: a source keeps
/// its cursor until `restart` is actually called. When a previous epoch's
/// final batch borrowed samples from the new epoch, the batcher skips the
/// source restart on purpose, and the source must simply continue from
/// where it stands.
pub trait SampleSource {
    /// Reset iteration to the beginning of the stream.
    fn restart(&mut self) -> Result<()>;

    /// Step to the next sample. Returns `false` when the stream is
    /// exhausted (until the next `restart`).
    fn advance(&mut self) -> Result<bool>;

    /// The sample the last successful [`advance`](Self::advance) landed on.
    ///
    /// # Panics
    /// May panic if called before any successful advance, or after an
    /// advance returned `false`.
    fn current(&self) -> SampleView<'_>;
}
