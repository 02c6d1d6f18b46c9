// InMemorySource — stream over samples held in memory

use corral_core::{Error, Result};

use crate::source::{Sample, SampleSource, SampleView};

/// An in-memory sample stream backed by a `Vec<Sample>`.
///
/// Useful for building streams programmatically, for tests, and as the
/// backing store of eagerly-loaded file sources. Samples keep the index
/// they were constructed with; [`InMemorySource::new`] assigns positions
/// in insertion order.
#[derive(Debug)]
pub struct InMemorySource {
    samples: Vec<Sample>,
    /// Cursor: number of samples already consumed this epoch. Zero means
    /// "before the first sample"; `current()` reads `samples[cursor - 1]`.
    cursor: usize,
}

impl InMemorySource {
    /// Create a source from data/label row pairs, indexed in order.
    ///
    /// All data rows must share one length, and likewise all label rows.
    pub fn new(rows: Vec<(Vec<f32>, Vec<f32>)>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidConfig(
                "in-memory source needs at least one sample".to_string(),
            ));
        }
        let data_len = rows[0].0.len();
        let label_len = rows[0].1.len();
        for (i, (data, label)) in rows.iter().enumerate() {
            if data.len() != data_len || label.len() != label_len {
                return Err(Error::InvalidConfig(format!(
                    "in-memory source: row {} has lengths {}/{}, expected {}/{}",
                    i,
                    data.len(),
                    label.len(),
                    data_len,
                    label_len
                )));
            }
        }
        let samples = rows
            .into_iter()
            .enumerate()
            .map(|(i, (data, label))| Sample {
                data,
                label,
                index: i as u64,
            })
            .collect();
        Ok(Self { samples, cursor: 0 })
    }

    /// Create a source from pre-built samples, keeping their indices.
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::InvalidConfig(
                "in-memory source needs at least one sample".to_string(),
            ));
        }
        Ok(Self { samples, cursor: 0 })
    }

    /// Generate `n` random samples shaped `[c, h, w]` with class labels in
    /// `0..classes`, for tests and demos.
    pub fn synthetic(n: usize, data_shape: [usize; 3], classes: usize) -> Result<Self> {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let data_len: usize = data_shape.iter().product();
        let rows = (0..n)
            .map(|_| {
                let data = (0..data_len).map(|_| rng.gen::<f32>()).collect();
                let label = vec![rng.gen_range(0..classes) as f32];
                (data, label)
            })
            .collect();
        Self::new(rows)
    }

    /// Total number of samples held.
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }
}

impl SampleSource for InMemorySource {
    fn restart(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn advance(&mut self) -> Result<bool> {
        if self.cursor < self.samples.len() {
            self.cursor += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn current(&self) -> SampleView<'_> {
        assert!(self.cursor > 0, "current() before a successful advance()");
        self.samples[self.cursor - 1].view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_order_and_restarts() {
        let mut src = InMemorySource::new(vec![
            (vec![0.0, 0.0], vec![0.0]),
            (vec![1.0, 1.0], vec![1.0]),
            (vec![2.0, 2.0], vec![0.0]),
        ])
        .unwrap();

        let mut seen = Vec::new();
        while src.advance().unwrap() {
            seen.push(src.current().index);
        }
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(!src.advance().unwrap());

        src.restart().unwrap();
        assert!(src.advance().unwrap());
        assert_eq!(src.current().index, 0);
        assert_eq!(src.current().data, &[0.0, 0.0]);
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = InMemorySource::new(vec![
            (vec![0.0, 0.0], vec![0.0]),
            (vec![1.0], vec![1.0]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn synthetic_geometry() {
        let mut src = InMemorySource::synthetic(5, [1, 2, 2], 10).unwrap();
        assert_eq!(src.num_samples(), 5);
        assert!(src.advance().unwrap());
        assert_eq!(src.current().data.len(), 4);
        assert_eq!(src.current().label.len(), 1);
    }
}
