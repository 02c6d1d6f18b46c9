// ChainSource — concatenate multiple sources into one stream

use corral_core::{Error, Result};

use crate::source::{SampleSource, SampleView};

/// Concatenates two or more sources end-to-end as a single stream.
///
/// Samples are re-indexed with a running global position, so the combined
/// stream looks to the batcher like one source with contiguous indices.
/// All inner sources should share the same data/label geometry; the
/// batcher's per-slot length check catches mismatches.
pub struct ChainSource {
    sources: Vec<Box<dyn SampleSource>>,
    active: usize,
    /// Global index of the current sample; `emitted - 1` after a
    /// successful advance.
    emitted: u64,
}

impl ChainSource {
    /// Create a chain over the given sources.
    pub fn new(sources: Vec<Box<dyn SampleSource>>) -> Result<Self> {
        if sources.is_empty() {
            return Err(Error::InvalidConfig(
                "chain source needs at least one inner source".to_string(),
            ));
        }
        Ok(Self {
            sources,
            active: 0,
            emitted: 0,
        })
    }
}

impl SampleSource for ChainSource {
    fn restart(&mut self) -> Result<()> {
        for s in &mut self.sources {
            s.restart()?;
        }
        self.active = 0;
        self.emitted = 0;
        Ok(())
    }

    fn advance(&mut self) -> Result<bool> {
        loop {
            if self.sources[self.active].advance()? {
                self.emitted += 1;
                return Ok(true);
            }
            if self.active + 1 == self.sources.len() {
                return Ok(false);
            }
            self.active += 1;
        }
    }

    fn current(&self) -> SampleView<'_> {
        assert!(self.emitted > 0, "current() before a successful advance()");
        let inner = self.sources[self.active].current();
        SampleView {
            data: inner.data,
            label: inner.label,
            index: self.emitted - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemorySource;

    fn source(values: &[f32]) -> Box<dyn SampleSource> {
        Box::new(
            InMemorySource::new(values.iter().map(|&v| (vec![v], vec![0.0])).collect()).unwrap(),
        )
    }

    #[test]
    fn chains_and_reindexes() {
        let mut chain = ChainSource::new(vec![source(&[10.0, 11.0]), source(&[20.0])]).unwrap();

        let mut seen = Vec::new();
        while chain.advance().unwrap() {
            let s = chain.current();
            seen.push((s.index, s.data[0]));
        }
        assert_eq!(seen, vec![(0, 10.0), (1, 11.0), (2, 20.0)]);
        assert!(!chain.advance().unwrap());

        chain.restart().unwrap();
        assert!(chain.advance().unwrap());
        assert_eq!(chain.current().index, 0);
        assert_eq!(chain.current().data, &[10.0]);
    }

    #[test]
    fn rejects_empty_chain() {
        assert!(ChainSource::new(Vec::new()).is_err());
    }
}
