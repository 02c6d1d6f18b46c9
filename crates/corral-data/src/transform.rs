// Transform — per-sample preprocessing applied as samples stream through

use corral_core::Result;

use crate::source::{Sample, SampleSource, SampleView};

/// A transform applied to each sample on its way to the batcher.
pub trait Transform: Send + Sync {
    /// Apply the transform to a sample, returning the modified sample.
    fn apply(&self, sample: Sample) -> Sample;
}

// Built-in transforms

/// Normalize data values to [0, 1] by dividing by a given scale factor.
///
/// Commonly used for image pixels: `Normalize::new(255.0)`.
#[derive(Debug, Clone)]
pub struct Normalize {
    scale: f32,
}

impl Normalize {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Transform for Normalize {
    fn apply(&self, mut sample: Sample) -> Sample {
        for v in &mut sample.data {
            *v /= self.scale;
        }
        sample
    }
}

/// Standardize data values to zero mean and unit variance.
#[derive(Debug, Clone)]
pub struct Standardize {
    pub mean: f32,
    pub std: f32,
}

impl Standardize {
    pub fn new(mean: f32, std: f32) -> Self {
        Self { mean, std }
    }
}

impl Transform for Standardize {
    fn apply(&self, mut sample: Sample) -> Sample {
        for v in &mut sample.data {
            *v = (*v - self.mean) / self.std;
        }
        sample
    }
}

/// One-hot encode the label into a row of width `num_classes`.
///
/// Reads the class index from `label[0]`; pair this with a batcher
/// configured with `label_width == num_classes`.
#[derive(Debug, Clone)]
pub struct OneHotEncode {
    pub num_classes: usize,
}

impl OneHotEncode {
    pub fn new(num_classes: usize) -> Self {
        Self { num_classes }
    }
}

impl Transform for OneHotEncode {
    fn apply(&self, mut sample: Sample) -> Sample {
        let class_idx = sample.label[0] as usize;
        let mut one_hot = vec![0.0; self.num_classes];
        if class_idx < self.num_classes {
            one_hot[class_idx] = 1.0;
        }
        sample.label = one_hot;
        sample
    }
}

/// Chain multiple transforms.
pub struct Compose {
    transforms: Vec<Box<dyn Transform>>,
}

impl Compose {
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }
}

impl Transform for Compose {
    fn apply(&self, mut sample: Sample) -> Sample {
        for t in &self.transforms {
            sample = t.apply(sample);
        }
        sample
    }
}

// TransformSource — composed source applying transforms in the stream

/// Wraps a source and applies a [`Transform`] to every sample that passes
/// through, preserving the inner source's indices and epoch behavior.
///
/// The transformed sample is held inside the wrapper so `current()` can
/// hand out a borrow, matching the plain source contract.
pub struct TransformSource<S: SampleSource> {
    inner: S,
    transform: Box<dyn Transform>,
    current: Option<Sample>,
}

impl<S: SampleSource> TransformSource<S> {
    /// Wrap `inner`, applying `transform` to each sample.
    pub fn new(inner: S, transform: Box<dyn Transform>) -> Self {
        Self {
            inner,
            transform,
            current: None,
        }
    }
}

impl<S: SampleSource> SampleSource for TransformSource<S> {
    fn restart(&mut self) -> Result<()> {
        self.current = None;
        self.inner.restart()
    }

    fn advance(&mut self) -> Result<bool> {
        if !self.inner.advance()? {
            return Ok(false);
        }
        let v = self.inner.current();
        let sample = Sample {
            data: v.data.to_vec(),
            label: v.label.to_vec(),
            index: v.index,
        };
        self.current = Some(self.transform.apply(sample));
        Ok(true)
    }

    fn current(&self) -> SampleView<'_> {
        self.current
            .as_ref()
            .expect("current() before a successful advance()")
            .view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemorySource;

    fn sample(data: Vec<f32>, label: Vec<f32>) -> Sample {
        Sample {
            data,
            label,
            index: 0,
        }
    }

    #[test]
    fn normalize_scales_data_only() {
        let t = Normalize::new(255.0);
        let out = t.apply(sample(vec![0.0, 127.5, 255.0], vec![5.0]));
        assert!((out.data[0] - 0.0).abs() < 1e-6);
        assert!((out.data[1] - 0.5).abs() < 1e-6);
        assert!((out.data[2] - 1.0).abs() < 1e-6);
        assert_eq!(out.label, vec![5.0]);
    }

    #[test]
    fn standardize() {
        let t = Standardize::new(100.0, 50.0);
        let out = t.apply(sample(vec![100.0, 150.0, 50.0], vec![0.0]));
        assert!((out.data[0] - 0.0).abs() < 1e-6);
        assert!((out.data[1] - 1.0).abs() < 1e-6);
        assert!((out.data[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn one_hot_widens_label() {
        let t = OneHotEncode::new(4);
        let out = t.apply(sample(vec![1.0], vec![2.0]));
        assert_eq!(out.label, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn compose_applies_in_order() {
        let t = Compose::new(vec![
            Box::new(Normalize::new(2.0)),
            Box::new(Standardize::new(1.0, 1.0)),
        ]);
        let out = t.apply(sample(vec![4.0], vec![0.0]));
        // 4.0 / 2.0 = 2.0, then (2.0 - 1.0) / 1.0 = 1.0
        assert_eq!(out.data, vec![1.0]);
    }

    #[test]
    fn transform_source_streams_transformed_samples() {
        let inner =
            InMemorySource::new(vec![(vec![2.0, 4.0], vec![1.0]), (vec![6.0, 8.0], vec![0.0])])
                .unwrap();
        let mut src = TransformSource::new(inner, Box::new(Normalize::new(2.0)));

        assert!(src.advance().unwrap());
        assert_eq!(src.current().data, &[1.0, 2.0]);
        assert_eq!(src.current().index, 0);
        assert!(src.advance().unwrap());
        assert_eq!(src.current().data, &[3.0, 4.0]);
        assert!(!src.advance().unwrap());

        src.restart().unwrap();
        assert!(src.advance().unwrap());
        assert_eq!(src.current().data, &[1.0, 2.0]);
    }
}
