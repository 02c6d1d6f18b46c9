// Augmentation transforms — random per-sample perturbations
//
// Operate on `Sample::data` treating it as an image in [C, H, W] layout
// (channel-first, row-major). Geometry is configured on the transform,
// since samples carry flat rows.

use rand::thread_rng;
use rand::Rng;

use crate::source::Sample;
use crate::transform::Transform;

/// Randomly flip an image horizontally with probability `p`.
#[derive(Debug, Clone)]
pub struct RandomHorizontalFlip {
    pub p: f64,
    shape: [usize; 3],
}

impl RandomHorizontalFlip {
    /// `shape` is the `[C, H, W]` layout of each data row.
    pub fn new(p: f64, shape: [usize; 3]) -> Self {
        Self { p, shape }
    }
}

impl Transform for RandomHorizontalFlip {
    fn apply(&self, mut sample: Sample) -> Sample {
        let mut rng = thread_rng();
        if rng.gen::<f64>() >= self.p {
            return sample;
        }
        let [c, h, w] = self.shape;
        if sample.data.len() != c * h * w {
            return sample;
        }
        let mut flipped = vec![0.0; c * h * w];
        for ch in 0..c {
            for row in 0..h {
                for col in 0..w {
                    let src = ch * h * w + row * w + col;
                    let dst = ch * h * w + row * w + (w - 1 - col);
                    flipped[dst] = sample.data[src];
                }
            }
        }
        sample.data = flipped;
        sample
    }
}

/// Add uniform noise in `[-amplitude, amplitude]` to every data value.
#[derive(Debug, Clone)]
pub struct RandomNoise {
    pub amplitude: f32,
}

impl RandomNoise {
    pub fn new(amplitude: f32) -> Self {
        Self { amplitude }
    }
}

impl Transform for RandomNoise {
    fn apply(&self, mut sample: Sample) -> Sample {
        let mut rng = thread_rng();
        for v in &mut sample.data {
            *v += rng.gen_range(-self.amplitude..=self.amplitude);
        }
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(data: Vec<f32>) -> Sample {
        Sample {
            data,
            label: vec![0.0],
            index: 0,
        }
    }

    #[test]
    fn flip_reverses_rows() {
        // p = 1.0: always flips. One channel, 2x3 image.
        let t = RandomHorizontalFlip::new(1.0, [1, 2, 3]);
        let out = t.apply(sample(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        assert_eq!(out.data, vec![3.0, 2.0, 1.0, 6.0, 5.0, 4.0]);
    }

    #[test]
    fn flip_skipped_at_zero_probability() {
        let t = RandomHorizontalFlip::new(0.0, [1, 1, 3]);
        let out = t.apply(sample(vec![1.0, 2.0, 3.0]));
        assert_eq!(out.data, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn noise_stays_within_amplitude() {
        let t = RandomNoise::new(0.5);
        let out = t.apply(sample(vec![0.0; 32]));
        assert!(out.data.iter().all(|v| v.abs() <= 0.5));
    }
}
