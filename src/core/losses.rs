use crate::prelude::*;

/// Root-mean-square difference between `target` and `output`.
///
/// Both slices must have the same length; the network checks this before
/// calling.
pub fn rms_error(target: &[f64], output: &[f64]) -> f64 {
    if output.is_empty() {
        return 0.0;
    }
    let sum: f64 = target
        .iter()
        .zip(output)
        .map(|(t, o)| (t - o).powi(2))
        .sum();
    (sum / output.len() as f64).sqrt()
}

/// Exponentially weighted running average of per-example errors.
///
/// Each sample `e` moves the average to `(avg * k + e) / (k + 1)`, where `k`
/// is the smoothing window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RecentAverage {
    window: f64,
    value: f64,
}

impl RecentAverage {
    pub fn new(window: f64) -> Result<Self> {
        if !window.is_finite() || window < 0.0 {
            return Err(NNError::InvalidHyperparameter(format!(
                "error smoothing window must be finite and non-negative, got {}",
                window
            )));
        }
        Ok(Self { window, value: 0.0 })
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Folds `sample` into the average and returns the new value.
    pub fn update(&mut self, sample: f64) -> f64 {
        self.value = (self.value * self.window + sample) / (self.window + 1.0);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_known_vectors() {
        assert_eq!(rms_error(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
        // deltas 0.3 and 0.4 -> sqrt((0.09 + 0.16) / 2)
        let e = rms_error(&[1.0, 0.0], &[0.7, 0.4]);
        assert!((e - (0.125f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn recent_average_recurrence() {
        let mut avg = RecentAverage::new(100.0).unwrap();
        assert!((avg.update(0.5) - 0.0049504950495049506).abs() < 1e-15);
        assert!((avg.update(0.3) - 0.007871777276737576).abs() < 1e-15);
        assert!((avg.update(0.1) - 0.008783937897759976).abs() < 1e-15);
    }

    #[test]
    fn zero_window_tracks_last_sample() {
        let mut avg = RecentAverage::new(0.0).unwrap();
        avg.update(0.4);
        assert_eq!(avg.update(0.2), 0.2);
    }

    #[test]
    fn rejects_negative_window() {
        assert!(RecentAverage::new(-1.0).is_err());
    }
}
