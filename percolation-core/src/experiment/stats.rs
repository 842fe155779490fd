//! Summary statistics over percolation threshold samples.

use crate::error::{ExperimentError, Result};

/// Two-sided 95% quantile of the standard normal distribution.
const CONFIDENCE_95: f64 = 1.96;

/// Sample mean, sample standard deviation, and 95% confidence interval of a
/// set of threshold samples.
///
/// # Examples
/// ```
/// use percolation_core::ThresholdStats;
///
/// let stats = ThresholdStats::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])?;
/// assert_eq!(stats.mean(), 5.0);
/// assert!((stats.stddev() - 2.138_089_935).abs() < 1e-9);
/// assert!(stats.confidence_lo() < stats.mean());
/// assert!(stats.confidence_hi() > stats.mean());
/// # Ok::<(), percolation_core::ExperimentError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdStats {
    mean: f64,
    stddev: f64,
    trials: usize,
}

impl ThresholdStats {
    /// Computes statistics over `samples`.
    ///
    /// The standard deviation uses the `T - 1` denominator and is zero for a
    /// single sample.
    ///
    /// # Errors
    /// Returns [`ExperimentError::EmptySamples`] when `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        let trials = samples.len();
        if trials == 0 {
            return Err(ExperimentError::EmptySamples);
        }

        let count = trials as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let stddev = if trials == 1 {
            0.0
        } else {
            let squares: f64 = samples.iter().map(|sample| (sample - mean).powi(2)).sum();
            (squares / (count - 1.0)).sqrt()
        };

        Ok(Self {
            mean,
            stddev,
            trials,
        })
    }

    /// Sample mean.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation.
    #[must_use]
    pub const fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Number of samples aggregated.
    #[must_use]
    pub const fn trials(&self) -> usize {
        self.trials
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev / (self.trials as f64).sqrt()
    }

    /// Low endpoint of the 95% confidence interval.
    #[must_use]
    pub fn confidence_lo(&self) -> f64 {
        self.mean - self.half_width()
    }

    /// High endpoint of the 95% confidence interval.
    #[must_use]
    pub fn confidence_hi(&self) -> f64 {
        self.mean + self.half_width()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn rejects_empty_samples() {
        assert_eq!(
            ThresholdStats::from_samples(&[]),
            Err(ExperimentError::EmptySamples)
        );
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let stats = ThresholdStats::from_samples(&[12.0]).expect("one sample is enough");
        assert_close(stats.mean(), 12.0);
        assert_close(stats.stddev(), 0.0);
        assert_close(stats.confidence_lo(), 12.0);
        assert_close(stats.confidence_hi(), 12.0);
    }

    #[rstest]
    #[case(&[1.0, 3.0], 2.0, std::f64::consts::SQRT_2)]
    #[case(&[5.0, 5.0, 5.0], 5.0, 0.0)]
    #[case(&[0.5, 0.6, 0.7, 0.8], 0.65, 0.129_099_444_873_580_56)]
    fn computes_mean_and_sample_stddev(
        #[case] samples: &[f64],
        #[case] mean: f64,
        #[case] stddev: f64,
    ) {
        let stats = ThresholdStats::from_samples(samples).expect("samples are non-empty");
        assert_close(stats.mean(), mean);
        assert_close(stats.stddev(), stddev);
        assert_eq!(stats.trials(), samples.len());
    }

    #[test]
    fn confidence_interval_is_symmetric_about_mean() {
        let stats = ThresholdStats::from_samples(&[1.0, 3.0]).expect("samples are non-empty");
        let half_width = 1.96 * std::f64::consts::SQRT_2 / 2.0_f64.sqrt();
        assert_close(stats.confidence_lo(), 2.0 - half_width);
        assert_close(stats.confidence_hi(), 2.0 + half_width);
    }
}
