//! Summary statistics over a record's measurements

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean, sample standard deviation and median of a measurement series.
///
/// `std_dev` uses Bessel's correction (n − 1 denominator) and is exactly
/// `0.0` for a single measurement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    mean: f64,
    std_dev: f64,
    median: f64,
}

impl Statistics {
    /// Compute statistics for a series.
    ///
    /// Returns `None` for an empty series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_measurements(values: &[i32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;

        let std_dev = if values.len() == 1 {
            0.0
        } else {
            let sum_sq: f64 = values
                .iter()
                .map(|&v| {
                    let d = f64::from(v) - mean;
                    d * d
                })
                .sum();
            (sum_sq / (n - 1.0)).sqrt()
        };

        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
        } else {
            f64::from(sorted[mid])
        };

        Some(Self {
            mean,
            std_dev,
            median,
        })
    }

    /// Get the arithmetic mean.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Get the sample standard deviation.
    #[must_use]
    pub const fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Get the median.
    #[must_use]
    pub const fn median(&self) -> f64 {
        self.median
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average: {}", self.mean)?;
        writeln!(f, "Standard Deviation: {}", self.std_dev)?;
        write!(f, "Median: {}", self.median)
    }
}
