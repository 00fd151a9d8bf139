//! Online summary statistics
use std::fmt;

/// Online mean and variance calculation (Welford) with min/max tracking.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OnlineStats {
    mean: f64,
    squared_residual_sum: f64,
    min: f64,
    max: f64,
    count: u64,
}

impl Default for OnlineStats {
    fn default() -> Self {
        Self {
            mean: 0.0,
            squared_residual_sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }
}

impl OnlineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new value to the calculation.
    pub fn push(&mut self, value: f64) {
        let residual_pre = value - self.mean;
        self.count += 1;
        self.mean += residual_pre / self.count as f64;
        self.squared_residual_sum += residual_pre * (value - self.mean);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Number of accumulated values.
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Mean of all accumulated values. Zero when empty.
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance of all accumulated values. Zero when empty.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.squared_residual_sum / self.count as f64
        }
    }

    /// Population standard deviation of all accumulated values.
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest accumulated value, if any.
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then(|| self.min)
    }

    /// Largest accumulated value, if any.
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then(|| self.max)
    }
}

impl fmt::Display for OnlineStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.count == 0 {
            return write!(f, "(empty)");
        }
        write!(
            f,
            "{:.3} (min {:.3}, max {:.3}, n {})",
            self.mean, self.min, self.max, self.count
        )
    }
}

impl Extend<f64> for OnlineStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for OnlineStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect() {
        let stats: OnlineStats = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
        assert!((stats.mean() - 2.5).abs() < 1e-8);
        assert!((stats.variance() - 1.25).abs() < 1e-8);
        assert_eq!(stats.min(), Some(1.0));
        assert_eq!(stats.max(), Some(4.0));
        assert_eq!(stats.count(), 4);
    }

    #[test]
    fn empty() {
        let stats = OnlineStats::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
        assert_eq!(stats.to_string(), "(empty)");
    }

    #[test]
    fn single_value() {
        let mut stats = OnlineStats::new();
        stats.push(3.0);
        assert_eq!(stats.mean(), 3.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.min(), Some(3.0));
        assert_eq!(stats.max(), Some(3.0));
    }
}
