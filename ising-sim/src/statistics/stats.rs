use crate::error::{Result, SimError};

/// Running mean and population variance accumulator (Welford update).
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub count: usize,
    mean: f64,
    m2: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(values: &[f64]) -> Self {
        let mut stats = Self::new();
        for &v in values {
            stats.update(v);
        }
        stats
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn mean(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(SimError::EmptyWindow);
        }
        Ok(self.mean)
    }

    /// Population standard deviation (divides by `count`).
    pub fn std(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(SimError::EmptyWindow);
        }
        Ok((self.m2 / self.count as f64).max(0.0).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let stats = Statistics::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert_relative_eq!(stats.mean().unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(stats.std().unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_has_zero_std() {
        let stats = Statistics::from_slice(&[-32.0; 100]);
        assert_relative_eq!(stats.mean().unwrap(), -32.0);
        assert_eq!(stats.std().unwrap(), 0.0);
    }

    #[test]
    fn test_empty_window() {
        let stats = Statistics::new();
        assert_eq!(stats.mean(), Err(SimError::EmptyWindow));
        assert_eq!(stats.std(), Err(SimError::EmptyWindow));
    }
}
