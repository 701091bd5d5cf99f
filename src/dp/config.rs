//! DP configuration.

/// Configuration for the knapsack DP.
///
/// # Examples
///
/// ```
/// use u_mokp::dp::DpConfig;
///
/// let config = DpConfig::default()
///     .with_parallel(true)
///     .with_parallel_threshold(4096)
///     .with_time_limit_ms(30_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DpConfig {
    /// Split each item's capacity pass across rayon workers.
    ///
    /// Only honoured when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Minimum number of capacity slots (`W + 1`) before a pass is
    /// parallelised. Small tables run faster sequentially.
    pub parallel_threshold: usize,

    /// Wall-clock budget in milliseconds. `None` = no limit.
    ///
    /// Checked before each item; when exceeded the run stops with the last
    /// completed generation and reports itself as cancelled.
    pub time_limit_ms: Option<u64>,
}

impl Default for DpConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: 1024,
            time_limit_ms: None,
        }
    }
}

impl DpConfig {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_threshold(mut self, slots: usize) -> Self {
        self.parallel_threshold = slots;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel_threshold == 0 {
            return Err("parallel_threshold must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DpConfig::default();
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 1024);
        assert_eq!(config.time_limit_ms, None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(DpConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_threshold() {
        let config = DpConfig::default().with_parallel_threshold(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = DpConfig::default().with_time_limit_ms(0);
        assert!(config.validate().is_err());
    }
}
