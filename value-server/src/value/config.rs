//! Engine configuration.

/// Configuration parameters for index computation and ranking.
#[derive(Debug, Clone)]
pub struct ValueConfig {
    /// Historical comparison window in years, used when a request does not
    /// specify one.
    pub window_years: u32,

    /// Maximum number of candidate destinations evaluated concurrently
    /// during a ranking. Bounds the fan-out against the providers.
    pub batch_width: usize,
}

impl ValueConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(window_years: u32, batch_width: usize) -> Self {
        Self {
            window_years,
            batch_width,
        }
    }
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            window_years: 20,
            batch_width: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ValueConfig::default();
        assert_eq!(config.window_years, 20);
        assert_eq!(config.batch_width, 20);
    }

    #[test]
    fn custom_config() {
        let config = ValueConfig::new(10, 4);
        assert_eq!(config.window_years, 10);
        assert_eq!(config.batch_width, 4);
    }
}
