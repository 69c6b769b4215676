//! Records Configuration

use std::time::Duration;

use platform::ThrottleSettings;

#[derive(Debug, Clone)]
pub struct RecordsConfig {
    /// Key for a hosted records API; recorded but unused by the mock source
    pub api_key: Option<String>,
    /// Quota and cache settings shared by the three lookups
    pub throttle: ThrottleSettings,
    /// Simulated latency range of the mock source
    pub mock_latency: (Duration, Duration),
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            throttle: ThrottleSettings::default(),
            mock_latency: (Duration::from_millis(500), Duration::from_millis(1500)),
        }
    }
}
