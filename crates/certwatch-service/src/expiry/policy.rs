//! Thresholds deciding what the sweep does with a client.

use serde::{Deserialize, Serialize};

use certwatch_core::config::ExpiryConfig;
use certwatch_entity::notification::Severity;

/// Notification thresholds, in days remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    /// Clients at or below this many days get an "expiring soon" notice.
    pub warning_window_days: i64,
    /// Notices at or below this many days are raised as `danger`.
    pub danger_window_days: i64,
}

/// What the sweep should do with one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryDecision {
    /// Past due: mark expired and raise the expired notice.
    Expired,
    /// Inside the warning window: raise an "expiring soon" notice.
    Approaching(Severity),
    /// Nothing to do.
    Valid,
}

impl ExpiryPolicy {
    /// Decide the action for a client with `days` remaining.
    pub fn decide(&self, days: i64) -> ExpiryDecision {
        if days < 0 {
            ExpiryDecision::Expired
        } else if days <= self.warning_window_days {
            let severity = if days <= self.danger_window_days {
                Severity::Danger
            } else {
                Severity::Warning
            };
            ExpiryDecision::Approaching(severity)
        } else {
            ExpiryDecision::Valid
        }
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            warning_window_days: 5,
            danger_window_days: 2,
        }
    }
}

impl From<&ExpiryConfig> for ExpiryPolicy {
    fn from(config: &ExpiryConfig) -> Self {
        Self {
            warning_window_days: config.warning_window_days,
            danger_window_days: config.danger_window_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = ExpiryPolicy::default();
        assert_eq!(policy.decide(-30), ExpiryDecision::Expired);
        assert_eq!(policy.decide(-1), ExpiryDecision::Expired);
        assert_eq!(policy.decide(0), ExpiryDecision::Approaching(Severity::Danger));
        assert_eq!(policy.decide(2), ExpiryDecision::Approaching(Severity::Danger));
        assert_eq!(policy.decide(3), ExpiryDecision::Approaching(Severity::Warning));
        assert_eq!(policy.decide(5), ExpiryDecision::Approaching(Severity::Warning));
        assert_eq!(policy.decide(6), ExpiryDecision::Valid);
    }

    #[test]
    fn test_from_config() {
        let config = ExpiryConfig {
            warning_window_days: 10,
            danger_window_days: 3,
            ..ExpiryConfig::default()
        };
        let policy = ExpiryPolicy::from(&config);
        assert_eq!(policy.decide(10), ExpiryDecision::Approaching(Severity::Warning));
        assert_eq!(policy.decide(3), ExpiryDecision::Approaching(Severity::Danger));
        assert_eq!(policy.decide(11), ExpiryDecision::Valid);
    }
}
