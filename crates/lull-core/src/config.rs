// ── Runtime notifier configuration ──
//
// Describes how a DebounceChangeNotifier paces its drains. Core never
// reads files or the environment; hosts build this (directly or through
// `lull-config`) and hand it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for a single [`DebounceChangeNotifier`](crate::DebounceChangeNotifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Quiescence interval: how long the monitor sleeps between drains.
    #[serde(with = "interval_millis", rename = "interval_ms")]
    pub interval: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl NotifierConfig {
    /// Build a config with the given interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    /// Build a config from an interval in milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self::with_interval(Duration::from_millis(millis))
    }

    /// Reject configurations the monitor cannot run with.
    ///
    /// A zero interval would turn the monitor into a busy loop.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.interval.is_zero() {
            return Err(CoreError::InvalidConfig {
                field: "interval".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

mod interval_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_is_valid() {
        let config = NotifierConfig::default();
        assert_eq!(config.interval, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = NotifierConfig::from_millis(0).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { ref field, .. } if field == "interval"));
    }
}
