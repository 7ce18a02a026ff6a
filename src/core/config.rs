//! Game settings.
//!
//! `Configuration` holds the house rules for one game: the steal cap, whether
//! a gift may go straight back to the player who just lost it, and the timer
//! settings read by the (external) countdown widget.
//!
//! Settings change one field at a time through `ConfigUpdate`. Updates carry
//! signed payloads so that out-of-range requests can be expressed and then
//! rejected, leaving the configuration unchanged.

use serde::{Deserialize, Serialize};

/// Default number of times a single gift may be stolen.
pub const DEFAULT_MAX_STEALS: u32 = 3;

/// Default timer duration in seconds.
pub const DEFAULT_TIMER_DURATION_SECS: u32 = 30;

/// House rules for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// How many times a single gift may be stolen (0 disables stealing).
    pub max_steals: u32,

    /// Whether a player may steal a gift from whoever just took it from them.
    pub allow_steal_backs: bool,

    /// Whether the countdown timer is shown.
    pub timer_enabled: bool,

    /// Countdown length in seconds. Always positive.
    pub default_timer_duration_secs: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_steals: DEFAULT_MAX_STEALS,
            allow_steal_backs: false,
            timer_enabled: false,
            default_timer_duration_secs: DEFAULT_TIMER_DURATION_SECS,
        }
    }
}

impl Configuration {
    /// Set the steal cap.
    #[must_use]
    pub fn with_max_steals(mut self, max_steals: u32) -> Self {
        self.max_steals = max_steals;
        self
    }

    /// Allow or forbid immediate steal-backs.
    #[must_use]
    pub fn with_steal_backs(mut self, allow: bool) -> Self {
        self.allow_steal_backs = allow;
        self
    }

    /// Enable the timer with the given duration.
    ///
    /// A zero duration keeps the current one.
    #[must_use]
    pub fn with_timer(mut self, duration_secs: u32) -> Self {
        self.timer_enabled = true;
        if duration_secs > 0 {
            self.default_timer_duration_secs = duration_secs;
        }
        self
    }

    /// Check whether every field is in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.default_timer_duration_secs > 0
    }

    /// Apply a single-field update.
    ///
    /// Returns `None` if the value is out of range for its field; the caller
    /// keeps the old configuration in that case.
    #[must_use]
    pub fn updated(&self, update: ConfigUpdate) -> Option<Self> {
        let mut next = *self;
        match update {
            ConfigUpdate::MaxSteals(value) => {
                next.max_steals = u32::try_from(value).ok()?;
            }
            ConfigUpdate::AllowStealBacks(value) => next.allow_steal_backs = value,
            ConfigUpdate::TimerEnabled(value) => next.timer_enabled = value,
            ConfigUpdate::DefaultTimerDurationSecs(value) => {
                next.default_timer_duration_secs =
                    u32::try_from(value).ok().filter(|&secs| secs > 0)?;
            }
        }
        Some(next)
    }
}

/// A request to change one configuration field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigUpdate {
    /// Must be `>= 0`.
    MaxSteals(i64),
    AllowStealBacks(bool),
    TimerEnabled(bool),
    /// Must be `> 0`.
    DefaultTimerDurationSecs(i64),
}

impl ConfigUpdate {
    /// Field name, for logs.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            ConfigUpdate::MaxSteals(_) => "max_steals",
            ConfigUpdate::AllowStealBacks(_) => "allow_steal_backs",
            ConfigUpdate::TimerEnabled(_) => "timer_enabled",
            ConfigUpdate::DefaultTimerDurationSecs(_) => "default_timer_duration_secs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Configuration::default();
        assert_eq!(config.max_steals, 3);
        assert!(!config.allow_steal_backs);
        assert!(!config.timer_enabled);
        assert_eq!(config.default_timer_duration_secs, 30);
        assert!(config.is_valid());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Configuration::default()
            .with_max_steals(1)
            .with_steal_backs(true)
            .with_timer(45);

        assert_eq!(config.max_steals, 1);
        assert!(config.allow_steal_backs);
        assert!(config.timer_enabled);
        assert_eq!(config.default_timer_duration_secs, 45);
    }

    #[test]
    fn test_update_merges_single_field() {
        let config = Configuration::default();

        let updated = config.updated(ConfigUpdate::MaxSteals(0)).unwrap();
        assert_eq!(updated.max_steals, 0);
        assert_eq!(updated.default_timer_duration_secs, config.default_timer_duration_secs);

        let updated = config.updated(ConfigUpdate::TimerEnabled(true)).unwrap();
        assert!(updated.timer_enabled);
        assert_eq!(updated.max_steals, config.max_steals);
    }

    #[test]
    fn test_update_rejects_out_of_range() {
        let config = Configuration::default();

        assert_eq!(config.updated(ConfigUpdate::MaxSteals(-1)), None);
        assert_eq!(config.updated(ConfigUpdate::DefaultTimerDurationSecs(0)), None);
        assert_eq!(config.updated(ConfigUpdate::DefaultTimerDurationSecs(-5)), None);
        assert_eq!(config.updated(ConfigUpdate::MaxSteals(i64::MAX)), None);
    }

    #[test]
    fn test_update_field_names() {
        assert_eq!(ConfigUpdate::MaxSteals(1).field(), "max_steals");
        assert_eq!(ConfigUpdate::AllowStealBacks(true).field(), "allow_steal_backs");
    }

    #[test]
    fn test_serialization() {
        let config = Configuration::default().with_max_steals(2);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
