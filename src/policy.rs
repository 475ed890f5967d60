//! Retention policy: the validated, resolved configuration value the
//! engine evaluates against.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use thiserror::Error;

use crate::config::Config;
use crate::rotation::calendar;
use crate::rotation::tier::Tier;

/// Tier counts and rotation anchors, immutable for the lifetime of one
/// invocation.
///
/// Built from raw [`Config`] by [`RetentionPolicy::from_config`], which
/// validates the rotation hour and parses the weekday name (the config
/// keeps it as a string, the policy holds the parsed value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Hours of hourly history to keep.
    pub hourly: u32,
    /// Days of daily history to keep.
    pub daily: u32,
    /// Weeks of weekly history to keep.
    pub weekly: u32,
    /// Months (28-day approximation) of monthly history to keep.
    pub monthly: u32,
    /// Never delete if fewer than this many snapshots would remain.
    pub minimum: usize,
    /// Hour of day (0-23) at which an hourly snapshot is promoted to the
    /// daily tier.
    pub daily_rotation_hour: u32,
    /// Weekday on which a daily snapshot is promoted to the weekly tier
    /// (and, via first-occurrence-in-month, weekly to monthly).
    pub weekly_rotation_weekday: Weekday,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            hourly: 12,
            daily: 7,
            weekly: 4,
            monthly: 3,
            minimum: 10,
            daily_rotation_hour: 23,
            weekly_rotation_weekday: Weekday::Sun,
        }
    }
}

impl RetentionPolicy {
    /// Build a policy from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the rotation hour is outside 0-23 or the
    /// weekday name does not parse.
    pub fn from_config(config: &Config) -> Result<Self, PolicyError> {
        if config.rotation.daily > 23 {
            return Err(PolicyError::InvalidRotationHour(config.rotation.daily));
        }

        let weekday = config
            .rotation
            .weekly
            .parse::<Weekday>()
            .map_err(|_| PolicyError::InvalidRotationWeekday(config.rotation.weekly.clone()))?;

        Ok(Self {
            hourly: config.retention.hourly,
            daily: config.retention.daily,
            weekly: config.retention.weekly,
            monthly: config.retention.monthly,
            minimum: config.retention.minimum,
            daily_rotation_hour: config.rotation.daily,
            weekly_rotation_weekday: weekday,
        })
    }

    /// How many periods of history the given tier keeps.
    pub fn count(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Hourly => self.hourly,
            Tier::Daily => self.daily,
            Tier::Weekly => self.weekly,
            Tier::Monthly => self.monthly,
        }
    }

    /// The age window of a tier: count × tier unit. Snapshots strictly
    /// older than this are deletion candidates under that tier's pass.
    pub fn max_age(&self, tier: Tier) -> Duration {
        tier.unit() * self.count(tier) as i32
    }

    /// Whether `t` lands on `tier`'s rotation boundary, i.e. whether a
    /// snapshot aging out of the tier is the canonical sample for the
    /// next coarser tier.
    ///
    /// - Hourly: taken at the daily promotion hour.
    /// - Daily: taken on the weekly promotion weekday.
    /// - Weekly: taken on the first occurrence of the promotion weekday
    ///   within the calendar month containing `t`.
    /// - Monthly: terminal tier, never a boundary.
    pub fn is_rotation_boundary(&self, t: DateTime<Utc>, tier: Tier) -> bool {
        match tier {
            Tier::Hourly => t.hour() == self.daily_rotation_hour,
            Tier::Daily => t.weekday() == self.weekly_rotation_weekday,
            Tier::Weekly => {
                match calendar::first_weekday_of_month(
                    t.year(),
                    t.month(),
                    self.weekly_rotation_weekday,
                ) {
                    Some(date) => t.day() == date.day(),
                    None => false,
                }
            }
            Tier::Monthly => false,
        }
    }
}

/// Errors from policy construction.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Rotation hour outside 0-23.
    #[error("invalid rotation hour {0}: must be between 0 and 23")]
    InvalidRotationHour(u32),

    /// Unrecognized weekday name.
    #[error("invalid rotation weekday '{0}'")]
    InvalidRotationWeekday(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_default_config_builds_default_policy() {
        let policy = RetentionPolicy::from_config(&Config::default()).unwrap();
        assert_eq!(policy, RetentionPolicy::default());
    }

    #[test]
    fn test_weekday_names_parse_case_insensitively() {
        let mut config = Config::default();
        for name in ["monday", "Monday", "MON", "mon"] {
            config.rotation.weekly = name.to_string();
            let policy = RetentionPolicy::from_config(&config).unwrap();
            assert_eq!(policy.weekly_rotation_weekday, Weekday::Mon);
        }
    }

    #[test]
    fn test_invalid_rotation_hour() {
        let mut config = Config::default();
        config.rotation.daily = 24;
        assert!(matches!(
            RetentionPolicy::from_config(&config),
            Err(PolicyError::InvalidRotationHour(24))
        ));
    }

    #[test]
    fn test_invalid_weekday_name() {
        let mut config = Config::default();
        config.rotation.weekly = "someday".to_string();
        assert!(matches!(
            RetentionPolicy::from_config(&config),
            Err(PolicyError::InvalidRotationWeekday(_))
        ));
    }

    #[test]
    fn test_max_age_per_tier() {
        let policy = RetentionPolicy::default();
        assert_eq!(policy.max_age(Tier::Hourly), Duration::hours(12));
        assert_eq!(policy.max_age(Tier::Daily), Duration::days(7));
        assert_eq!(policy.max_age(Tier::Weekly), Duration::days(28));
        assert_eq!(policy.max_age(Tier::Monthly), Duration::days(84));
    }

    #[test]
    fn test_hourly_boundary_is_daily_rotation_hour() {
        let policy = RetentionPolicy::default();
        assert!(policy.is_rotation_boundary(dt(2024, 3, 14, 23), Tier::Hourly));
        assert!(!policy.is_rotation_boundary(dt(2024, 3, 14, 10), Tier::Hourly));
    }

    #[test]
    fn test_daily_boundary_is_weekly_rotation_weekday() {
        let policy = RetentionPolicy::default();
        // 2024-03-03 is a Sunday, 2024-03-04 a Monday.
        assert!(policy.is_rotation_boundary(dt(2024, 3, 3, 10), Tier::Daily));
        assert!(!policy.is_rotation_boundary(dt(2024, 3, 4, 10), Tier::Daily));
    }

    #[test]
    fn test_weekly_boundary_is_first_weekday_of_own_month() {
        let policy = RetentionPolicy::default();
        // First Sunday of February 2024 is the 4th.
        assert!(policy.is_rotation_boundary(dt(2024, 2, 4, 10), Tier::Weekly));
        // The second Sunday is not a boundary.
        assert!(!policy.is_rotation_boundary(dt(2024, 2, 11, 10), Tier::Weekly));
        // Neither is a non-Sunday with the same day-of-month in another
        // month (first Sunday of March 2024 is the 3rd).
        assert!(!policy.is_rotation_boundary(dt(2024, 3, 4, 10), Tier::Weekly));
        assert!(policy.is_rotation_boundary(dt(2024, 3, 3, 10), Tier::Weekly));
    }

    #[test]
    fn test_monthly_has_no_boundary() {
        let policy = RetentionPolicy::default();
        // Even a first-Sunday-at-23:00 timestamp is not a monthly boundary.
        assert!(!policy.is_rotation_boundary(dt(2024, 2, 4, 23), Tier::Monthly));
    }
}
