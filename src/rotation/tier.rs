//! Retention tiers.

use std::fmt;

use chrono::Duration;

/// One retention granularity, ordered from shortest to longest window.
///
/// Each tier pairs with the next coarser tier for promotion; the monthly
/// tier is terminal and has no rotation-boundary exemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl Tier {
    /// All tiers in evaluation order.
    pub const ALL: [Tier; 4] = [Tier::Hourly, Tier::Daily, Tier::Weekly, Tier::Monthly];

    /// The next coarser tier a boundary snapshot is promoted into, or
    /// `None` for the terminal monthly tier.
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Hourly => Some(Tier::Daily),
            Tier::Daily => Some(Tier::Weekly),
            Tier::Weekly => Some(Tier::Monthly),
            Tier::Monthly => None,
        }
    }

    /// The duration of one period of this tier. A "month" is a fixed
    /// 28-day (4-week) approximation, not a calendar month.
    pub fn unit(self) -> Duration {
        match self {
            Tier::Hourly => Duration::hours(1),
            Tier::Daily => Duration::hours(24),
            Tier::Weekly => Duration::hours(24 * 7),
            Tier::Monthly => Duration::hours(24 * 28),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Hourly => "hourly",
            Tier::Daily => "daily",
            Tier::Weekly => "weekly",
            Tier::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_pairing() {
        assert_eq!(Tier::Hourly.next(), Some(Tier::Daily));
        assert_eq!(Tier::Daily.next(), Some(Tier::Weekly));
        assert_eq!(Tier::Weekly.next(), Some(Tier::Monthly));
        assert_eq!(Tier::Monthly.next(), None);
    }

    #[test]
    fn test_tier_units() {
        assert_eq!(Tier::Hourly.unit(), Duration::hours(1));
        assert_eq!(Tier::Daily.unit(), Duration::days(1));
        assert_eq!(Tier::Weekly.unit(), Duration::days(7));
        assert_eq!(Tier::Monthly.unit(), Duration::days(28));
    }

    #[test]
    fn test_tier_order() {
        let mut sorted = Tier::ALL;
        sorted.sort();
        assert_eq!(sorted, Tier::ALL);
    }
}
