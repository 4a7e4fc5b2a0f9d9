//! AuctionDuration - how long an auction runs once published.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Auction length: one of the fixed day counts the marketplace offers, or
/// a custom length derived from an end date the seller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionDuration {
    OneDay,
    ThreeDays,
    SevenDays,
    FourteenDays,
    ThirtyDays,
    Custom,
}

impl AuctionDuration {
    /// Fixed durations in the order the form lists them.
    pub const FIXED: [AuctionDuration; 5] = [
        AuctionDuration::OneDay,
        AuctionDuration::ThreeDays,
        AuctionDuration::SevenDays,
        AuctionDuration::FourteenDays,
        AuctionDuration::ThirtyDays,
    ];

    /// Returns the day count for fixed durations, `None` for `Custom`.
    pub fn fixed_days(&self) -> Option<u32> {
        match self {
            AuctionDuration::OneDay => Some(1),
            AuctionDuration::ThreeDays => Some(3),
            AuctionDuration::SevenDays => Some(7),
            AuctionDuration::FourteenDays => Some(14),
            AuctionDuration::ThirtyDays => Some(30),
            AuctionDuration::Custom => None,
        }
    }

    /// Returns the fixed duration for a day count, if the marketplace offers one.
    pub fn from_days(days: u32) -> Option<Self> {
        Self::FIXED
            .iter()
            .copied()
            .find(|d| d.fixed_days() == Some(days))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, AuctionDuration::Custom)
    }

    /// The form value: the day count, or `"custom"`.
    pub fn as_form_value(&self) -> String {
        match self.fixed_days() {
            Some(days) => days.to_string(),
            None => "custom".to_string(),
        }
    }

    /// Whole days from `today` until `end`, rounding a partial day up.
    ///
    /// Dates in the past yield 0, which the quantity step rejects.
    pub fn days_until(end: NaiveDate, today: NaiveDate) -> u32 {
        let days = (end - today).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for AuctionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_days() {
            Some(1) => write!(f, "1 day"),
            Some(days) => write!(f, "{} days", days),
            None => write!(f, "Custom"),
        }
    }
}

impl FromStr for AuctionDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("custom") {
            return Ok(AuctionDuration::Custom);
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(AuctionDuration::from_days)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "price.auction_duration",
                    format!("'{}' is not an offered auction duration", trimmed),
                )
            })
    }
}
