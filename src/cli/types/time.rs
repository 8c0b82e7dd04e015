//! Time-related types for MLB seasons and game dates.

use crate::config::SeasonBounds;
use crate::error::{HanksTankError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The calendar year on the local clock.
    pub fn current() -> Self {
        Self(u16::try_from(Local::now().year()).unwrap_or(u16::MAX))
    }

    /// Reject seasons the backend has no data for.
    pub fn within(self, bounds: &SeasonBounds) -> Result<Self> {
        if self.0 < bounds.min || self.0 > bounds.max {
            return Err(HanksTankError::InvalidSeason {
                season: self.0,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(self)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = HanksTankError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Calendar date of a schedule query, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameDate(pub NaiveDate);

impl GameDate {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl Default for GameDate {
    fn default() -> Self {
        Self::today()
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for GameDate {
    type Err = HanksTankError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| HanksTankError::InvalidDate {
                value: s.to_string(),
            })
    }
}
