//! Environment-driven configuration.
//!
//! Every setting has a default so the CLI works with no environment at all:
//!
//! ```bash
//! export HANKS_TANK_API_URL=http://localhost:8080/api
//! export HANKS_TANK_MIN_SEASON=2015
//! export HANKS_TANK_MAX_SEASON=2026
//! ```

use crate::{
    cli::types::Season,
    error::{HanksTankError, Result},
    API_URL_ENV_VAR, CACHE_ENV_VAR, DEFAULT_SEASON_ENV_VAR, MAX_SEASON_ENV_VAR,
    MIN_SEASON_ENV_VAR,
};

/// Backend used when `HANKS_TANK_API_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "https://hankstank.uc.r.appspot.com/api";

/// Public MLB Stats API, called directly for schedules and live feeds.
pub const MLB_STATS_API_URL: &str = "https://statsapi.mlb.com/api";

pub const DEFAULT_MIN_SEASON: u16 = 2015;
pub const DEFAULT_MAX_SEASON: u16 = 2026;

/// Range of seasons the backend serves, plus the one used when none is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonBounds {
    pub default: Season,
    pub min: u16,
    pub max: u16,
}

impl SeasonBounds {
    /// Seasons newest first, as offered by the year selector.
    pub fn available(&self) -> Vec<Season> {
        (self.min..=self.max).rev().map(Season::new).collect()
    }

    /// Use the requested season or the default one, then check it is served.
    pub fn resolve(&self, requested: Option<Season>) -> Result<Season> {
        requested.unwrap_or(self.default).within(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub seasons: SeasonBounds,
    pub cache_enabled: bool,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let parse_year = |key: &str, fallback: u16| -> Result<u16> {
            match read(key) {
                Some(raw) => raw.parse::<u16>().map_err(|_| HanksTankError::Config {
                    message: format!("{key} must be a year, got '{raw}'"),
                }),
                None => Ok(fallback),
            }
        };

        let min = parse_year(MIN_SEASON_ENV_VAR, DEFAULT_MIN_SEASON)?;
        let max = parse_year(MAX_SEASON_ENV_VAR, DEFAULT_MAX_SEASON)?;
        if min > max {
            return Err(HanksTankError::Config {
                message: format!(
                    "{MIN_SEASON_ENV_VAR} ({min}) is after {MAX_SEASON_ENV_VAR} ({max})"
                ),
            });
        }
        // Outside the served range, the calendar year falls back to the nearest bound
        let current = Season::current().as_u16().clamp(min, max);
        let default = Season::new(parse_year(DEFAULT_SEASON_ENV_VAR, current)?);

        let api_base_url = read(API_URL_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let cache_enabled = read(CACHE_ENV_VAR)
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Ok(Self {
            api_base_url,
            seasons: SeasonBounds { default, min, max },
            cache_enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.seasons.min, 2015);
        assert_eq!(config.seasons.max, 2026);
        assert_eq!(
            config.seasons.default,
            Season::new(Season::current().as_u16().clamp(2015, 2026))
        );
        assert!(config.cache_enabled);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = Config::from_lookup(lookup(&[
            (API_URL_ENV_VAR, "http://localhost:8080/api/"),
            (DEFAULT_SEASON_ENV_VAR, "2024"),
            (MIN_SEASON_ENV_VAR, "2020"),
            (MAX_SEASON_ENV_VAR, "2025"),
            (CACHE_ENV_VAR, "FALSE"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.seasons.default, Season::new(2024));
        assert_eq!(config.seasons.min, 2020);
        assert_eq!(config.seasons.max, 2025);
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[(API_URL_ENV_VAR, "  ")])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_invalid_year_is_config_error() {
        let err = Config::from_lookup(lookup(&[(MIN_SEASON_ENV_VAR, "soon")])).unwrap_err();
        match err {
            HanksTankError::Config { message } => assert!(message.contains(MIN_SEASON_ENV_VAR)),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = Config::from_lookup(lookup(&[
            (MIN_SEASON_ENV_VAR, "2026"),
            (MAX_SEASON_ENV_VAR, "2015"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_available_seasons_newest_first() {
        let bounds = SeasonBounds {
            default: Season::new(2024),
            min: 2022,
            max: 2024,
        };
        assert_eq!(
            bounds.available(),
            vec![Season::new(2024), Season::new(2023), Season::new(2022)]
        );
    }

    #[test]
    fn test_resolve_uses_default_and_checks_bounds() {
        let bounds = SeasonBounds {
            default: Season::new(2024),
            min: 2015,
            max: 2026,
        };
        assert_eq!(bounds.resolve(None).unwrap(), Season::new(2024));
        assert_eq!(bounds.resolve(Some(Season::new(2019))).unwrap(), Season::new(2019));
        assert!(bounds.resolve(Some(Season::new(2030))).is_err());
    }
}
