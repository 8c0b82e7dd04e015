//! Enums for the selections a report is built from.

use std::fmt;

/// Sort direction passed to leaderboard endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the ball a stat line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum StatGroup {
    Batting,
    Pitching,
}

impl StatGroup {
    /// Default sort key used by the backend leaderboards.
    pub fn default_sort_stat(&self) -> &'static str {
        match self {
            StatGroup::Batting => "ops",
            StatGroup::Pitching => "era",
        }
    }

    /// Batting leaderboards lead with the best OPS, pitching with the lowest ERA.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            StatGroup::Batting => SortDirection::Desc,
            StatGroup::Pitching => SortDirection::Asc,
        }
    }
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatGroup::Batting => f.write_str("batting"),
            StatGroup::Pitching => f.write_str("pitching"),
        }
    }
}

/// Player role accepted by the player detail and statcast endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum PlayerRole {
    #[default]
    Batter,
    Pitcher,
}

impl PlayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerRole::Batter => "batter",
            PlayerRole::Pitcher => "pitcher",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pitcher or batter handedness for statcast filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Handedness {
    L,
    R,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::L => "L",
            Handedness::R => "R",
        }
    }
}

/// Season comparison report flavour.
///
/// Team comparisons list every team per season; league comparisons collapse
/// each season to the mean of every numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ComparisonKind {
    TeamBatting,
    TeamPitching,
    LeagueBatting,
    LeaguePitching,
}

impl ComparisonKind {
    pub fn group(&self) -> StatGroup {
        match self {
            ComparisonKind::TeamBatting | ComparisonKind::LeagueBatting => StatGroup::Batting,
            ComparisonKind::TeamPitching | ComparisonKind::LeaguePitching => StatGroup::Pitching,
        }
    }

    pub fn is_league_average(&self) -> bool {
        matches!(
            self,
            ComparisonKind::LeagueBatting | ComparisonKind::LeaguePitching
        )
    }
}
