//! Type-safe wrappers and enums for MLB statistics queries.

pub mod ids;
pub mod selection;
pub mod time;

pub use ids::{GamePk, PlayerId, TeamId};
pub use selection::{ComparisonKind, Handedness, PlayerRole, SortDirection, StatGroup};
pub use time::{GameDate, Season};
