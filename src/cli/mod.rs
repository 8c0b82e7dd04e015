//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{
    ComparisonKind, GameDate, GamePk, Handedness, PlayerId, PlayerRole, Season, SortDirection,
    TeamId,
};

/// Arguments shared by the four leaderboard commands.
#[derive(Debug, Args)]
pub struct LeaderboardArgs {
    /// Season year (defaults to `HANKS_TANK_DEFAULT_SEASON` or the current year).
    #[clap(long, short)]
    pub year: Option<Season>,

    /// Stat to sort by, e.g. `ops`, `HR`, `era`.
    #[clap(long, short)]
    pub sort: Option<String>,

    /// Sort direction; batting defaults to desc, pitching to asc.
    #[clap(long, short, value_enum)]
    pub direction: Option<SortDirection>,

    /// Maximum rows to request (30 for teams, 100 for players).
    #[clap(long, short)]
    pub limit: Option<u32>,

    /// Only show rows whose name or team contains this text.
    #[clap(long)]
    pub search: Option<String>,

    /// Output results as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Team batting leaderboard.
    TeamBatting {
        #[clap(flatten)]
        args: LeaderboardArgs,
    },

    /// Team pitching leaderboard.
    TeamPitching {
        #[clap(flatten)]
        args: LeaderboardArgs,
    },

    /// Player batting leaderboard.
    PlayerBatting {
        #[clap(flatten)]
        args: LeaderboardArgs,
    },

    /// Player pitching leaderboard.
    PlayerPitching {
        #[clap(flatten)]
        args: LeaderboardArgs,
    },

    /// Division standings, best record first.
    Standings {
        #[clap(long, short)]
        year: Option<Season>,

        #[clap(long)]
        json: bool,
    },

    /// MLB and Braves headlines alongside the standings leaders.
    News {
        /// Only the Braves feed.
        #[clap(long)]
        braves: bool,

        /// Ask the backend to rebuild both feeds before reading them.
        #[clap(long)]
        refresh: bool,

        #[clap(long)]
        json: bool,
    },

    /// Games scheduled on a date, with a linescore summary for each.
    Games {
        /// Date as YYYY-MM-DD (defaults to today).
        #[clap(long, short)]
        date: Option<GameDate>,

        #[clap(long)]
        json: bool,
    },

    /// Linescore and lineups for one game.
    Boxscore {
        game_pk: GamePk,

        #[clap(long)]
        json: bool,
    },

    /// Roster moves, recent by default.
    Transactions {
        /// MLB team id, e.g. 144 for Atlanta.
        #[clap(long)]
        team_id: Option<TeamId>,

        /// Only moves of this type, e.g. "Trade" or "Signed as Free Agent".
        #[clap(long = "type")]
        type_desc: Option<String>,

        #[clap(long)]
        start_date: Option<GameDate>,

        #[clap(long)]
        end_date: Option<GameDate>,

        #[clap(long)]
        json: bool,
    },

    /// The same stats across several seasons.
    CompareSeasons {
        #[clap(long, short, value_enum)]
        kind: ComparisonKind,

        /// Seasons to compare (repeatable): `--season 2023 --season 2024`.
        #[clap(long = "season", required = true)]
        seasons: Vec<Season>,

        /// Stats to show (repeatable); defaults depend on the kind.
        #[clap(long = "stat")]
        stats: Vec<String>,

        /// Restrict team comparisons to one team (abbreviation or name).
        #[clap(long)]
        team: Option<String>,

        #[clap(long)]
        json: bool,
    },

    /// Head-to-head comparison of teams in one season.
    CompareTeams {
        /// Abbreviations or full names, e.g. `ATL "New York Mets"`.
        #[clap(required = true, num_args = 2..)]
        teams: Vec<String>,

        /// Compare pitching instead of batting.
        #[clap(long)]
        pitching: bool,

        /// Stats to show (repeatable); defaults depend on batting or pitching.
        #[clap(long = "stat")]
        stats: Vec<String>,

        #[clap(long, short)]
        year: Option<Season>,

        #[clap(long)]
        json: bool,
    },

    /// Head-to-head comparison of two to six players in one season.
    ComparePlayers {
        /// Player names (substring match), e.g. `"Ronald Acuna" Olson`.
        #[clap(required = true, num_args = 2..)]
        names: Vec<String>,

        /// Compare pitchers instead of hitters.
        #[clap(long)]
        pitching: bool,

        /// Compare one analysis category instead of the core line.
        #[clap(long)]
        category: Option<String>,

        #[clap(long, short)]
        year: Option<Season>,

        #[clap(long)]
        json: bool,
    },

    /// Advanced stats and league percentiles for one player.
    AnalyzePlayer {
        /// Player name (substring match).
        name: String,

        /// Look the player up on the pitching leaderboard.
        #[clap(long)]
        pitching: bool,

        /// Stat category: Overall, Power, Contact, Speed or Counting for
        /// batters; Overall, Strikeouts, Control, Results or Counting for pitchers.
        #[clap(long, short, default_value = "Overall")]
        category: String,

        /// Fielding position for batting benchmarks, e.g. `SS`.
        #[clap(long)]
        position: Option<String>,

        #[clap(long, short)]
        year: Option<Season>,

        #[clap(long)]
        json: bool,
    },

    /// Season details for one team.
    Team {
        /// Abbreviation, full name or MLB team id.
        team: String,

        #[clap(long, short)]
        year: Option<Season>,

        #[clap(long)]
        json: bool,
    },

    /// Raw detail payload for one player.
    Player {
        player_id: PlayerId,

        #[clap(long, value_enum, default_value = "batter")]
        role: PlayerRole,
    },

    /// Statcast pitch mix, optionally for one player.
    Statcast {
        #[clap(long)]
        player_id: Option<PlayerId>,

        #[clap(long, value_enum, default_value = "pitcher")]
        role: PlayerRole,

        /// Pitcher handedness.
        #[clap(long, value_enum, ignore_case = true)]
        p_throws: Option<Handedness>,

        /// Batter handedness.
        #[clap(long, value_enum, ignore_case = true)]
        stands: Option<Handedness>,

        /// Plate appearance outcome, e.g. `home_run`.
        #[clap(long)]
        events: Option<String>,

        #[clap(long, short)]
        year: Option<Season>,

        #[clap(long)]
        json: bool,
    },

    /// Stat columns the backend serves for a leaderboard.
    StatsAvailable {
        /// One of team-batting, team-pitching, player-batting, player-pitching.
        #[clap(long, default_value = "team-batting")]
        data_type: String,

        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "hanks-tank", about = "MLB stats, standings, news and box scores")]
pub struct Cli {
    /// Log debug output to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
