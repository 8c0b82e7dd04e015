//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use hanks_tank::{
    api::{Leaderboard, LeaderboardQuery, StatcastQuery, TransactionQuery},
    cli::{types::StatGroup, Cli, Commands, LeaderboardArgs},
    commands::{
        analysis::{handle_analyze_player, AnalysisParams},
        available_stats::handle_stats_available,
        common::CommandContext,
        comparison::{
            handle_compare_seasons, handle_compare_teams, SeasonComparisonParams,
            TeamComparisonParams,
        },
        games::{handle_boxscore, handle_games},
        leaderboard::{handle_leaderboard, LeaderboardParams},
        news::handle_news,
        player::{handle_player, handle_statcast, StatcastParams},
        player_comparison::{handle_compare_players, PlayerComparisonParams},
        standings::handle_standings,
        team::handle_team,
        transactions::{handle_transactions, TransactionParams},
    },
    logging::setup_logging,
    CancelToken, Config, Result,
};
use tracing::{debug, info};

fn leaderboard_params(board: Leaderboard, args: LeaderboardArgs) -> LeaderboardParams {
    LeaderboardParams {
        board,
        season: args.year,
        query: LeaderboardQuery {
            sort_stat: args.sort,
            direction: args.direction,
            limit: args.limit,
        },
        search: args.search,
        as_json: args.json,
    }
}

fn group(pitching: bool) -> StatGroup {
    if pitching {
        StatGroup::Pitching
    } else {
        StatGroup::Batting
    }
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = Cli::parse();
    setup_logging(app.verbose)?;

    let config = Config::from_env()?;
    debug!(api = %config.api_base_url, cache = config.cache_enabled, "Configuration loaded");

    let base = CommandContext::from_config(&config)?;
    let _sweeper = base.api.spawn_cache_sweeper();

    // Ctrl-C abandons whatever requests are still in flight
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling requests");
            on_interrupt.cancel();
        }
    });
    let ctx = CommandContext::new(base.api.with_cancel(cancel), base.seasons);

    match app.command {
        Commands::TeamBatting { args } => {
            handle_leaderboard(&ctx, leaderboard_params(Leaderboard::TeamBatting, args)).await?
        }
        Commands::TeamPitching { args } => {
            handle_leaderboard(&ctx, leaderboard_params(Leaderboard::TeamPitching, args)).await?
        }
        Commands::PlayerBatting { args } => {
            handle_leaderboard(&ctx, leaderboard_params(Leaderboard::PlayerBatting, args)).await?
        }
        Commands::PlayerPitching { args } => {
            handle_leaderboard(&ctx, leaderboard_params(Leaderboard::PlayerPitching, args))
                .await?
        }

        Commands::Standings { year, json } => handle_standings(&ctx, year, json).await?,

        Commands::News {
            braves,
            refresh,
            json,
        } => handle_news(&ctx, braves, refresh, json).await?,

        Commands::Games { date, json } => handle_games(&ctx, date, json).await?,

        Commands::Boxscore { game_pk, json } => handle_boxscore(&ctx, game_pk, json).await?,

        Commands::Transactions {
            team_id,
            type_desc,
            start_date,
            end_date,
            json,
        } => {
            handle_transactions(
                &ctx,
                TransactionParams {
                    query: TransactionQuery {
                        team_id,
                        start_date,
                        end_date,
                    },
                    type_desc,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::CompareSeasons {
            kind,
            seasons,
            stats,
            team,
            json,
        } => {
            handle_compare_seasons(
                &ctx,
                SeasonComparisonParams {
                    kind,
                    seasons,
                    stats,
                    team,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::CompareTeams {
            teams,
            pitching,
            stats,
            year,
            json,
        } => {
            handle_compare_teams(
                &ctx,
                TeamComparisonParams {
                    teams,
                    group: group(pitching),
                    season: year,
                    stats,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::ComparePlayers {
            names,
            pitching,
            category,
            year,
            json,
        } => {
            handle_compare_players(
                &ctx,
                PlayerComparisonParams {
                    names,
                    group: group(pitching),
                    category,
                    season: year,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::AnalyzePlayer {
            name,
            pitching,
            category,
            position,
            year,
            json,
        } => {
            handle_analyze_player(
                &ctx,
                AnalysisParams {
                    name,
                    group: group(pitching),
                    category,
                    position,
                    season: year,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::Team { team, year, json } => handle_team(&ctx, &team, year, json).await?,

        Commands::Player { player_id, role } => handle_player(&ctx, player_id, role).await?,

        Commands::Statcast {
            player_id,
            role,
            p_throws,
            stands,
            events,
            year,
            json,
        } => {
            handle_statcast(
                &ctx,
                StatcastParams {
                    season: year,
                    query: StatcastQuery {
                        player_id,
                        position: role,
                        p_throws,
                        stands,
                        events,
                    },
                    as_json: json,
                },
            )
            .await?
        }

        Commands::StatsAvailable { data_type, json } => {
            handle_stats_available(&ctx, &data_type, json).await?
        }
    }

    Ok(())
}
