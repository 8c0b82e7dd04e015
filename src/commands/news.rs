//! Home view: headlines next to the division leaders.
//!
//! Each section is fetched concurrently and degrades to empty on failure, so
//! one broken feed never hides the others.

use serde::Serialize;
use tracing::{info, warn};

use super::{
    common::{or_empty, print_json, CommandContext},
    standings::{group_by_division, StandingRow},
};
use crate::{api::Article, Result};

/// Headlines shown per feed in text mode.
const HEADLINES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionLeader {
    pub division: &'static str,
    pub leader: StandingRow,
}

#[derive(Debug, Default, Serialize)]
pub struct HomeView {
    pub mlb_news: Vec<Article>,
    pub braves_news: Vec<Article>,
    pub leaders: Vec<DivisionLeader>,
}

/// Fetch both feeds and the standings concurrently.
pub async fn load_home(ctx: &CommandContext, braves_only: bool) -> Result<HomeView> {
    let season = ctx.season(None)?;
    let mlb = async {
        if braves_only {
            Ok(Vec::new())
        } else {
            ctx.api.mlb_news().await
        }
    };
    let (mlb, braves, standings) = tokio::join!(
        mlb,
        ctx.api.braves_news(),
        ctx.api.standings(season)
    );

    let leaders = group_by_division(&or_empty("standings", standings))
        .into_iter()
        .filter_map(|table| {
            table.teams.into_iter().next().map(|leader| DivisionLeader {
                division: table.division,
                leader,
            })
        })
        .collect();

    Ok(HomeView {
        mlb_news: or_empty("mlb news", mlb),
        braves_news: or_empty("braves news", braves),
        leaders,
    })
}

pub fn headline(article: &Article) -> String {
    let mut line = article.title.clone();
    let source = article
        .source
        .as_ref()
        .map(|s| s.name.as_str())
        .filter(|s| !s.is_empty());
    let date = article.published().map(|d| d.format("%b %-d, %Y").to_string());
    match (source, date) {
        (Some(source), Some(date)) => line.push_str(&format!(" ({source}, {date})")),
        (Some(source), None) => line.push_str(&format!(" ({source})")),
        (None, Some(date)) => line.push_str(&format!(" ({date})")),
        (None, None) => {}
    }
    line
}

fn print_feed(title: &str, articles: &[Article]) {
    println!("{title}");
    if articles.is_empty() {
        println!("  No headlines available.");
    }
    for article in articles.iter().take(HEADLINES) {
        println!("  - {}", headline(article));
        if !article.url.is_empty() {
            println!("    {}", article.url);
        }
    }
    println!();
}

/// Handle the `news` command
pub async fn handle_news(
    ctx: &CommandContext,
    braves_only: bool,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    if refresh {
        match ctx.api.refresh_news().await {
            Ok(_) => info!("News feeds refreshed"),
            Err(e) => warn!(error = %e, "News refresh failed; showing cached feeds"),
        }
    }

    let view = load_home(ctx, braves_only).await?;
    if as_json {
        return print_json(&view);
    }

    if !braves_only {
        print_feed("MLB News", &view.mlb_news);
    }
    print_feed("Braves News", &view.braves_news);

    if !view.leaders.is_empty() {
        println!("Division Leaders");
        for entry in &view.leaders {
            println!(
                "  {:<11} {:<4} {}-{} ({})",
                entry.division,
                entry.leader.abbreviation,
                entry.leader.wins,
                entry.leader.losses,
                entry.leader.pct
            );
        }
    }
    Ok(())
}
