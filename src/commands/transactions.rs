//! Roster moves, league-wide or for one team.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::common::{headers, or_empty, print_json, render_table, CommandContext};
use crate::{
    api::{types::value_as_f64, Transaction, TransactionQuery},
    Result,
};

pub struct TransactionParams {
    pub query: TransactionQuery,
    pub type_desc: Option<String>,
    pub as_json: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct TransactionView {
    pub transactions: Vec<Transaction>,
    /// Counts per transaction type, only for a single team.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub breakdown: BTreeMap<String, u64>,
}

/// Keep moves of one type; the match ignores case.
pub fn filter_by_type(transactions: Vec<Transaction>, type_desc: Option<&str>) -> Vec<Transaction> {
    match type_desc.map(str::trim).filter(|t| !t.is_empty()) {
        Some(wanted) => transactions
            .into_iter()
            .filter(|t| t.type_desc.eq_ignore_ascii_case(wanted))
            .collect(),
        None => transactions,
    }
}

/// Distinct transaction types, sorted.
pub fn transaction_types(transactions: &[Transaction]) -> Vec<String> {
    let mut types: Vec<String> = transactions
        .iter()
        .map(|t| t.type_desc.clone())
        .filter(|t| !t.is_empty())
        .collect();
    types.sort();
    types.dedup();
    types
}

/// Breakdown values may be bare counts or `{ "count": n }` objects.
pub fn breakdown_counts(raw: BTreeMap<String, Value>) -> BTreeMap<String, u64> {
    raw.into_iter()
        .filter_map(|(kind, value)| {
            let count = match &value {
                Value::Object(obj) => obj.get("count").and_then(value_as_f64),
                other => value_as_f64(other),
            }?;
            Some((kind, count.max(0.0) as u64))
        })
        .collect()
}

/// Recent moves when no filter is set, otherwise the filtered list; a team
/// filter also loads that team's per-type breakdown.
pub async fn load_transactions(
    ctx: &CommandContext,
    params: &TransactionParams,
) -> Result<TransactionView> {
    let query = &params.query;
    let (transactions, breakdown) = match query.team_id {
        None if query.is_empty() => (ctx.api.recent_transactions().await?, BTreeMap::new()),
        None => (ctx.api.transactions(query).await?, BTreeMap::new()),
        Some(team_id) => {
            let (moves, breakdown) = tokio::join!(
                ctx.api.team_transactions(team_id, query),
                ctx.api.transaction_breakdown(team_id, query)
            );
            (moves?, breakdown_counts(or_empty("transaction breakdown", breakdown)))
        }
    };
    debug!(count = transactions.len(), "Transactions loaded");

    Ok(TransactionView {
        transactions: filter_by_type(transactions, params.type_desc.as_deref()),
        breakdown,
    })
}

fn team_move(tx: &Transaction) -> String {
    match (&tx.from_team, &tx.to_team) {
        (Some(from), Some(to)) => format!("{} -> {}", from.name, to.name),
        (None, Some(to)) => to.name.clone(),
        (Some(from), None) => from.name.clone(),
        (None, None) => String::new(),
    }
}

/// Handle the `transactions` command
pub async fn handle_transactions(ctx: &CommandContext, params: TransactionParams) -> Result<()> {
    let view = load_transactions(ctx, &params).await?;
    if params.as_json {
        return print_json(&view);
    }

    if view.transactions.is_empty() {
        println!("No transactions found for the selected filters.");
    } else {
        let body: Vec<Vec<String>> = view
            .transactions
            .iter()
            .map(|tx| {
                vec![
                    tx.date.clone(),
                    tx.type_desc.clone(),
                    tx.person.full_name.clone(),
                    team_move(tx),
                ]
            })
            .collect();
        println!("{}", render_table(&headers(&["Date", "Type", "Player", "Team"]), &body));
        println!("\nTypes: {}", transaction_types(&view.transactions).join(", "));
    }

    if !view.breakdown.is_empty() {
        println!("\nBreakdown");
        for (kind, count) in &view.breakdown {
            println!("  {kind:<28} {count}");
        }
    }
    Ok(())
}
