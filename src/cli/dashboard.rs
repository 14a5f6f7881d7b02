//! Dashboard command - processed-application statistics

use crate::cli::style::{decision_label, Stylize};
use anstream::println;
use loanflow::backend::create_backend;
use loanflow::config::Settings;
use loanflow::error::Result;
use loanflow::types::{ApplicationRecord, DashboardStats};

/// Run the dashboard command
pub async fn run_dashboard(settings: &Settings, limit: usize, json: bool) -> Result<()> {
    let backend = create_backend(settings)?;
    let mut data = backend.dashboard().await?;
    data.applications.truncate(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{}", "Processed applications".emphasis());
    println!("{}", stats_line(&data.stats));

    if data.applications.is_empty() {
        println!("{}", "No applications processed yet.".muted());
        return Ok(());
    }

    println!();
    for record in &data.applications {
        println!("{}", record_line(record));
    }

    Ok(())
}

fn stats_line(stats: &DashboardStats) -> String {
    format!(
        "{} total, {} approved, {} denied, {} review, {} queued",
        stats.total_processed, stats.approved, stats.denied, stats.review, stats.queue
    )
}

fn record_line(record: &ApplicationRecord) -> String {
    format!(
        "  {} {:<20} {:>10}  score {:<4} dti {:<6} {} {}",
        format!("{:<10}", record.id).accent(),
        record.name,
        record.amt,
        record.score,
        record.dti,
        decision_label(&format!("{:<8}", record.decision)),
        record.created_at.muted()
    )
}
