//! Terminal surface with stage spinners and metric bars
//!
//! When stderr is a terminal, stages render as `indicatif` spinners and
//! metric rows as bars that grow from zero. Otherwise every change is
//! printed as a plain line on stdout.

use crate::cli::style::{
    bullet, check, cross, metric_style, outcome_title, settled_style, spinner_style, Stylize,
};
use anstream::println;
use async_trait::async_trait;
use indicatif::{MultiProgress, ProgressBar};
use loanflow::form::Validity;
use loanflow::pipeline::Surface;
use loanflow::result::{MetricRow, ResultCard, Tier};
use loanflow::types::{Stage, StageId, StageStatus, Trigger, View};
use std::collections::HashMap;
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Surface that draws the pipeline on the terminal
pub struct TerminalSurface {
    animated: bool,
    multi: MultiProgress,
    spinners: Mutex<HashMap<StageId, ProgressBar>>,
    bars: Mutex<Vec<ProgressBar>>,
}

impl TerminalSurface {
    /// Create a surface, animating only when stderr is a terminal
    pub fn new() -> Self {
        Self {
            animated: std::io::stderr().is_terminal(),
            multi: MultiProgress::new(),
            spinners: Mutex::new(HashMap::new()),
            bars: Mutex::new(Vec::new()),
        }
    }

    fn stage_line(id: StageId, stage: &Stage) -> String {
        format!("{}: {}", id.title().accent(), stage.message)
    }

    fn settle(&self, id: StageId, line: String) {
        let Ok(mut spinners) = self.spinners.lock() else {
            return;
        };
        let bar = spinners
            .remove(&id)
            .unwrap_or_else(|| self.multi.add(ProgressBar::new_spinner()));
        bar.set_style(settled_style());
        bar.finish_with_message(line);
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn tier_percent(row: &MetricRow) -> String {
    let text = format!("{}%", row.percent);
    match row.tier {
        Tier::Positive => text.success().to_string(),
        Tier::Neutral => text.warn().for_stdout().to_string(),
        Tier::Negative => text.error().for_stdout().to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_position(width: f64) -> u64 {
    width.round().clamp(0.0, 100.0) as u64
}

#[async_trait]
impl Surface for TerminalSurface {
    async fn on_view(&self, view: View) {
        match view {
            View::Pipeline => {
                println!();
                println!("{}", "Processing application".emphasis());
            }
            View::Result => println!(),
            View::Form => {
                if let Ok(mut bars) = self.bars.lock() {
                    bars.clear();
                }
            }
        }
    }

    async fn on_stage(&self, id: StageId, stage: &Stage) {
        let line = Self::stage_line(id, stage);

        if !self.animated {
            match stage.status {
                StageStatus::Pending => {}
                StageStatus::Active => println!("  {} {line}", bullet()),
                StageStatus::Completed => println!("  {} {line}", check()),
                StageStatus::Error => println!("  {} {line}", cross()),
            }
            return;
        }

        match stage.status {
            StageStatus::Pending => {
                if let Ok(mut spinners) = self.spinners.lock() {
                    spinners.remove(&id);
                }
            }
            StageStatus::Active => {
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(spinner_style());
                bar.set_message(line);
                bar.enable_steady_tick(Duration::from_millis(80));
                if let Ok(mut spinners) = self.spinners.lock() {
                    if let Some(previous) = spinners.insert(id, bar) {
                        previous.finish_and_clear();
                    }
                }
            }
            StageStatus::Completed => self.settle(id, format!("{} {line}", check())),
            StageStatus::Error => self.settle(id, format!("{} {line}", cross())),
        }
    }

    async fn on_trigger(&self, trigger: Trigger) {
        debug!(enabled = trigger.enabled, busy = trigger.busy, "trigger");
    }

    async fn on_result(&self, card: &ResultCard) {
        println!("{}", outcome_title(card.kind, &card.title));
        println!("{}", card.remarks);
        if card.metrics_visible {
            println!();
            println!("{}", "Explainability".emphasis());
        }
    }

    async fn on_metric_inserted(&self, _index: usize, row: &MetricRow) {
        if !self.animated {
            return;
        }
        let bar = self.multi.add(ProgressBar::new(100));
        bar.set_style(metric_style(row.tier));
        bar.set_prefix(row.label.clone());
        bar.set_position(bar_position(row.width));
        if let Ok(mut bars) = self.bars.lock() {
            bars.push(bar);
        }
    }

    async fn on_metric_width(&self, index: usize, row: &MetricRow) {
        if !self.animated {
            println!("  {:<24} {}", row.label, tier_percent(row));
            return;
        }
        if let Ok(bars) = self.bars.lock() {
            if let Some(bar) = bars.get(index) {
                bar.set_position(bar_position(row.width));
                bar.finish_with_message(format!("{}%", row.percent));
            }
        }
    }

    fn on_validity(&self, validity: &Validity, trigger: Trigger) {
        debug!(
            valid = validity.is_valid(),
            enabled = trigger.enabled,
            "form gate recomputed"
        );
    }
}
