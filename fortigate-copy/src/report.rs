use colored::Colorize;

use crate::driver::RunSummary;
use crate::reconcile::{ErrorRecord, Reconciliation};

const RULE: &str = "-------------------------";

/// Render the banner printed before a vdom is configured.
pub fn render_vdom_banner(vdom: &str) -> String {
    format!(
        "\n{RULE}\n{}\n{RULE}\n",
        format!("CONFIGURING {}", vdom.to_uppercase()).bold()
    )
}

/// Render one failed create.
pub fn render_error(error: &ErrorRecord) -> String {
    let key = error
        .key
        .as_ref()
        .map(|k| k.as_str())
        .unwrap_or("<no key>");
    format!("ERROR {}: {} {}", error.failure, error.label, key)
        .red()
        .to_string()
}

/// Render the closing line of one category.
pub fn render_category(outcome: &Reconciliation) -> String {
    if outcome.is_success() {
        format!("{} SUCCESS", outcome.label.to_uppercase())
            .green()
            .to_string()
    } else {
        format!("{}: {} errors", outcome.label, outcome.errors.len())
            .yellow()
            .to_string()
    }
}

/// Render the result of the vdom creation phase.
pub fn render_vdom_phase(outcome: &Reconciliation) -> String {
    if outcome.is_success() {
        "VDOM CONFIGURATION SUCCESSFUL".green().bold().to_string()
    } else {
        format!("Number of errors: {}", outcome.errors.len())
            .red()
            .bold()
            .to_string()
    }
}

/// Render totals for a whole run.
pub fn render_summary(summary: &RunSummary) -> String {
    format!(
        "copy_summary vdoms={} pushed={} skipped={} errors={}",
        summary.vdoms.len(),
        summary.pushed(),
        summary.skipped(),
        summary.errors()
    )
    .cyan()
    .to_string()
}
