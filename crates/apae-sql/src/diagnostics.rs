//! Processing report appended to the script as comments.

use apae_model::ReportSummary;

use crate::comment::{push_banner, push_comment};

/// Converted count, warning count, the shown warnings and the remainder.
pub fn render_diagnostics(summary: &ReportSummary) -> String {
    let mut out = String::new();
    push_banner(&mut out, "PROCESSING REPORT");
    push_comment(&mut out, &format!("Records converted: {}", summary.converted));
    push_comment(&mut out, &format!("Warnings: {}", summary.total_warnings));
    if summary.total_warnings == 0 {
        push_comment(&mut out, "No warnings.");
        return out;
    }
    push_comment(&mut out, "WARNINGS:");
    for (position, warning) in summary.shown.iter().enumerate() {
        push_comment(&mut out, &format!("{}. {warning}", position + 1));
    }
    if summary.remaining > 0 {
        push_comment(
            &mut out,
            &format!("... and {} more warnings.", summary.remaining),
        );
    }
    out
}
