//! Plain-text rendering of audit results for the terminal.

use std::fmt::Write;

use crate::entities::{Finding, NOT_AVAILABLE};
use crate::query::SUGGESTED_QUERIES;
use crate::use_cases::ConnectionReport;

pub const FINDINGS_HEADER: &str = "--- Publicly Shared Power Apps Findings ---";
pub const NO_FINDINGS: &str = "✅ No publicly shared Power Apps were found.";
pub const CONNECTION_ATTEMPT: &str = "Attempting to get environments...";

/// One block per finding followed by the total, or a success line when empty.
pub fn render_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return format!("{}\n", NO_FINDINGS);
    }

    let mut out = String::new();
    let _ = writeln!(out, "\n{}", FINDINGS_HEADER);
    for finding in findings {
        let _ = writeln!(
            out,
            "  - App: {} (ID: {})",
            finding.app_display_name, finding.app_id
        );
        let _ = writeln!(
            out,
            "    Environment: {} (ID: {})",
            finding.environment_display_name, finding.environment_id
        );
        let _ = writeln!(out, "    Owner: {}", finding.app_owner);
        let _ = writeln!(out, "    Access Type: {}", finding.permission_type);
        let _ = writeln!(
            out,
            "    Principal: {}\n",
            finding
                .principal_display_name
                .as_deref()
                .unwrap_or(NOT_AVAILABLE)
        );
    }
    let _ = writeln!(out, "Total publicly shared apps found: {}", findings.len());
    out
}

pub fn render_connection_report(report: &ConnectionReport) -> String {
    let mut out = format!(
        "Successfully connected and found {} environments.\n",
        report.environment_count
    );
    if let Some(sample) = &report.sample_environment {
        let _ = writeln!(out, "Sample environment: {}", sample);
    }
    out
}

pub fn render_unrecognized_query(query: &str) -> String {
    format!(
        "Sorry, I don't understand the query: '{}'.\nTry '{}' or '{}'.\n",
        query, SUGGESTED_QUERIES[0], SUGGESTED_QUERIES[1]
    )
}
