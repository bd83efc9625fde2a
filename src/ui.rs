// src/ui.rs

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;

use crate::core::knowledge_base;
use crate::core::models::{RiskReport, Severity, Verdict};

/// Prints the human-readable report to stdout.
///
/// Write errors are ignored so a closed pipe (`sitetrust ... | head`)
/// exits quietly instead of panicking.
pub fn render_text(report: &RiskReport) {
    let mut out = io::stdout().lock();

    let _ = writeln!(out);
    let _ = writeln!(out, "Target:    {}", report.target.as_str().bold());
    let _ = writeln!(out, "Analyzed:  {}", format_timestamp(&report.analyzed_at));
    let _ = writeln!(
        out,
        "Verdict:   {}  (risk {}/100)",
        styled_verdict(report.status),
        report.total_risk
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Findings:");
    for finding in &report.findings {
        let _ = writeln!(
            out,
            "  {} [{}] {}",
            severity_marker(finding.severity),
            finding.category,
            finding.message
        );
        if finding.severity != Severity::Secure {
            if let Some(detail) = knowledge_base::get_finding_detail(&finding.code) {
                let _ = writeln!(
                    out,
                    "      {}: {}",
                    detail.title.bold(),
                    detail.description.dark_grey()
                );
                let _ = writeln!(out, "      Advice: {}", detail.advice);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} danger, {} warning finding(s).",
        report.danger_count(),
        report.warning_count()
    );
}

/// Prints the report as pretty-printed JSON, for piping into other tools.
pub fn render_json(report: &RiskReport) -> color_eyre::Result<()> {
    let rendered = serde_json::to_string_pretty(report)?;
    println!("{rendered}");
    Ok(())
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn styled_verdict(status: Verdict) -> crossterm::style::StyledContent<&'static str> {
    match status {
        Verdict::Safe => "SAFE".green().bold(),
        Verdict::Warning => "WARNING".yellow().bold(),
        Verdict::Danger => "DANGER".red().bold(),
    }
}

fn severity_marker(severity: Severity) -> crossterm::style::StyledContent<&'static str> {
    match severity {
        Severity::Secure => "✓".green(),
        Severity::Warning => "!".yellow(),
        Severity::Danger => "✗".red(),
    }
}
