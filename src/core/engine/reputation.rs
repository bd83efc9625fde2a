// src/core/engine/reputation.rs

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::core::engine::domain_age;
use crate::core::models::{
    Finding, FindingCategory, ReputationEstimate, ReputationLabel, ScoredFinding, Severity,
};

/// Globally recognized domains whose reputation is beyond doubt; a match
/// forces the score to 95 regardless of every other adjustment.
static ALLOWED_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "google.com",
        "youtube.com",
        "facebook.com",
        "amazon.com",
        "wikipedia.org",
        "microsoft.com",
        "apple.com",
        "github.com",
        "twitter.com",
        "x.com",
        "netflix.com",
        "linkedin.com",
        "instagram.com",
    ]
    .into_iter()
    .collect()
});

const REPUTABLE_TLDS: &[&str] = &["com", "org", "edu", "gov"];
const PENALIZED_TLDS: &[&str] = &["tk", "ml", "ga", "cf"];

const BASE_SCORE: i32 = 50;
const ALLOW_LIST_SCORE: i32 = 95;

/// Scores a hostname's reputation from its shape and estimated age.
///
/// Pure and total: identical `(host, age_years)` inputs always produce the
/// same estimate. The score starts at 50 and every adjustment is a fixed
/// additive delta; only the allow-list override is order-sensitive, and it
/// runs last.
pub fn estimate_reputation(host: &str, age_years: Option<u32>) -> ReputationEstimate {
    let root = host.strip_prefix("www.").unwrap_or(host);
    let mut score = BASE_SCORE;

    match age_years {
        Some(age) if age >= 5 => score += 20,
        Some(age) if age >= 2 => score += 10,
        Some(_) => score -= 10,
        // Unknown age is no evidence either way.
        None => {}
    }

    if let Some(tld) = root.rsplit('.').next() {
        if REPUTABLE_TLDS.contains(&tld) {
            score += 10;
        } else if PENALIZED_TLDS.contains(&tld) {
            score -= 20;
        }
    }

    if host.len() > 20 {
        score -= 5;
    }
    if host.matches('-').count() > 2 {
        score -= 10;
    }

    if ALLOWED_DOMAINS.contains(root) {
        score = ALLOW_LIST_SCORE;
    }

    let label = match score {
        s if s >= 80 => ReputationLabel::Excellent,
        s if s >= 60 => ReputationLabel::Good,
        s if s >= 40 => ReputationLabel::Fair,
        _ => ReputationLabel::Poor,
    };

    ReputationEstimate {
        label,
        age_years,
        score,
    }
}

/// Maps a reputation estimate to its finding and risk contribution.
pub fn classify_reputation(estimate: &ReputationEstimate) -> ScoredFinding {
    let age_note = match estimate.age_years {
        Some(years) => format!(" (estimated age: {years} years)"),
        None => String::new(),
    };

    match estimate.label {
        ReputationLabel::Excellent | ReputationLabel::Good => ScoredFinding::new(
            Finding::new(
                FindingCategory::Reputation,
                Severity::Secure,
                "REP_ESTABLISHED",
                format!("Domain reputation: {}.{}", estimate.label, age_note),
            ),
            0,
        ),
        ReputationLabel::Fair => ScoredFinding::new(
            Finding::new(
                FindingCategory::Reputation,
                Severity::Warning,
                "REP_MIXED",
                format!(
                    "Domain reputation: Fair. Few trust signals for this hostname.{age_note}"
                ),
            ),
            15,
        ),
        ReputationLabel::Poor => ScoredFinding::new(
            Finding::new(
                FindingCategory::Reputation,
                Severity::Danger,
                "REP_POOR",
                format!(
                    "Domain reputation: Poor. Hostname shape and age suggest low trust.{age_note}"
                ),
            ),
            35,
        ),
    }
}

/// Runs the full reputation check: age estimate, point scoring, and
/// classification into a scored finding.
pub async fn run_reputation_check(host: &str) -> ScoredFinding {
    info!(host, "Starting reputation check.");

    let age_years = domain_age::estimate_age(host).await;
    let estimate = estimate_reputation(host, age_years);
    debug!(
        score = estimate.score,
        label = %estimate.label,
        age_years = ?estimate.age_years,
        "Reputation points tallied."
    );

    let outcome = classify_reputation(&estimate);
    info!(
        severity = %outcome.finding.severity,
        risk = outcome.risk,
        "Reputation check finished."
    );
    outcome
}
