// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// --- Shared plumbing ---

/// Result alias for the lookup collaborators. `Ok(None)` means the lookup
/// completed but produced no data; `Err` means it failed outright. Both cases
/// degrade to the owning check's documented fallback finding, so neither is
/// ever visible to the caller of the engine.
pub type LookupResult<T> = Result<Option<T>, String>;

// --- Severity & verdict ---

/// Severity of a single finding. One closed enum for the whole crate; the
/// report-level verdict is a separate type so the two label sets can never
/// drift apart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Secure,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Secure => write!(f, "secure"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

/// Final three-way classification of the clamped total risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Warning,
    Danger,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Safe => write!(f, "safe"),
            Verdict::Warning => write!(f, "warning"),
            Verdict::Danger => write!(f, "danger"),
        }
    }
}

// --- Findings ---

/// High-level grouping for findings, one per heuristic check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FindingCategory {
    Certificate,
    Protocol,
    Reputation,
    UrlStructure,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Certificate => write!(f, "Certificate"),
            FindingCategory::Protocol => write!(f, "Connection"),
            FindingCategory::Reputation => write!(f, "Domain Reputation"),
            FindingCategory::UrlStructure => write!(f, "URL Structure"),
        }
    }
}

/// One evaluated check's categorized outcome. `code` is the stable key into
/// the knowledge base; `message` is the human-readable explanation shown to
/// the user. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        category: FindingCategory,
        severity: Severity,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// A finding paired with the fixed point value it adds to the cumulative
/// risk score. The aggregator sums these; the findings list in the report
/// keeps only the `Finding` part.
#[derive(Debug, Clone)]
pub struct ScoredFinding {
    pub finding: Finding,
    pub risk: u8,
}

impl ScoredFinding {
    pub fn new(finding: Finding, risk: u8) -> Self {
        Self { finding, risk }
    }
}

// --- Certificate signal ---

/// Certificate evidence derived from transparency-log records. `None` fields
/// mean "unknown" and must never be read as negative evidence; an absent
/// expiry on a valid signal is the charitable fallback for secure schemes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateSignal {
    pub is_valid: bool,
    pub expiry: Option<DateTime<Utc>>,
    pub days_until_expiry: Option<i64>,
    pub issuer: Option<String>,
}

// --- Reputation ---

/// Four-band categorical trust estimate for a hostname.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReputationLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for ReputationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReputationLabel::Excellent => write!(f, "Excellent"),
            ReputationLabel::Good => write!(f, "Good"),
            ReputationLabel::Fair => write!(f, "Fair"),
            ReputationLabel::Poor => write!(f, "Poor"),
        }
    }
}

/// Output of the reputation point-scoring rule. `score` is the raw tally the
/// label was derived from (kept for display and logging); `age_years` is the
/// collaborator's estimate, `None` when unknown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationEstimate {
    pub label: ReputationLabel,
    pub age_years: Option<u32>,
    pub score: i32,
}

// --- Report ---

/// The aggregate result of one analysis run. Findings appear in evaluation
/// order (certificate, protocol, reputation, URL structure), never sorted by
/// severity. `total_risk` is already clamped to [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub target: String,
    pub analyzed_at: DateTime<Utc>,
    pub total_risk: u8,
    pub findings: Vec<Finding>,
    pub status: Verdict,
}

impl RiskReport {
    pub fn danger_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Danger)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }
}

// --- Errors ---

/// The only two failures the engine surfaces to its caller. Everything else
/// (lookup timeouts, malformed third-party data) is absorbed into the
/// affected check's fallback finding.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The supplied string is not a parseable URL even after scheme
    /// normalization. No analysis is attempted.
    #[error("not a valid URL: '{input}'")]
    InvalidUrl { input: String },

    /// The URL parsed but no hostname could be extracted from it. The caller
    /// may retry; no partial report is produced.
    #[error("analysis failed: no hostname in '{input}'")]
    HostExtraction { input: String },
}
