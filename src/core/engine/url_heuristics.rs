// src/core/engine/url_heuristics.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::models::{Finding, FindingCategory, ScoredFinding, Severity};

/// Anchored dotted-quad pattern: the whole hostname must be an IPv4 literal,
/// an IP embedded in a longer label does not count.
static IPV4_HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").unwrap());

const IP_HOST_RISK: u8 = 20;
const HYPHEN_RISK: u8 = 10;
const DIGIT_RISK: u8 = 10;
const HYPHEN_LIMIT: usize = 3;
const DIGIT_LIMIT: usize = 3;

/// Above this subtotal the single structure finding escalates from warning
/// to danger.
const DANGER_THRESHOLD: u8 = 15;

/// Which structure rules a hostname tripped. The rules are independent and
/// their contributions add up; none is mutually exclusive with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureSignals {
    pub ip_literal: bool,
    pub excess_hyphens: bool,
    pub excess_digits: bool,
}

/// Inspects a hostname against the structure rules. Pure and total.
pub fn inspect_structure(host: &str) -> StructureSignals {
    StructureSignals {
        ip_literal: IPV4_HOST_RE.is_match(host),
        excess_hyphens: host.matches('-').count() > HYPHEN_LIMIT,
        excess_digits: host.chars().filter(|c| c.is_ascii_digit()).count() > DIGIT_LIMIT,
    }
}

/// Sums the independent rule contributions.
pub fn structure_risk(signals: &StructureSignals) -> u8 {
    let mut risk = 0;
    if signals.ip_literal {
        risk += IP_HOST_RISK;
    }
    if signals.excess_hyphens {
        risk += HYPHEN_RISK;
    }
    if signals.excess_digits {
        risk += DIGIT_RISK;
    }
    risk
}

/// Runs the URL structure check, emitting exactly one finding: secure when
/// nothing tripped, otherwise warning, or danger above the escalation
/// threshold.
pub fn run_url_structure_check(host: &str) -> ScoredFinding {
    let signals = inspect_structure(host);
    let risk = structure_risk(&signals);
    debug!(host, ?signals, risk, "URL structure inspected.");

    if risk == 0 {
        return ScoredFinding::new(
            Finding::new(
                FindingCategory::UrlStructure,
                Severity::Secure,
                "URL_STRUCTURE_NORMAL",
                "URL structure appears normal.",
            ),
            0,
        );
    }

    let mut reasons = Vec::new();
    if signals.ip_literal {
        reasons.push("host is a raw IP address");
    }
    if signals.excess_hyphens {
        reasons.push("excessive hyphenation");
    }
    if signals.excess_digits {
        reasons.push("unusually digit-heavy");
    }

    let severity = if risk > DANGER_THRESHOLD {
        Severity::Danger
    } else {
        Severity::Warning
    };
    let code = if signals.ip_literal {
        "URL_IP_HOST"
    } else {
        "URL_SUSPICIOUS_SHAPE"
    };

    ScoredFinding::new(
        Finding::new(
            FindingCategory::UrlStructure,
            severity,
            code,
            format!("Suspicious URL structure: {}.", reasons.join(", ")),
        ),
        risk,
    )
}
