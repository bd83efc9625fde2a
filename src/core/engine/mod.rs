// src/core/engine/mod.rs

// Public interface of the risk scoring engine. The submodules hold one
// check each; this module owns input validation, the trivial protocol
// check, aggregation, and clamping.
pub mod certificate;
pub mod domain_age;
pub mod reputation;
pub mod url_heuristics;
pub mod verdict;

use chrono::Utc;
use tracing::info;
use url::Url;

use crate::core::models::{
    AnalysisError, Finding, FindingCategory, RiskReport, ScoredFinding, Severity,
};

const MAX_RISK: u32 = 100;
const PLAINTEXT_RISK: u8 = 30;

/// Analyzes an already scheme-normalized URL and produces the full risk
/// report.
///
/// The certificate and reputation checks are independent and run
/// concurrently; the URL structure heuristic and the protocol check are
/// synchronous. Collaborator failures degrade into the owning check's
/// fallback finding, so the only errors surfaced here are an unparseable
/// URL (rejected before any lookup) and a URL without a hostname.
pub async fn analyze_url(input: &str) -> Result<RiskReport, AnalysisError> {
    let parsed = Url::parse(input).map_err(|_| AnalysisError::InvalidUrl {
        input: input.to_string(),
    })?;

    let Some(host) = parsed.host_str().map(str::to_owned) else {
        return Err(AnalysisError::HostExtraction {
            input: input.to_string(),
        });
    };
    let secure_scheme = parsed.scheme() == "https";

    info!(host, secure_scheme, "Starting risk analysis.");

    let (certificate, reputation) = tokio::join!(
        certificate::run_certificate_check(&host, secure_scheme),
        reputation::run_reputation_check(&host),
    );
    let protocol = protocol_check(secure_scheme);
    let url_structure = url_heuristics::run_url_structure_check(&host);

    let report = compose_report(&host, certificate, protocol, reputation, url_structure);
    info!(
        total_risk = report.total_risk,
        status = %report.status,
        "Risk analysis finished."
    );
    Ok(report)
}

/// The fourth check: presence of a secure transport scheme. Trivial enough
/// that the aggregator owns it directly.
fn protocol_check(secure_scheme: bool) -> ScoredFinding {
    if secure_scheme {
        ScoredFinding::new(
            Finding::new(
                FindingCategory::Protocol,
                Severity::Secure,
                "PROTO_HTTPS",
                "Connection uses HTTPS.",
            ),
            0,
        )
    } else {
        ScoredFinding::new(
            Finding::new(
                FindingCategory::Protocol,
                Severity::Danger,
                "PROTO_PLAINTEXT",
                "Connection does not use HTTPS; traffic is unencrypted.",
            ),
            PLAINTEXT_RISK,
        )
    }
}

/// Merges the four check outcomes into one report: findings in canonical
/// order (certificate, protocol, reputation, URL structure), contributions
/// summed and clamped to [0, 100], verdict derived from the clamped total.
fn compose_report(
    target: &str,
    certificate: ScoredFinding,
    protocol: ScoredFinding,
    reputation: ScoredFinding,
    url_structure: ScoredFinding,
) -> RiskReport {
    let outcomes = [certificate, protocol, reputation, url_structure];

    let total: u32 = outcomes.iter().map(|o| u32::from(o.risk)).sum();
    let total_risk = total.min(MAX_RISK) as u8;
    let findings = outcomes.into_iter().map(|o| o.finding).collect();

    RiskReport {
        target: target.to_string(),
        analyzed_at: Utc::now(),
        total_risk,
        findings,
        status: verdict::classify(total_risk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CertificateSignal, Verdict};

    fn synthetic(category: FindingCategory, severity: Severity, risk: u8) -> ScoredFinding {
        ScoredFinding::new(
            Finding::new(category, severity, "TEST", "synthetic finding"),
            risk,
        )
    }

    #[test]
    fn total_risk_saturates_at_one_hundred() {
        let report = compose_report(
            "worst.example",
            synthetic(FindingCategory::Certificate, Severity::Danger, 40),
            synthetic(FindingCategory::Protocol, Severity::Danger, 30),
            synthetic(FindingCategory::Reputation, Severity::Danger, 35),
            synthetic(FindingCategory::UrlStructure, Severity::Danger, 40),
        );
        assert_eq!(report.total_risk, 100);
        assert_eq!(report.status, Verdict::Danger);
    }

    #[test]
    fn every_check_contributes_exactly_one_finding_in_canonical_order() {
        let report = compose_report(
            "host.example",
            synthetic(FindingCategory::Certificate, Severity::Secure, 0),
            synthetic(FindingCategory::Protocol, Severity::Secure, 0),
            synthetic(FindingCategory::Reputation, Severity::Warning, 15),
            synthetic(FindingCategory::UrlStructure, Severity::Secure, 0),
        );
        let categories: Vec<_> = report.findings.iter().map(|f| f.category).collect();
        assert_eq!(
            categories,
            vec![
                FindingCategory::Certificate,
                FindingCategory::Protocol,
                FindingCategory::Reputation,
                FindingCategory::UrlStructure,
            ]
        );
        assert_eq!(report.findings.len(), 4);
        assert_eq!(report.total_risk, 15);
    }

    #[test]
    fn protocol_check_is_binary() {
        let https = protocol_check(true);
        assert_eq!(https.finding.severity, Severity::Secure);
        assert_eq!(https.risk, 0);

        let plain = protocol_check(false);
        assert_eq!(plain.finding.severity, Severity::Danger);
        assert_eq!(plain.risk, 30);
        assert_eq!(plain.finding.code, "PROTO_PLAINTEXT");
    }

    #[tokio::test]
    async fn unparseable_input_is_rejected_before_any_lookup() {
        let err = analyze_url("http://[half-open").await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn hostless_url_is_an_analysis_failure_not_invalid_input() {
        let err = analyze_url("data:text/plain,hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::HostExtraction { .. }));
    }

    // The end-to-end scenarios run through the same pure pieces the live
    // path uses, with the network lookups replaced by their documented
    // outcomes.

    #[test]
    fn scenario_unknown_https_site_scores_zero_and_safe() {
        // https://example.com with no transparency records: charitable
        // certificate fallback, secure protocol, Good reputation from the
        // .com bonus alone, normal structure.
        let host = "example.com";
        let cert = certificate::classify_certificate(&Some(CertificateSignal {
            is_valid: true,
            expiry: None,
            days_until_expiry: None,
            issuer: None,
        }));
        let proto = protocol_check(true);
        let rep = reputation::classify_reputation(&reputation::estimate_reputation(host, None));
        let url_structure = url_heuristics::run_url_structure_check(host);

        let report = compose_report(host, cert, proto, rep, url_structure);
        assert_eq!(report.total_risk, 0);
        assert_eq!(report.status, Verdict::Safe);
        assert!(report.findings.iter().all(|f| f.severity == Severity::Secure));
    }

    #[tokio::test]
    async fn scenario_shady_plaintext_host_lands_in_danger() {
        // http://192.168.1.1-test-1-2-3-4.tk: plaintext (+30), hyphen and
        // digit heavy structure (+20), Poor reputation (+35), unknown
        // certificate with no charitable fallback (+15).
        let host = "192.168.1.1-test-1-2-3-4.tk";
        let cert = certificate::classify_certificate(&None);
        let proto = protocol_check(false);
        let age = domain_age::estimate_age(host).await;
        let rep = reputation::classify_reputation(&reputation::estimate_reputation(host, age));
        let url_structure = url_heuristics::run_url_structure_check(host);

        let report = compose_report(host, cert, proto, rep, url_structure);
        assert_eq!(report.total_risk, 100);
        assert_eq!(report.status, Verdict::Danger);
    }

    #[test]
    fn scenario_expiring_certificate_warns_independently() {
        // A certificate with ten days left contributes its warning no
        // matter what the other checks conclude.
        let cert = certificate::classify_certificate(&Some(CertificateSignal {
            is_valid: true,
            expiry: Some(Utc::now() + chrono::TimeDelta::days(10)),
            days_until_expiry: Some(10),
            issuer: Some("Let's Encrypt".into()),
        }));
        assert_eq!(cert.finding.severity, Severity::Warning);
        assert_eq!(cert.risk, 20);

        let report = compose_report(
            "renewing.example",
            cert,
            protocol_check(true),
            synthetic(FindingCategory::Reputation, Severity::Secure, 0),
            synthetic(FindingCategory::UrlStructure, Severity::Secure, 0),
        );
        assert_eq!(report.total_risk, 20);
        assert_eq!(report.status, Verdict::Safe);
        assert_eq!(report.findings[0].code, "CERT_EXPIRING_SOON");
    }
}
