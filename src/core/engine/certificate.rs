// src/core/engine/certificate.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::core::models::{
    CertificateSignal, Finding, FindingCategory, LookupResult, ScoredFinding, Severity,
};

const CT_LOOKUP_URL: &str = "https://crt.sh";
// crt.sh can be slow; the timeout is this collaborator's concern, the engine
// imposes none of its own.
const CT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);
const MILLIS_PER_DAY: i64 = 86_400_000;
const EXPIRY_WARNING_DAYS: i64 = 30;

/// One issued-certificate record as returned by the transparency lookup.
/// Only the issuer and the not-after timestamp are consumed; records with a
/// missing or malformed timestamp are discarded during selection.
#[derive(Debug, Clone, Deserialize)]
pub struct CtRecord {
    #[serde(default)]
    pub issuer_name: Option<String>,
    #[serde(default)]
    pub not_after: Option<String>,
}

/// Queries the certificate transparency lookup for all records matching the
/// hostname. `Ok(None)` when the log has nothing for this host; `Err` on any
/// transport or decoding failure.
async fn fetch_ct_records(host: &str) -> LookupResult<Vec<CtRecord>> {
    let client = reqwest::Client::builder()
        .user_agent("sitetrust/0.1")
        .timeout(CT_LOOKUP_TIMEOUT)
        .build()
        .map_err(|e| format!("HTTP client error: {}", e))?;

    let url = format!("{}/?q={}&output=json", CT_LOOKUP_URL, host);
    debug!(url = %url, "Querying certificate transparency log.");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("CT lookup request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("CT lookup returned HTTP {}", response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read CT response body: {}", e))?;

    if body.trim().is_empty() || body.trim() == "[]" {
        return Ok(None);
    }

    let records: Vec<CtRecord> =
        serde_json::from_str(&body).map_err(|e| format!("CT response decode error: {}", e))?;

    if records.is_empty() {
        Ok(None)
    } else {
        Ok(Some(records))
    }
}

/// Parses a not-after timestamp. The log emits bare ISO timestamps with no
/// zone suffix (interpreted as UTC); RFC 3339 is accepted as well.
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Picks the record with the latest expiry timestamp. This is the canonical
/// tie-break between overlapping issuances, independent of input order; it
/// is not "most recently logged".
fn select_latest_record(records: &[CtRecord]) -> Option<(DateTime<Utc>, Option<String>)> {
    records
        .iter()
        .filter_map(|record| {
            let expiry = parse_expiry(record.not_after.as_deref()?)?;
            Some((expiry, record.issuer_name.clone()))
        })
        .max_by_key(|(expiry, _)| *expiry)
}

/// Whole days until expiry, rounded up from milliseconds. Zero or negative
/// means the certificate is already past its not-after date.
fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    // `i64::div_ceil` is unstable on the stable channel; this is the same
    // ceiling division spelled out (the divisor is a positive constant).
    let millis = (expiry - now).num_milliseconds();
    let quotient = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Derives the certificate signal from a set of records, or `None` when no
/// record carries a usable expiry.
fn signal_from_records(records: &[CtRecord], now: DateTime<Utc>) -> Option<CertificateSignal> {
    let (expiry, issuer) = select_latest_record(records)?;
    let days = days_until(expiry, now);
    Some(CertificateSignal {
        is_valid: days > 0,
        expiry: Some(expiry),
        days_until_expiry: Some(days),
        issuer,
    })
}

/// The "no usable record" outcome: a secure scheme implies some certificate
/// exists even if undiscoverable, so it earns a charitable valid-but-unknown
/// signal. Plain schemes get no such benefit of the doubt.
fn fallback_signal(secure_scheme: bool) -> Option<CertificateSignal> {
    if secure_scheme {
        Some(CertificateSignal {
            is_valid: true,
            expiry: None,
            days_until_expiry: None,
            issuer: None,
        })
    } else {
        None
    }
}

/// Resolves the certificate signal for a hostname. Lookup failures never
/// escape this function; they collapse into the same fallback path as an
/// empty result.
pub async fn resolve_certificate_signal(
    host: &str,
    secure_scheme: bool,
) -> Option<CertificateSignal> {
    match fetch_ct_records(host).await {
        Ok(Some(records)) => match signal_from_records(&records, Utc::now()) {
            Some(signal) => {
                debug!(
                    records = records.len(),
                    expiry = ?signal.expiry,
                    days_until_expiry = ?signal.days_until_expiry,
                    "Certificate signal resolved from transparency records."
                );
                Some(signal)
            }
            None => {
                debug!("Every transparency record had a malformed expiry.");
                fallback_signal(secure_scheme)
            }
        },
        Ok(None) => {
            debug!(host, "No transparency records for host.");
            fallback_signal(secure_scheme)
        }
        Err(error) => {
            error!(host, error = %error, "Certificate transparency lookup failed.");
            fallback_signal(secure_scheme)
        }
    }
}

/// Maps a resolved signal to its finding and risk contribution.
pub fn classify_certificate(signal: &Option<CertificateSignal>) -> ScoredFinding {
    let category = FindingCategory::Certificate;
    match signal {
        None => ScoredFinding::new(
            Finding::new(
                category,
                Severity::Warning,
                "CERT_UNKNOWN",
                "Certificate status could not be determined.",
            ),
            15,
        ),
        Some(sig) if !sig.is_valid || sig.days_until_expiry.is_some_and(|d| d <= 0) => {
            let detail = match sig.days_until_expiry {
                Some(d) if d < 0 => format!(" (expired {} days ago)", -d),
                _ => String::new(),
            };
            ScoredFinding::new(
                Finding::new(
                    category,
                    Severity::Danger,
                    "CERT_EXPIRED",
                    format!("Certificate is expired or invalid{detail}."),
                ),
                40,
            )
        }
        Some(sig) => match sig.days_until_expiry {
            None => ScoredFinding::new(
                Finding::new(
                    category,
                    Severity::Secure,
                    "CERT_ASSUMED_VALID",
                    "Secure connection in use; no transparency records found, assuming a valid certificate.",
                ),
                0,
            ),
            Some(days) if days > EXPIRY_WARNING_DAYS => {
                let issuer_note = match &sig.issuer {
                    Some(issuer) => format!(", issued by {issuer}"),
                    None => String::new(),
                };
                ScoredFinding::new(
                    Finding::new(
                        category,
                        Severity::Secure,
                        "CERT_VALID",
                        format!("Certificate is valid ({days} days until expiry{issuer_note})."),
                    ),
                    0,
                )
            }
            Some(days) => ScoredFinding::new(
                Finding::new(
                    category,
                    Severity::Warning,
                    "CERT_EXPIRING_SOON",
                    format!("Certificate expires soon ({days} days left)."),
                ),
                20,
            ),
        },
    }
}

/// Runs the full certificate check: transparency lookup, signal resolution,
/// and classification into a scored finding.
pub async fn run_certificate_check(host: &str, secure_scheme: bool) -> ScoredFinding {
    info!(host, secure_scheme, "Starting certificate check.");

    let signal = resolve_certificate_signal(host, secure_scheme).await;
    let outcome = classify_certificate(&signal);

    info!(
        severity = %outcome.finding.severity,
        risk = outcome.risk,
        "Certificate check finished."
    );
    outcome
}
