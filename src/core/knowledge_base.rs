//! A static, read-only catalog of every non-secure finding the engine can
//! emit, with plain-language explanations and advice for the person
//! deciding whether to trust the site. Keeping this data-driven means the
//! renderer never hardcodes explanatory text.

/// Everything the report renderer needs to expand a finding code into
/// human-readable context. Category and severity live on the `Finding`
/// itself, not here.
pub struct FindingDetail {
    /// The machine-readable identifier, matching `Finding::code`.
    pub code: &'static str,
    /// A short title for the finding.
    pub title: &'static str,
    /// What the finding means and why it matters.
    pub description: &'static str,
    /// What a visitor should do about it.
    pub advice: &'static str,
}

/// The catalog itself. Secure findings carry their whole story in their
/// message, so only warning and danger codes appear here.
static FINDINGS: &[FindingDetail] = &[
    // --- Certificate: transparency log evidence ---
    FindingDetail {
        code: "CERT_EXPIRED",
        title: "Certificate Expired",
        description: "The most recent certificate found for this site in public transparency logs has already expired. Browsers will refuse the connection or show a prominent warning, and an expired certificate often means the site is unmaintained.",
        advice: "Do not enter passwords or payment details. If you must visit, expect browser warnings and treat anything the site asks for with suspicion.",
    },
    FindingDetail {
        code: "CERT_EXPIRING_SOON",
        title: "Certificate Expiring Soon",
        description: "The site's certificate is within 30 days of expiry. Legitimate sites usually renew well ahead of time; a certificate running down to the wire can indicate neglected operations.",
        advice: "The connection is still encrypted today, but re-check the site before sharing sensitive data if the warning persists.",
    },
    FindingDetail {
        code: "CERT_UNKNOWN",
        title: "Certificate Status Unknown",
        description: "No certificate evidence could be gathered for this site, and it does not use HTTPS, so nothing vouches for its identity. The site may be brand new, misconfigured, or deliberately avoiding scrutiny.",
        advice: "Treat the site as unverified. Avoid logging in or submitting personal information until its identity can be confirmed another way.",
    },
    // --- Protocol: transport encryption ---
    FindingDetail {
        code: "PROTO_PLAINTEXT",
        title: "Unencrypted Connection",
        description: "The site is served over plain HTTP. Everything you send and receive, including passwords and cookies, travels unencrypted and can be read or altered by anyone on the network path.",
        advice: "Never enter credentials or payment details over plain HTTP. Try the https:// version of the address; if none exists, assume the site is unsafe for anything private.",
    },
    // --- Reputation: age and naming signals ---
    FindingDetail {
        code: "REP_MIXED",
        title: "Mixed Domain Reputation",
        description: "The domain shows a blend of reassuring and concerning signals, such as a recent registration, an unusual naming pattern, or a zone with little track record. It is not clearly malicious, but it has not earned trust either.",
        advice: "Proceed with care. Verify the site through an independent source, such as the organization's official channels, before trusting it with anything important.",
    },
    FindingDetail {
        code: "REP_POOR",
        title: "Poor Domain Reputation",
        description: "The domain combines several traits common in throwaway and phishing infrastructure: very recent registration, a zone that hands out free names, or a long hyphen-laden label designed to look like something else.",
        advice: "Assume the site is untrustworthy. If it claims to be a brand you know, navigate to that brand directly instead of following this address.",
    },
    // --- URL structure: hostname shape ---
    FindingDetail {
        code: "URL_IP_HOST",
        title: "Raw IP Address as Host",
        description: "The address points at a bare IP address instead of a domain name. Legitimate public services almost never do this; phishing kits and malware droppers frequently do, because IPs need no registration and leave no name to blocklist.",
        advice: "Do not trust content served from a raw IP address unless you personally know the machine behind it.",
    },
    FindingDetail {
        code: "URL_SUSPICIOUS_SHAPE",
        title: "Suspicious Hostname Shape",
        description: "The hostname is padded with hyphens or digits, a pattern used to imitate real brands (for example 'secure-login-account-1234') or to mass-generate disposable hosts.",
        advice: "Read the hostname carefully from right to left: the registered domain just before the final dot is who you are really talking to.",
    },
];

/// Looks up the full detail for a finding code.
///
/// Returns `None` for codes with no catalog entry, which includes every
/// secure code.
pub fn get_finding_detail(code: &str) -> Option<&'static FindingDetail> {
    FINDINGS.iter().find(|f| f.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_non_secure_code_resolves_to_a_detail() {
        let emitted = [
            "CERT_EXPIRED",
            "CERT_EXPIRING_SOON",
            "CERT_UNKNOWN",
            "PROTO_PLAINTEXT",
            "REP_MIXED",
            "REP_POOR",
            "URL_IP_HOST",
            "URL_SUSPICIOUS_SHAPE",
        ];
        for code in emitted {
            let detail = get_finding_detail(code)
                .unwrap_or_else(|| panic!("missing knowledge base entry for {code}"));
            assert_eq!(detail.code, code);
            assert!(!detail.title.is_empty());
            assert!(!detail.description.is_empty());
            assert!(!detail.advice.is_empty());
        }
    }

    #[test]
    fn secure_codes_have_no_entry() {
        for code in ["CERT_VALID", "CERT_ASSUMED_VALID", "PROTO_HTTPS"] {
            assert!(get_finding_detail(code).is_none());
        }
    }

    #[test]
    fn unknown_code_returns_none() {
        assert!(get_finding_detail("NOT_A_CODE").is_none());
    }
}
