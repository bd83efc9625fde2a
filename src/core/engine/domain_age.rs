// src/core/engine/domain_age.rs

use chrono::{Datelike, Utc};
use tracing::debug;

/// Registration years for domains old and recognizable enough that a static
/// answer is as good as a registry query. Anything not listed falls through
/// to the TLD default below.
static DOMAIN_REGISTRATION_YEARS: &[(&str, i32)] = &[
    ("google.com", 1997),
    ("youtube.com", 2005),
    ("facebook.com", 1997),
    ("amazon.com", 1994),
    ("wikipedia.org", 2001),
    ("microsoft.com", 1991),
    ("apple.com", 1987),
    ("github.com", 2007),
    ("twitter.com", 2000),
    ("x.com", 1993),
    ("netflix.com", 1997),
    ("linkedin.com", 2002),
    ("instagram.com", 2010),
    ("paypal.com", 1999),
    ("reddit.com", 2005),
    ("mozilla.org", 1998),
];

/// Free-registration TLDs churn constantly; an unlisted host there is
/// assumed to be about a year old rather than unknown.
const FREE_REGISTRATION_TLDS: &[&str] = &["tk", "ml", "ga", "cf", "gq"];

/// Estimates how many years ago a domain was registered.
///
/// This is the stand-in for a live registry/WHOIS collaborator: a fixed
/// table of well-known domains plus a TLD-based default. `None` means the
/// age is unknown, which the reputation scoring treats as "no adjustment",
/// never as "young".
pub async fn estimate_age(host: &str) -> Option<u32> {
    let root = host.strip_prefix("www.").unwrap_or(host);

    if let Some((_, registered)) = DOMAIN_REGISTRATION_YEARS
        .iter()
        .find(|(domain, _)| *domain == root)
    {
        let age = (Utc::now().year() - registered).max(0) as u32;
        debug!(host = root, age, "Domain age from well-known table.");
        return Some(age);
    }

    let tld = root.rsplit('.').next()?;
    if FREE_REGISTRATION_TLDS.contains(&tld) {
        debug!(host = root, tld, "Free-registration TLD, assuming a young domain.");
        Some(1)
    } else {
        debug!(host = root, "Domain age unknown.");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn age(host: &str) -> Option<u32> {
        estimate_age(host).await
    }

    #[tokio::test]
    async fn well_known_domains_have_a_known_age() {
        let age = age("google.com").await.unwrap();
        assert!(age >= 25, "google.com should be decades old, got {age}");
    }

    #[tokio::test]
    async fn www_prefix_is_stripped_before_lookup() {
        assert_eq!(age("www.google.com").await, age("google.com").await);
    }

    #[tokio::test]
    async fn unlisted_com_host_is_unknown() {
        assert_eq!(age("example.com").await, None);
        assert_eq!(age("some-random-shop.net").await, None);
    }

    #[tokio::test]
    async fn free_registration_tlds_default_to_one_year() {
        assert_eq!(age("whatever.tk").await, Some(1));
        assert_eq!(age("another.ml").await, Some(1));
    }
}
