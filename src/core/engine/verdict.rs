// src/core/engine/verdict.rs

use crate::core::models::Verdict;

/// Maps a clamped total risk score to its status band. Total and monotonic;
/// a boundary score belongs to the lower band (30 is still safe, 70 is
/// still warning).
pub fn classify(total_risk: u8) -> Verdict {
    match total_risk {
        0..=30 => Verdict::Safe,
        31..=70 => Verdict::Warning,
        _ => Verdict::Danger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_exact() {
        assert_eq!(classify(0), Verdict::Safe);
        assert_eq!(classify(30), Verdict::Safe);
        assert_eq!(classify(31), Verdict::Warning);
        assert_eq!(classify(70), Verdict::Warning);
        assert_eq!(classify(71), Verdict::Danger);
        assert_eq!(classify(100), Verdict::Danger);
    }

    #[test]
    fn classification_is_monotonic() {
        let mut last = classify(0);
        for risk in 0..=100u8 {
            let current = classify(risk);
            // Ordinal progression: safe -> warning -> danger, never back.
            let rank = |v: Verdict| match v {
                Verdict::Safe => 0,
                Verdict::Warning => 1,
                Verdict::Danger => 2,
            };
            assert!(rank(current) >= rank(last));
            last = current;
        }
    }
}
