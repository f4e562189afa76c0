/// Similarity of two normalized strings on a `0..=100` scale.
///
/// Based on normalized Levenshtein distance, so it is symmetric and an
/// identical non-empty pair scores 100. An empty side always scores 0.
pub fn similarity_score(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    if a == b {
        return 100;
    }

    let ratio = strsim::normalized_levenshtein(a, b);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Exact-match test used instead of scoring when exact mode is on.
pub fn exact_match(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(similarity_score("austin", "austin"), 100);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(similarity_score("", "austin"), 0);
        assert_eq!(similarity_score("austin", ""), 0);
        assert_eq!(similarity_score("", ""), 0);
    }

    #[test]
    fn score_is_symmetric() {
        let pairs = [("jon", "john"), ("123mainst", "123mainstreet"), ("a", "xyz")];
        for (a, b) in pairs {
            assert_eq!(similarity_score(a, b), similarity_score(b, a));
        }
    }

    #[test]
    fn one_edit_in_ten_scores_90() {
        assert_eq!(similarity_score("1234567890", "1234567899"), 90);
    }

    #[test]
    fn exact_match_requires_non_empty_equality() {
        assert!(exact_match("78701", "78701"));
        assert!(!exact_match("78701", "78702"));
        assert!(!exact_match("", ""));
    }
}
