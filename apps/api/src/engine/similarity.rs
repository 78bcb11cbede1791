//! Similarity measures: skill-set overlap, fuzzy skill matching and TF-IDF cosine.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::engine::models::FuzzyMatch;
use crate::engine::normalize::normalize;

// ────────────────────────────────────────────────────────────────────────────
// Skill-set overlap
// ────────────────────────────────────────────────────────────────────────────

/// Exact comparison of a JD skill set against a candidate skill set.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlap {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// `|matched| / |jd| * 100`, 0 when the JD has no skills.
    pub score: f64,
}

pub fn skill_overlap(jd_skills: &[String], candidate_skills: &[String]) -> SkillOverlap {
    let jd: BTreeSet<&str> = jd_skills.iter().map(String::as_str).collect();
    let candidate: HashSet<&str> = candidate_skills.iter().map(String::as_str).collect();

    let (matched, missing): (Vec<&str>, Vec<&str>) =
        jd.iter().copied().partition(|skill| candidate.contains(skill));

    let score = if jd.is_empty() {
        0.0
    } else {
        matched.len() as f64 / jd.len() as f64 * 100.0
    };

    SkillOverlap {
        matched: matched.into_iter().map(String::from).collect(),
        missing: missing.into_iter().map(String::from).collect(),
        score,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fuzzy matching
// ────────────────────────────────────────────────────────────────────────────

/// For every JD skill without an exact match, the candidate skill with the highest
/// [`sequence_ratio`] if that ratio is strictly above `threshold`.
///
/// Ties keep the earliest candidate skill. Results follow JD skill order.
pub fn fuzzy_matches(
    jd_skills: &[String],
    candidate_skills: &[String],
    threshold: f64,
) -> Vec<FuzzyMatch> {
    let exact: HashSet<&str> = candidate_skills.iter().map(String::as_str).collect();

    jd_skills
        .iter()
        .filter(|jd| !exact.contains(jd.as_str()))
        .filter_map(|jd| {
            let mut best: Option<(&String, f64)> = None;
            for candidate in candidate_skills {
                let ratio = sequence_ratio(jd, candidate);
                if best.map_or(true, |(_, r)| ratio > r) {
                    best = Some((candidate, ratio));
                }
            }
            best.filter(|(_, ratio)| *ratio > threshold)
                .map(|(candidate, ratio)| FuzzyMatch {
                    jd_skill: jd.clone(),
                    candidate_skill: candidate.clone(),
                    ratio,
                })
        })
        .collect()
}

/// Character-level similarity in `[0, 1]`: `2 * M / (len(a) + len(b))` where `M` is the
/// total size of the matching blocks found by recursively taking the longest common
/// substring (Ratcliff/Obershelp). Two empty strings are identical.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_characters(&a, &b);
    2.0 * matched as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`.
/// Returns `(i, j, k)` with the earliest `i`, then earliest `j`, among maximal `k`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // prev[j - blo + 1]: length of the common run ending at a[i - 1], b[j]
    let mut prev = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        let mut current = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                current[j - blo + 1] = k;
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        prev = current;
    }
    (best_i, best_j, best_k)
}

// ────────────────────────────────────────────────────────────────────────────
// Text similarity
// ────────────────────────────────────────────────────────────────────────────

/// TF-IDF cosine similarity of two documents on a 0–100 scale.
///
/// Both documents are canonicalised with [`normalize`], split on whitespace, and terms
/// shorter than two characters or listed in `stop_words` are dropped. IDF is smoothed over
/// the two-document corpus: `ln((1 + n) / (1 + df)) + 1`. Any degenerate input yields 0.
pub fn text_similarity(a: &str, b: &str, stop_words: &[String]) -> f64 {
    let stop: HashSet<&str> = stop_words.iter().map(String::as_str).collect();
    let left = term_counts(a, &stop);
    let right = term_counts(b, &stop);

    if left.is_empty() || right.is_empty() {
        debug!("Empty vocabulary on one side, text similarity is 0");
        return 0.0;
    }

    let n_docs = 2.0_f64;
    let idf = |term: &str| {
        let df = [&left, &right]
            .iter()
            .filter(|counts| counts.contains_key(term))
            .count() as f64;
        ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
    };

    let weight = |counts: &HashMap<String, usize>| -> HashMap<String, f64> {
        counts
            .iter()
            .map(|(term, &tf)| (term.clone(), tf as f64 * idf(term.as_str())))
            .collect()
    };
    let left_w = weight(&left);
    let right_w = weight(&right);

    let dot: f64 = left_w
        .iter()
        .filter_map(|(term, w)| right_w.get(term).map(|v| w * v))
        .sum();
    let norm = |v: &HashMap<String, f64>| v.values().map(|w| w * w).sum::<f64>().sqrt();
    let denominator = norm(&left_w) * norm(&right_w);

    if denominator == 0.0 || !denominator.is_finite() {
        debug!("Zero-norm TF-IDF vector, text similarity is 0");
        return 0.0;
    }

    (dot / denominator * 100.0).clamp(0.0, 100.0)
}

fn term_counts(text: &str, stop: &HashSet<&str>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in normalize(text).split_whitespace() {
        if term.chars().count() < 2 || stop.contains(term) {
            continue;
        }
        *counts.entry(term.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overlap_half() {
        let overlap = skill_overlap(&skills(&["python", "sql"]), &skills(&["python"]));
        assert_eq!(overlap.score, 50.0);
        let reversed = skill_overlap(&skills(&["sql", "python"]), &skills(&["python"]));
        assert_eq!(reversed.score, 50.0);
    }

    #[test]
    fn test_overlap_scenario_two_of_three() {
        let overlap = skill_overlap(
            &skills(&["python", "sql", "excel"]),
            &skills(&["python", "excel"]),
        );
        assert_eq!(overlap.matched, vec!["excel", "python"]);
        assert_eq!(overlap.missing, vec!["sql"]);
        assert!((overlap.score - 66.666_666).abs() < 0.001);
    }

    #[test]
    fn test_overlap_empty_jd_is_zero() {
        let overlap = skill_overlap(&[], &skills(&["python"]));
        assert_eq!(overlap.score, 0.0);
        assert!(overlap.matched.is_empty());
        assert!(overlap.missing.is_empty());
    }

    #[test]
    fn test_overlap_matched_and_missing_partition_jd() {
        let jd = skills(&["rust", "go", "sql", "go"]);
        let overlap = skill_overlap(&jd, &skills(&["go", "java"]));
        assert_eq!(overlap.matched, vec!["go"]);
        assert_eq!(overlap.missing, vec!["rust", "sql"]);
        assert!(overlap.matched.iter().all(|m| !overlap.missing.contains(m)));
    }

    #[test]
    fn test_sequence_ratio_known_values() {
        assert_eq!(sequence_ratio("abcd", "abcd"), 1.0);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
        // "abcd" vs "bcde": one block "bcd" -> 2 * 3 / 8
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        // "kubernetes" vs "kubernete": 2 * 9 / 19
        assert!((sequence_ratio("kubernetes", "kubernete") - 18.0 / 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_ratio_counts_blocks_on_both_sides() {
        // blocks "ab" and "d" after the longest match "ab": "abxd" vs "abyd" -> 2 * 3 / 8
        assert!((sequence_ratio("abxd", "abyd") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_fuzzy_matches_near_spelling() {
        let matches = fuzzy_matches(
            &skills(&["postgresql", "python"]),
            &skills(&["python", "postgressql", "docker"]),
            0.85,
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].jd_skill, "postgresql");
        assert_eq!(matches[0].candidate_skill, "postgressql");
        assert!(matches[0].ratio > 0.85);
    }

    #[test]
    fn test_fuzzy_matches_skip_exact_and_distant() {
        let matches = fuzzy_matches(&skills(&["rust", "sql"]), &skills(&["rust", "excel"]), 0.85);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_fuzzy_tie_keeps_first_candidate() {
        // both candidates differ from "abcdefghij" by one trailing character
        let matches = fuzzy_matches(
            &skills(&["abcdefghij"]),
            &skills(&["abcdefghix", "abcdefghiy"]),
            0.85,
        );
        assert_eq!(matches[0].candidate_skill, "abcdefghix");
    }

    #[test]
    fn test_text_similarity_identical_is_100() {
        let text = "Rust engineer building distributed systems";
        let score = text_similarity(text, text, &[]);
        assert!((score - 100.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_text_similarity_disjoint_is_zero() {
        assert_eq!(text_similarity("rust tokio axum", "gardening pottery", &[]), 0.0);
    }

    #[test]
    fn test_text_similarity_partial_overlap_is_between() {
        let score = text_similarity(
            "python developer with sql and excel",
            "senior python developer, kubernetes",
            &[],
        );
        assert!(score > 0.0 && score < 100.0, "got {score}");
    }

    #[test]
    fn test_text_similarity_degenerate_inputs_are_zero() {
        assert_eq!(text_similarity("", "python", &[]), 0.0);
        assert_eq!(text_similarity("python", "", &[]), 0.0);
        let stop = skills(&["the", "and"]);
        assert_eq!(text_similarity("the and the", "the", &stop), 0.0);
        assert_eq!(text_similarity("a b c", "a b c", &[]), 0.0);
    }

    #[test]
    fn test_text_similarity_is_symmetric() {
        let a = "python sql excel reporting dashboards";
        let b = "excel power bi dashboards for finance";
        assert!((text_similarity(a, b, &[]) - text_similarity(b, a, &[])).abs() < 1e-9);
    }
}
