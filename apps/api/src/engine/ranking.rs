use crate::engine::models::{RankedRow, ScoredCandidate};

/// Orders candidates by descending `final_score` and assigns dense ranks `1..=N`.
///
/// The sort is stable: equal scores keep their input order, and still receive
/// distinct consecutive ranks.
pub fn rank(candidates: Vec<ScoredCandidate>) -> Vec<RankedRow> {
    let mut candidates = candidates;
    candidates.sort_by(|a, b| {
        b.match_result
            .final_score
            .total_cmp(&a.match_result.final_score)
    });

    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let ScoredCandidate {
                document,
                match_result,
                quality,
            } = candidate;
            RankedRow {
                rank: index + 1,
                name: document.display_name().to_string(),
                file_id: document.file_id,
                email: document.email,
                phone: document.phone,
                skills: document.skills,
                match_result,
                quality_summary: quality.summary(),
                quality,
            }
        })
        .collect()
}

/// File ids of rows scoring at or above `threshold`, in rank order.
pub fn shortlist(rows: &[RankedRow], threshold: f64) -> Vec<String> {
    rows.iter()
        .filter(|row| row.match_result.final_score >= threshold)
        .map(|row| row.file_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::{
        Document, MatchLabel, MatchResult, QualityLabel, QualityResult,
    };

    fn scored(file_id: &str, final_score: f64) -> ScoredCandidate {
        ScoredCandidate {
            document: Document {
                file_id: file_id.to_string(),
                raw_text: String::new(),
                skills: vec![],
                name: None,
                email: None,
                phone: None,
            },
            match_result: MatchResult {
                matched_skills: vec![],
                missing_skills: vec![],
                matched_keywords: vec![],
                skill_score: 0.0,
                similarity_score: 0.0,
                final_score,
                quality_label: MatchLabel::Low,
            },
            quality: QualityResult {
                score: 0,
                feedback: vec![],
                summary_label: QualityLabel::Poor,
            },
        }
    }

    #[test]
    fn test_rank_orders_descending() {
        let rows = rank(vec![scored("a", 10.0), scored("b", 90.0), scored("c", 50.0)]);
        let order: Vec<_> = rows.iter().map(|r| r.file_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        // B was uploaded first
        let rows = rank(vec![scored("B", 75.0), scored("A", 75.0)]);
        assert_eq!(rows[0].file_id, "B");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].file_id, "A");
        assert_eq!(rows[1].rank, 2);
    }

    #[test]
    fn test_ranks_are_dense_one_to_n() {
        let input: Vec<_> = (0..7)
            .map(|i| scored(&format!("f{i}"), (i % 3) as f64 * 10.0))
            .collect();
        let rows = rank(input);
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_ranking_uses_full_precision() {
        // both display as 66.67
        let rows = rank(vec![scored("low", 66.666), scored("high", 66.669)]);
        assert_eq!(rows[0].file_id, "high");
    }

    #[test]
    fn test_rank_empty_batch() {
        assert!(rank(vec![]).is_empty());
    }

    #[test]
    fn test_row_carries_unknown_name_and_summary() {
        let rows = rank(vec![scored("a", 1.0)]);
        assert_eq!(rows[0].name, "Unknown");
        assert_eq!(rows[0].quality_summary, "Poor Resume");
    }

    #[test]
    fn test_shortlist_threshold_is_inclusive() {
        let rows = rank(vec![scored("a", 55.0), scored("b", 54.99), scored("c", 80.0)]);
        assert_eq!(shortlist(&rows, 55.0), vec!["c", "a"]);
    }
}
