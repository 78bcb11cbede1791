use crate::engine::config::{EngineConfig, MatchBands, ScoreWeights};
use crate::engine::models::{Document, JobProfile, MatchLabel, MatchResult};
use crate::engine::similarity::{fuzzy_matches, skill_overlap, text_similarity};

/// Weighted sum of the two component scores, clamped to `[0, 100]`.
/// Non-finite inputs count as 0.
pub fn aggregate(skill_score: f64, similarity_score: f64, weights: &ScoreWeights) -> f64 {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    (weights.similarity * finite(similarity_score) + weights.skill * finite(skill_score))
        .clamp(0.0, 100.0)
}

/// `>= high` is High, `>= medium` is Medium, anything else Low.
pub fn classify_match(final_score: f64, bands: &MatchBands) -> MatchLabel {
    match final_score {
        s if s >= bands.high => MatchLabel::High,
        s if s >= bands.medium => MatchLabel::Medium,
        _ => MatchLabel::Low,
    }
}

/// Compares one candidate against the job description.
///
/// `skill_score` uses exact overlap only. Fuzzy matches are reported in
/// `matched_keywords` and never change the score.
pub fn evaluate_match(job: &JobProfile, candidate: &Document, config: &EngineConfig) -> MatchResult {
    let overlap = skill_overlap(&job.skills, &candidate.skills);
    let matched_keywords = fuzzy_matches(&job.skills, &candidate.skills, config.fuzzy_threshold);
    let similarity_score =
        text_similarity(&job.raw_text, &candidate.raw_text, &config.text_stop_words);

    let final_score = aggregate(overlap.score, similarity_score, &config.weights);

    MatchResult {
        matched_skills: overlap.matched,
        missing_skills: overlap.missing,
        matched_keywords,
        skill_score: overlap.score,
        similarity_score,
        final_score,
        quality_label: classify_match(final_score, &config.match_bands),
    }
}

/// Result used for a candidate whose evaluation could not complete:
/// every JD skill missing, all scores 0.
pub fn degraded_match(job: &JobProfile) -> MatchResult {
    let mut missing = job.skills.clone();
    missing.sort();
    missing.dedup();
    MatchResult {
        matched_skills: vec![],
        missing_skills: missing,
        matched_keywords: vec![],
        skill_score: 0.0,
        similarity_score: 0.0,
        final_score: 0.0,
        quality_label: MatchLabel::Low,
    }
}
