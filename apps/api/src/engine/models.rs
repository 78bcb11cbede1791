use serde::{Deserialize, Serialize, Serializer};

/// Placeholder shown when no name could be read from a document.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One parsed input document (resume or job description). Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub raw_text: String,
    /// Lower-cased, deduplicated, first-seen order.
    pub skills: Vec<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Document {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_NAME)
    }

    pub fn word_count(&self) -> usize {
        self.raw_text.split_whitespace().count()
    }
}

/// Parsed job description: the reference every candidate is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub raw_text: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    High,
    Medium,
    Low,
}

/// A JD skill with no exact counterpart that was close enough to a candidate skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub jd_skill: String,
    pub candidate_skill: String,
    pub ratio: f64,
}

/// One candidate compared against the job description.
///
/// Scores are kept at full precision; they serialise rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Exact overlap, sorted.
    pub matched_skills: Vec<String>,
    /// JD skills without an exact match, sorted.
    pub missing_skills: Vec<String>,
    /// Advisory only. Does not feed `skill_score`.
    pub matched_keywords: Vec<FuzzyMatch>,
    #[serde(serialize_with = "serialize_rounded")]
    pub skill_score: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub similarity_score: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub final_score: f64,
    pub quality_label: MatchLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLabel {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl QualityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Excellent => "Excellent Resume",
            QualityLabel::Good => "Good Resume",
            QualityLabel::NeedsImprovement => "Needs Improvement",
            QualityLabel::Poor => "Poor Resume",
        }
    }
}

/// Structural completeness of one document, independent of any job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    pub score: u32,
    pub feedback: Vec<String>,
    pub summary_label: QualityLabel,
}

impl QualityResult {
    /// `"<label> | <item>; <item>"`, or just the label when nothing is missing.
    pub fn summary(&self) -> String {
        if self.feedback.is_empty() {
            self.summary_label.as_str().to_string()
        } else {
            format!("{} | {}", self.summary_label.as_str(), self.feedback.join("; "))
        }
    }
}

/// A fully scored candidate, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub document: Document,
    pub match_result: MatchResult,
    pub quality: QualityResult,
}

/// One line of the final ranked output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub file_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub match_result: MatchResult,
    pub quality: QualityResult,
    pub quality_summary: String,
}

/// Two-decimal rounding for display. Ranking never uses the rounded value.
pub fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_display(*value))
}
