use serde::{Deserialize, Serialize};

/// Default skill vocabulary used in vocabulary-matching mode.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c++",
    "c#",
    "sql",
    "excel",
    "power bi",
    "machine learning",
    "deep learning",
    "tensorflow",
    "keras",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "data analysis",
    "data visualization",
    "nlp",
    "project management",
    "communication",
    "leadership",
];

/// Generic resume/JD words that are never skills on their own.
pub const DEFAULT_STOPLIST: &[&str] = &[
    "required",
    "skills",
    "responsibilities",
    "qualifications",
    "key",
    "experience",
    "about",
    "role",
    "requirements",
    "preferred",
    "technologies",
    "tools",
    "summary",
    "profile",
];

/// Headers that open a skills block, searched in this order.
pub const DEFAULT_SECTION_HEADERS: &[&str] = &[
    "skills",
    "technical skills",
    "skills summary",
    "core competencies",
    "technologies",
    "tools",
    "tech stack",
];

/// Headers that close a multi-line skills block.
pub const DEFAULT_SECTION_STOP_KEYS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "projects",
    "education",
    "certifications",
    "achievements",
    "summary",
    "profile",
];

/// Function words ignored by the TF-IDF vectorizer.
pub const DEFAULT_TEXT_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "to", "in", "on", "for", "with", "at", "by", "from",
    "as", "is", "are", "was", "were", "be", "been", "it", "its", "this", "that", "we", "you",
    "our", "your", "i", "my", "will", "can", "have", "has", "had", "not", "but", "if", "so",
];

/// How skill sets are derived from document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMode {
    /// Header-located, delimiter-split extraction. Can discover unlisted skills.
    #[default]
    Open,
    /// Substring lookup of a fixed vocabulary.
    Vocabulary,
}

/// Weighting applied by the score aggregator. Uniform across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub similarity: f64,
    pub skill: f64,
}

impl ScoreWeights {
    /// 0.6 text similarity + 0.4 skill overlap.
    pub const TEXT_HEAVY: ScoreWeights = ScoreWeights {
        similarity: 0.6,
        skill: 0.4,
    };

    /// 0.7 skill overlap + 0.3 text similarity, for vocabulary-driven runs.
    pub const SKILL_HEAVY: ScoreWeights = ScoreWeights {
        similarity: 0.3,
        skill: 0.7,
    };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::TEXT_HEAVY
    }
}

/// Lower bounds (inclusive) of the match-quality bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchBands {
    pub high: f64,
    pub medium: f64,
}

impl Default for MatchBands {
    fn default() -> Self {
        Self {
            high: 70.0,
            medium: 40.0,
        }
    }
}

/// Lower bounds (inclusive) of the resume-quality summary labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityBands {
    pub excellent: u32,
    pub good: u32,
    pub needs_improvement: u32,
}

impl Default for QualityBands {
    fn default() -> Self {
        Self {
            excellent: 90,
            good: 70,
            needs_improvement: 50,
        }
    }
}

/// Point scheme of the quality analyzer. The defaults sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRubric {
    pub field_points: u32,
    /// Word counts below this earn no length points.
    pub short_below: usize,
    /// Word counts above this earn `long_points`, otherwise `medium_points`.
    pub long_above: usize,
    pub medium_points: u32,
    pub long_points: u32,
    pub sections: Vec<String>,
    pub section_points: u32,
}

impl Default for QualityRubric {
    fn default() -> Self {
        Self {
            field_points: 10,
            short_below: 100,
            long_above: 250,
            medium_points: 10,
            long_points: 20,
            sections: ["education", "experience", "skills", "projects"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            section_points: 10,
        }
    }
}

/// All data the engine consults. Supplied once at construction; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub skill_mode: SkillMode,
    pub vocabulary: Vec<String>,
    pub stoplist: Vec<String>,
    pub section_headers: Vec<String>,
    pub section_stop_keys: Vec<String>,
    pub text_stop_words: Vec<String>,
    /// Fuzzy matches require a ratio strictly above this value.
    pub fuzzy_threshold: f64,
    pub weights: ScoreWeights,
    pub match_bands: MatchBands,
    pub quality_bands: QualityBands,
    pub quality_rubric: QualityRubric,
    pub shortlist_threshold: f64,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skill_mode: SkillMode::default(),
            vocabulary: owned(DEFAULT_VOCABULARY),
            stoplist: owned(DEFAULT_STOPLIST),
            section_headers: owned(DEFAULT_SECTION_HEADERS),
            section_stop_keys: owned(DEFAULT_SECTION_STOP_KEYS),
            text_stop_words: owned(DEFAULT_TEXT_STOP_WORDS),
            fuzzy_threshold: 0.85,
            weights: ScoreWeights::default(),
            match_bands: MatchBands::default(),
            quality_bands: QualityBands::default(),
            quality_rubric: QualityRubric::default(),
            shortlist_threshold: 55.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_text_heavy() {
        let w = ScoreWeights::default();
        assert!((w.similarity - 0.6).abs() < f64::EPSILON);
        assert!((w.skill - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_rubric_sums_to_100() {
        let r = QualityRubric::default();
        let max = 4 * r.field_points + r.long_points + r.sections.len() as u32 * r.section_points;
        assert_eq!(max, 100);
    }

    #[test]
    fn test_stoplist_contains_required() {
        let stoplist = EngineConfig::default().stoplist;
        assert!(stoplist.iter().any(|s| s == "required"));
        assert!(!stoplist.iter().any(|s| s == "python"));
    }
}
