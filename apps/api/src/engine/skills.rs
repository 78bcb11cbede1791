//! Skill extraction: vocabulary lookup, or open extraction from a located skills block.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::engine::config::{EngineConfig, SkillMode};
use crate::engine::normalize::normalize_token;

static DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\r\n;/|&•·▪●◦]+").unwrap());
static PAREN_ASIDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());
static CONJUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\band\b").unwrap());

/// Extracts skill sets from document text using the configured lists.
///
/// Header and stop-key patterns are compiled once here; extraction itself is pure.
pub struct SkillExtractor {
    mode: SkillMode,
    vocabulary: Vec<String>,
    stoplist: HashSet<String>,
    headers: Vec<Regex>,
    stop_keys: Vec<Regex>,
}

impl SkillExtractor {
    pub fn new(config: &EngineConfig) -> Self {
        let headers = compile_all(&config.section_headers, |key| {
            format!(r"(?i)\b{}\b[ \t]*[:\-]?", regex::escape(key))
        });
        let stop_keys = compile_all(&config.section_stop_keys, |key| {
            format!(r"(?i)^\s*{}\b", regex::escape(key))
        });

        Self {
            mode: config.skill_mode,
            vocabulary: config.vocabulary.clone(),
            stoplist: config.stoplist.iter().cloned().collect(),
            headers,
            stop_keys,
        }
    }

    /// Extracts skills in the configured mode.
    pub fn extract(&self, text: &str) -> Vec<String> {
        match self.mode {
            SkillMode::Open => self.extract_open(text),
            SkillMode::Vocabulary => self.extract_with_vocabulary(text, &self.vocabulary),
        }
    }

    /// Returns every vocabulary entry that occurs as a substring of `text` (case-insensitive),
    /// in vocabulary order. An empty vocabulary yields an empty set.
    pub fn extract_with_vocabulary(&self, text: &str, vocabulary: &[String]) -> Vec<String> {
        if text.is_empty() || vocabulary.is_empty() {
            return Vec::new();
        }
        let haystack = text.to_lowercase();

        let hits = vocabulary.iter().filter(|entry| {
            let needle = entry.trim().to_lowercase();
            !needle.is_empty() && haystack.contains(&needle)
        });
        self.keep_valid(hits.map(|entry| normalize_token(entry)))
    }

    /// Splits the skills block (or the whole text, if no header is found) into tokens.
    pub fn extract_open(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chunk = match self.locate_block(text) {
            Some(block) if !block.trim().is_empty() => block,
            _ => {
                debug!("No skills header found, splitting the whole document");
                text
            }
        };

        let asides = PAREN_ASIDE
            .captures_iter(chunk)
            .filter_map(|c| c.get(1).map(|m| m.as_str().trim().to_string()));
        let pieces: Vec<String> = DELIMITERS
            .split(chunk)
            .map(|s| s.trim().to_string())
            .chain(asides)
            .filter(|s| !s.is_empty())
            .collect();

        let tokens = pieces.iter().flat_map(|piece| {
            CONJUNCTION
                .replace_all(piece, ",")
                .split(',')
                .map(normalize_token)
                .collect::<Vec<_>>()
        });
        self.keep_valid(tokens)
    }

    /// Finds the text following the first configured header that occurs in `text`.
    ///
    /// The block is the rest of the header's line. When that is blank, the block runs over
    /// the following lines up to the first line opening with a stop-key.
    pub fn locate_block<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = self
            .headers
            .iter()
            .find_map(|re| re.find(text).map(|m| m.end()))?;

        let rest = &text[start..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        let same_line = &rest[..line_end];
        if !same_line.trim().is_empty() {
            return Some(same_line);
        }

        let body_start = (line_end + 1).min(rest.len());
        let body = &rest[body_start..];
        let mut end = body.len();
        let mut offset = 0;
        for line in body.split_inclusive('\n') {
            if self.stop_keys.iter().any(|re| re.is_match(line)) {
                end = offset;
                break;
            }
            offset += line.len();
        }
        Some(&body[..end])
    }

    fn keep_valid(&self, tokens: impl Iterator<Item = String>) -> Vec<String> {
        let mut seen = HashSet::new();
        tokens
            .filter(|t| t.chars().count() > 1 && !self.stoplist.contains(t))
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}

fn compile_all(keys: &[String], pattern: impl Fn(&str) -> String) -> Vec<Regex> {
    keys.iter()
        .filter(|k| !k.trim().is_empty())
        .filter_map(|k| match Regex::new(&pattern(k.trim())) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Skipping unusable section key '{k}': {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> SkillExtractor {
        SkillExtractor::new(&EngineConfig::default())
    }

    fn vocabulary_mode() -> SkillExtractor {
        SkillExtractor::new(&EngineConfig {
            skill_mode: SkillMode::Vocabulary,
            ..EngineConfig::default()
        })
    }

    const RESUME: &str = "Jane Doe\njane@example.com\n\
        Summary: data analyst with five years in retail\n\
        Technical Skills: Python, SQL & Excel; Power-BI (DAX)\n\
        Experience\nAnalyst at Shop, 2019-2024\n";

    #[test]
    fn test_open_extraction_reads_header_line() {
        let skills = open().extract_open(RESUME);
        assert_eq!(skills, vec!["python", "sql", "excel", "power bi dax", "dax"]);
    }

    #[test]
    fn test_open_extraction_header_on_own_line_runs_to_stop_key() {
        let text = "John Smith\nSKILLS\n- Rust\n- Kubernetes\n- Go\nEducation\nBSc Physics, MIT\n";
        let skills = open().extract_open(text);
        assert_eq!(skills, vec!["rust", "kubernetes", "go"]);
    }

    #[test]
    fn test_open_extraction_without_header_uses_whole_text() {
        let text = "Python, Docker, AWS and Terraform";
        let skills = open().extract_open(text);
        assert_eq!(skills, vec!["python", "docker", "aws", "terraform"]);
    }

    #[test]
    fn test_open_extraction_never_yields_stoplisted_tokens() {
        let text = "Required, Python, Qualifications, Experience, SQL, required";
        let skills = open().extract_open(text);
        assert!(!skills.iter().any(|s| s == "required"));
        assert_eq!(skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_open_extraction_drops_single_characters_and_keeps_cpp() {
        let skills = open().extract_open("C, R, C++, C#");
        assert_eq!(skills, vec!["c++", "c#"]);
    }

    #[test]
    fn test_open_extraction_dedupes_in_first_seen_order() {
        let skills = open().extract_open("SQL, python, Python, sql, deep-learning, Deep Learning");
        assert_eq!(skills, vec!["sql", "python", "deep learning"]);
    }

    #[test]
    fn test_open_extraction_empty_text() {
        assert!(open().extract_open("").is_empty());
        assert!(open().extract_open("   ").is_empty());
    }

    #[test]
    fn test_locate_block_none_without_header() {
        assert!(open().locate_block("Python, SQL").is_none());
    }

    #[test]
    fn test_vocabulary_extraction_substring_match() {
        let skills = vocabulary_mode().extract("We need Python, SQL and some Machine Learning.");
        assert_eq!(skills, vec!["python", "sql", "machine learning"]);
    }

    #[test]
    fn test_vocabulary_extraction_normalizes_hits() {
        let skills = vocabulary_mode().extract("Experience with scikit-learn and C++");
        assert!(skills.contains(&"c++".to_string()));
        assert!(skills.contains(&"scikit learn".to_string()));
    }

    #[test]
    fn test_vocabulary_extraction_empty_vocabulary_is_empty() {
        let skills = open().extract_with_vocabulary("python sql", &[]);
        assert!(skills.is_empty());
    }

    #[test]
    fn test_extract_dispatches_on_mode() {
        let text = "Skills: Rust, Python";
        assert_eq!(open().extract(text), vec!["rust", "python"]);
        assert_eq!(vocabulary_mode().extract(text), vec!["python"]);
    }
}
