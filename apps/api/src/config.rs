use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::engine::config::{EngineConfig, ScoreWeights, SkillMode};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub skill_mode: SkillMode,
    pub skill_vocabulary_file: Option<PathBuf>,
    pub weights: ScoreWeights,
    pub fuzzy_threshold: f64,
    pub shortlist_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
            skill_mode: engine.skill_mode,
            skill_vocabulary_file: None,
            weights: engine.weights,
            fuzzy_threshold: engine.fuzzy_threshold,
            shortlist_threshold: engine.shortlist_threshold,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            skill_mode: match std::env::var("SKILL_MODE") {
                Ok(v) => parse_skill_mode(&v)?,
                Err(_) => defaults.skill_mode,
            },
            skill_vocabulary_file: std::env::var("SKILL_VOCABULARY_FILE").ok().map(PathBuf::from),
            weights: match std::env::var("MATCH_WEIGHTING") {
                Ok(v) => parse_weighting(&v)?,
                Err(_) => defaults.weights,
            },
            fuzzy_threshold: parse_env("FUZZY_THRESHOLD", defaults.fuzzy_threshold)?,
            shortlist_threshold: parse_env("SHORTLIST_THRESHOLD", defaults.shortlist_threshold)?,
        })
    }

    /// Engine configuration with this service's overrides applied.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            bail!("FUZZY_THRESHOLD must be within [0, 1], got {}", self.fuzzy_threshold);
        }

        let mut engine = EngineConfig {
            skill_mode: self.skill_mode,
            weights: self.weights,
            fuzzy_threshold: self.fuzzy_threshold,
            shortlist_threshold: self.shortlist_threshold,
            ..EngineConfig::default()
        };
        if let Some(path) = &self.skill_vocabulary_file {
            engine.vocabulary = load_vocabulary(path)?;
        }
        Ok(engine)
    }
}

pub fn parse_skill_mode(value: &str) -> Result<SkillMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "open" => Ok(SkillMode::Open),
        "vocabulary" => Ok(SkillMode::Vocabulary),
        other => bail!("SKILL_MODE must be 'open' or 'vocabulary', got '{other}'"),
    }
}

pub fn parse_weighting(value: &str) -> Result<ScoreWeights> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(ScoreWeights::TEXT_HEAVY),
        "skill" => Ok(ScoreWeights::SKILL_HEAVY),
        other => bail!("MATCH_WEIGHTING must be 'text' or 'skill', got '{other}'"),
    }
}

/// Reads a newline-delimited vocabulary. Blank lines and `#` comments are skipped.
pub fn load_vocabulary(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read skill vocabulary '{}'", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
