//! Matching engine. Ranks candidate documents against one job description.
//!
//! Pipeline: normalize → extract skills → {skill overlap, fuzzy match, TF-IDF similarity}
//! → aggregate → rank. Quality analysis runs on each candidate independently of the JD.
//!
//! The engine is synchronous and holds no mutable state; candidates in a batch are scored
//! in parallel and only the final ranking step needs all of them.

pub mod config;
pub mod models;
pub mod normalize;
pub mod quality;
pub mod ranking;
pub mod scoring;
pub mod similarity;
pub mod skills;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::config::EngineConfig;
use crate::engine::models::{
    Document, JobProfile, MatchResult, QualityResult, RankedRow, ScoredCandidate,
};
use crate::engine::quality::analyze_quality;
use crate::engine::ranking::{rank, shortlist};
use crate::engine::scoring::{degraded_match, evaluate_match};
use crate::engine::skills::SkillExtractor;
use crate::ingest::contact::ContactFields;

/// Raw text of one candidate as handed over by ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateText {
    pub file_id: String,
    #[serde(default)]
    pub raw_text: String,
}

/// Ranked output of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub job_skills: Vec<String>,
    pub rows: Vec<RankedRow>,
    /// File ids at or above the shortlist threshold, in rank order.
    pub shortlisted: Vec<String>,
    /// Per-candidate problems that did not stop the batch.
    pub warnings: Vec<String>,
}

pub struct MatchEngine {
    config: EngineConfig,
    skills: SkillExtractor,
}

impl MatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        let skills = SkillExtractor::new(&config);
        Self { config, skills }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skills
    }

    pub fn prepare_job(&self, jd_text: &str) -> JobProfile {
        JobProfile {
            raw_text: jd_text.to_string(),
            skills: self.skills.extract(jd_text),
        }
    }

    pub fn build_document(&self, file_id: &str, raw_text: &str) -> Document {
        let contact = ContactFields::from_text(raw_text);
        Document {
            file_id: file_id.to_string(),
            raw_text: raw_text.to_string(),
            skills: self.skills.extract(raw_text),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }

    pub fn evaluate(&self, job: &JobProfile, candidate: &Document) -> MatchResult {
        evaluate_match(job, candidate, &self.config)
    }

    pub fn assess_quality(&self, document: &Document) -> QualityResult {
        analyze_quality(
            document,
            document.word_count(),
            &self.config.quality_rubric,
            &self.config.quality_bands,
        )
    }

    /// Builds, matches and quality-checks one candidate.
    pub fn score(&self, job: &JobProfile, candidate: &CandidateText) -> ScoredCandidate {
        let document = self.build_document(&candidate.file_id, &candidate.raw_text);
        let match_result = self.evaluate(job, &document);
        let quality = self.assess_quality(&document);
        ScoredCandidate {
            document,
            match_result,
            quality,
        }
    }

    /// Runs `score` with panics contained: a failing candidate gets a zero-score result
    /// and a warning naming it.
    fn score_candidate<F>(
        &self,
        job: &JobProfile,
        candidate: &CandidateText,
        score: F,
    ) -> (ScoredCandidate, Option<String>)
    where
        F: FnOnce(&JobProfile, &CandidateText) -> ScoredCandidate,
    {
        match panic::catch_unwind(AssertUnwindSafe(|| score(job, candidate))) {
            Ok(scored) => {
                debug!(
                    "{}: skill={:.2} similarity={:.2} final={:.2}",
                    scored.document.file_id,
                    scored.match_result.skill_score,
                    scored.match_result.similarity_score,
                    scored.match_result.final_score
                );
                (scored, None)
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!("Scoring failed for {}: {reason}", candidate.file_id);
                let document = Document {
                    file_id: candidate.file_id.clone(),
                    raw_text: candidate.raw_text.clone(),
                    skills: vec![],
                    name: None,
                    email: None,
                    phone: None,
                };
                let quality = self.assess_quality(&document);
                let scored = ScoredCandidate {
                    document,
                    match_result: degraded_match(job),
                    quality,
                };
                let warning = format!("{}: scoring failed ({reason}), scored 0", candidate.file_id);
                (scored, Some(warning))
            }
        }
    }

    /// Scores every candidate against `jd_text` and returns the ranked report.
    pub fn run_batch(&self, jd_text: &str, candidates: &[CandidateText]) -> BatchReport {
        self.run_batch_with(jd_text, candidates, |job, candidate| self.score(job, candidate))
    }

    fn run_batch_with<F>(&self, jd_text: &str, candidates: &[CandidateText], score: F) -> BatchReport
    where
        F: Fn(&JobProfile, &CandidateText) -> ScoredCandidate + Sync,
    {
        let started = Instant::now();
        let job = self.prepare_job(jd_text);

        let outcomes: Vec<(ScoredCandidate, Option<String>)> = candidates
            .par_iter()
            .map(|candidate| self.score_candidate(&job, candidate, &score))
            .collect();
        let (scored, warnings): (Vec<_>, Vec<_>) = outcomes.into_iter().unzip();
        let warnings: Vec<String> = warnings.into_iter().flatten().collect();

        let rows = rank(scored);
        let shortlisted = shortlist(&rows, self.config.shortlist_threshold);

        info!(
            "Ranked {} candidate(s) against {} JD skill(s) in {:?}",
            rows.len(),
            job.skills.len(),
            started.elapsed()
        );

        BatchReport {
            generated_at: Utc::now(),
            job_skills: job.skills,
            rows,
            shortlisted,
            warnings,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
