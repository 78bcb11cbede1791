//! Resume matcher: ranks candidate resumes against a job description by combining
//! skill overlap with whole-document text similarity, alongside a JD-independent
//! resume quality check.

pub mod config;
pub mod engine;
pub mod errors;
pub mod ingest;
pub mod matching;
pub mod routes;
pub mod state;
