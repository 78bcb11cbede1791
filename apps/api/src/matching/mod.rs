// Matching API: batch ranking of resumes against a job description, plus the
// JD-independent quality check and a skill-extraction preview.

pub mod handlers;
