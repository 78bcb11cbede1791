use crate::engine::config::{QualityBands, QualityRubric};
use crate::engine::models::{Document, QualityLabel, QualityResult};

/// Scores structural completeness of a single document.
///
/// Additive scheme: contact fields and skills, a length band, and one increment per
/// canonical section mentioned anywhere in the text. Feedback lists contact gaps first,
/// then length, then a single combined entry for missing sections.
pub fn analyze_quality(
    document: &Document,
    word_count: usize,
    rubric: &QualityRubric,
    bands: &QualityBands,
) -> QualityResult {
    let mut score = 0;
    let mut feedback = Vec::new();

    let name_present = document
        .name
        .as_deref()
        .map(str::trim)
        .is_some_and(|n| !n.is_empty() && !n.eq_ignore_ascii_case("unknown"));
    let fields = [
        ("Name", name_present),
        ("Email", is_present(&document.email)),
        ("Phone", is_present(&document.phone)),
        ("Skills", !document.skills.is_empty()),
    ];
    for (field, present) in fields {
        if present {
            score += rubric.field_points;
        } else {
            feedback.push(format!("Missing {field}"));
        }
    }

    if word_count < rubric.short_below {
        feedback.push(format!("Too Short (<{} words)", rubric.short_below));
    } else if word_count <= rubric.long_above {
        score += rubric.medium_points;
    } else {
        score += rubric.long_points;
    }

    let text = document.raw_text.to_lowercase();
    let missing_sections: Vec<&str> = rubric
        .sections
        .iter()
        .map(String::as_str)
        .filter(|section| !text.contains(&section.to_lowercase()))
        .collect();
    let found = rubric.sections.len() - missing_sections.len();
    score += found as u32 * rubric.section_points;
    if !missing_sections.is_empty() {
        feedback.push(format!("Missing Sections: {}", missing_sections.join(", ")));
    }

    QualityResult {
        score,
        feedback,
        summary_label: classify_quality(score, bands),
    }
}

pub fn classify_quality(score: u32, bands: &QualityBands) -> QualityLabel {
    match score {
        s if s >= bands.excellent => QualityLabel::Excellent,
        s if s >= bands.good => QualityLabel::Good,
        s if s >= bands.needs_improvement => QualityLabel::NeedsImprovement,
        _ => QualityLabel::Poor,
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.trim().is_empty())
}
