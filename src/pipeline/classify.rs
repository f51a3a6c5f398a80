use crate::models::enums::QueryCategory;

/// Keyword sets per category, in priority order. First category whose set
/// matches the case-folded message wins; matching is substring-based, so a
/// keyword anywhere in the message counts.
const CATEGORY_KEYWORDS: &[(QueryCategory, &[&str])] = &[
    (
        QueryCategory::Doctor,
        &["bác sĩ", "doctor", "chuyên gia", "bs"],
    ),
    (
        QueryCategory::Specialty,
        &["chuyên khoa", "specialty", "khoa"],
    ),
    (
        QueryCategory::Clinic,
        &["phòng khám", "clinic", "bệnh viện", "cơ sở y tế"],
    ),
];

/// Classify a user message into a coarse category using keyword heuristics.
pub fn classify_query(text: &str) -> QueryCategory {
    let lower = text.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *category;
        }
    }

    QueryCategory::General
}
