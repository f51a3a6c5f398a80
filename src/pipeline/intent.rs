use std::sync::LazyLock;

use regex::Regex;

use crate::models::enums::{DoctorIntent, SpecialtyIntent};

/// Ordered cascade of (pattern, intent) pairs for doctor queries.
/// Evaluated top to bottom; the first match wins. A message matching both
/// the price and the female pattern is therefore a price query.
static DOCTOR_INTENT_CASCADE: LazyLock<Vec<(Regex, DoctorIntent)>> = LazyLock::new(|| {
    [
        (
            r"(?i)giá khám|bảng giá|mức giá|chi phí|phí khám|bao nhiêu tiền|hết bao nhiêu|\bprice\b|\bcost\b|\bfee\b",
            DoctorIntent::Price,
        ),
        (
            r"(?i)bác sĩ nữ|nữ bác sĩ|là nữ|nữ giới|\bfemale\b",
            DoctorIntent::Female,
        ),
        (
            r"(?i)bác sĩ nam|nam bác sĩ|là nam|nam giới|\bmale\b",
            DoctorIntent::Male,
        ),
        (
            r"(?i)bác sĩ trẻ|trẻ tuổi|\byoung\b",
            DoctorIntent::Young,
        ),
        (
            r"(?i)lớn tuổi|lâu năm|kỳ cựu|nhiều kinh nghiệm|giàu kinh nghiệm|\bsenior\b",
            DoctorIntent::Senior,
        ),
        (
            r"(?i)đánh giá tốt|đánh giá cao|được đánh giá|review tốt|uy tín|tốt nhất|\bbest\b|\btop\b",
            DoctorIntent::TopReview,
        ),
        (
            r"(?i)so sánh|đối chiếu|\bcompare\b|\bversus\b|\bvs\b",
            DoctorIntent::Compare,
        ),
    ]
    .into_iter()
    .map(|(pattern, intent)| (compile(pattern), intent))
    .collect()
});

/// Patterns indicating a symptom description or a request for a specialty
/// recommendation.
static SPECIALTY_INTENT_CASCADE: LazyLock<Vec<(Regex, SpecialtyIntent)>> = LazyLock::new(|| {
    vec![(
        compile(
            r"(?i)triệu chứng|tôi bị|tôi đang bị|bị đau|đau đầu|đau bụng|đau ngực|ho khan|sốt cao|mệt mỏi|chóng mặt|buồn nôn|\bsymptoms?\b|nên khám khoa|khám khoa nào|khoa nào phù hợp",
        ),
        SpecialtyIntent::Symptom,
    )]
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("intent pattern must compile")
}

/// Detect the doctor sub-intent of a message. Falls through to `Default`.
pub fn detect_doctor_intent(text: &str) -> DoctorIntent {
    for (pattern, intent) in DOCTOR_INTENT_CASCADE.iter() {
        if pattern.is_match(text) {
            return *intent;
        }
    }
    DoctorIntent::Default
}

/// Detect the specialty sub-intent of a message. Falls through to `Default`.
pub fn detect_specialty_intent(text: &str) -> SpecialtyIntent {
    for (pattern, intent) in SPECIALTY_INTENT_CASCADE.iter() {
        if pattern.is_match(text) {
            return *intent;
        }
    }
    SpecialtyIntent::Default
}
