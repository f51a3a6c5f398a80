use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A patient review left for a doctor after a visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: Option<i64>,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}
