use serde::{Deserialize, Serialize};

use crate::models::enums::{DoctorIntent, SpecialtyIntent};

/// An inbound chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: Option<i64>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: None,
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// The caller-visible result of a successful exchange.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
    /// Side-effect outcome of the transcript append. Persistence is
    /// best-effort: a failed append never fails the exchange.
    pub persistence: PersistenceOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceOutcome {
    Saved { turn_id: i64 },
    Failed,
}

/// Conversation-derived context shared by every category payload.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    /// A prior response in the lookback window already greeted the user.
    pub greeted: bool,
    /// Rendered lookback window, when the session has history.
    pub transcript: Option<String>,
}

/// Compact doctor projection embedded in the doctor instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProjection {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub specialty: String,
    pub description: String,
    pub schedule: Vec<SlotProjection>,
    pub reviews: Vec<ReviewProjection>,
    /// Present only for price-intent queries; stripped everywhere else.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotProjection {
    pub date: String,
    pub timeslot: String,
    pub available: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewProjection {
    pub rating: i64,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyProjection {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicProjection {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub description: String,
}

/// Assembled payload for a doctor-category exchange.
#[derive(Debug, Clone)]
pub struct DoctorPayload {
    pub doctors: Vec<DoctorProjection>,
    pub query: String,
    /// Sub-intent filter; `None` when the detector fell through to default.
    pub filter: Option<DoctorIntent>,
    pub greeted: bool,
    pub transcript: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SpecialtyPayload {
    pub specialties: Vec<SpecialtyProjection>,
    pub query: String,
    pub filter: Option<SpecialtyIntent>,
    pub greeted: bool,
    pub transcript: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClinicPayload {
    pub clinics: Vec<ClinicProjection>,
    pub query: String,
    pub greeted: bool,
    pub transcript: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeneralPayload {
    pub query: String,
    pub greeted: bool,
    pub transcript: Option<String>,
}
