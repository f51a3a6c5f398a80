use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::QueryCategory;

/// One completed exchange within a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: i64,
    pub user_id: Option<i64>,
    pub session_id: String,
    pub message: String,
    pub response: String,
    pub message_type: QueryCategory,
    pub created_at: NaiveDateTime,
}

/// Per-session roll-up for a user's history sidebar.
/// `preview_message` is the message of the session's earliest turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub last_activity: NaiveDateTime,
    pub preview_message: String,
}
