use chrono::Local;
use rusqlite::Connection;

use crate::db::repository::{self, NewTurn};
use crate::db::DatabaseError;
use crate::models::enums::QueryCategory;
use crate::models::{SessionSummary, Turn};

/// Manages the session transcript: appends, reads and deletes.
///
/// These are independent entry points — reads and deletes are not part of
/// the generation state machine.
pub struct SessionManager<'a> {
    conn: &'a Connection,
}

impl<'a> SessionManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append a completed exchange to a session's transcript.
    pub fn append_turn(
        &self,
        user_id: Option<i64>,
        session_id: &str,
        message: &str,
        response: &str,
        message_type: QueryCategory,
    ) -> Result<Turn, DatabaseError> {
        let created_at = Local::now().naive_local();
        let id = repository::insert_turn(
            self.conn,
            &NewTurn {
                user_id,
                session_id,
                message,
                response,
                message_type,
                created_at,
            },
        )?;

        Ok(Turn {
            id,
            user_id,
            session_id: session_id.to_string(),
            message: message.to_string(),
            response: response.to_string(),
            message_type,
            created_at,
        })
    }

    /// Full transcript of a session, oldest turn first.
    pub fn history(&self, session_id: &str) -> Result<Vec<Turn>, DatabaseError> {
        repository::turns_by_session(self.conn, session_id)
    }

    /// A user's sessions, newest activity first, with the opening message as
    /// preview.
    pub fn sessions_for_user(&self, user_id: i64) -> Result<Vec<SessionSummary>, DatabaseError> {
        repository::session_summaries_by_user(self.conn, user_id)
    }

    /// Delete a session's turns. Scoped to `user_id` when given; a session
    /// held by someone else is left untouched. Returns whether anything was
    /// removed.
    pub fn delete_session(
        &self,
        session_id: &str,
        user_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let deleted = repository::delete_session_turns(self.conn, session_id, user_id)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn append_then_read_back() {
        let conn = open_memory_database().unwrap();
        let manager = SessionManager::new(&conn);

        let turn = manager
            .append_turn(
                Some(7),
                "s1",
                "Tìm bác sĩ tim mạch",
                "Bác sĩ Nguyen Van A, chuyên khoa tim mạch.",
                QueryCategory::Doctor,
            )
            .unwrap();
        assert!(turn.id > 0);

        let history = manager.history("s1").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "Tìm bác sĩ tim mạch");
        assert_eq!(history[0].message_type, QueryCategory::Doctor);
    }

    #[test]
    fn append_preserves_existing_turns() {
        let conn = open_memory_database().unwrap();
        let manager = SessionManager::new(&conn);

        let first = manager
            .append_turn(None, "s1", "câu một", "trả lời một", QueryCategory::General)
            .unwrap();
        manager
            .append_turn(None, "s1", "câu hai", "trả lời hai", QueryCategory::General)
            .unwrap();

        let history = manager.history("s1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[0].message, "câu một");
    }

    #[test]
    fn delete_session_reports_whether_rows_went_away() {
        let conn = open_memory_database().unwrap();
        let manager = SessionManager::new(&conn);

        manager
            .append_turn(Some(7), "s1", "a", "b", QueryCategory::General)
            .unwrap();

        assert!(manager.delete_session("s1", Some(7)).unwrap());
        assert!(!manager.delete_session("s1", Some(7)).unwrap());
        assert!(manager.history("s1").unwrap().is_empty());
    }

    #[test]
    fn unknown_session_has_empty_history() {
        let conn = open_memory_database().unwrap();
        let manager = SessionManager::new(&conn);
        assert!(manager.history("missing").unwrap().is_empty());
    }
}
