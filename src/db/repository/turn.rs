use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveDate};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::enums::QueryCategory;
use crate::models::{SessionSummary, Turn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A turn about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTurn<'a> {
    pub user_id: Option<i64>,
    pub session_id: &'a str,
    pub message: &'a str,
    pub response: &'a str,
    pub message_type: QueryCategory,
    pub created_at: NaiveDateTime,
}

/// Insert a completed exchange. Returns the store-assigned row id.
pub fn insert_turn(conn: &Connection, turn: &NewTurn) -> Result<i64, DatabaseError> {
    if turn.session_id.is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "session_id must not be empty".into(),
        ));
    }

    conn.execute(
        "INSERT INTO turns (user_id, session_id, message, response, message_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            turn.user_id,
            turn.session_id,
            turn.message,
            turn.response,
            turn.message_type.as_str(),
            turn.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All turns of a session, oldest first. Ties on created_at keep insertion order.
pub fn turns_by_session(conn: &Connection, session_id: &str) -> Result<Vec<Turn>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, session_id, message, response, message_type, created_at
         FROM turns WHERE session_id = ?1 ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![session_id], |row| {
        Ok(TurnRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            session_id: row.get(2)?,
            message: row.get(3)?,
            response: row.get(4)?,
            message_type: row.get(5)?,
            created_at: row.get(6)?,
        })
    })?;

    let mut turns = Vec::new();
    for row in rows {
        turns.push(turn_from_row(row?)?);
    }
    Ok(turns)
}

/// Per-session summaries for a user, most recent activity first.
/// The preview is the message of the session's earliest turn.
pub fn session_summaries_by_user(
    conn: &Connection,
    user_id: i64,
) -> Result<Vec<SessionSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT
            t.session_id,
            MAX(t.created_at) AS last_activity,
            (SELECT t2.message FROM turns t2
             WHERE t2.session_id = t.session_id
             ORDER BY t2.created_at ASC, t2.id ASC LIMIT 1) AS preview_message
         FROM turns t
         WHERE t.user_id = ?1
         GROUP BY t.session_id
         ORDER BY last_activity DESC, MAX(t.id) DESC",
    )?;

    let rows = stmt.query_map(params![user_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        let (session_id, last_activity, preview_message) = row?;
        summaries.push(SessionSummary {
            session_id,
            last_activity: parse_timestamp(&last_activity),
            preview_message,
        });
    }
    Ok(summaries)
}

/// Delete all turns of a session. When `user_id` is given the delete is
/// scoped: a session held by a different user is left untouched.
/// Returns the number of rows removed.
pub fn delete_session_turns(
    conn: &Connection,
    session_id: &str,
    user_id: Option<i64>,
) -> Result<usize, DatabaseError> {
    let deleted = match user_id {
        Some(uid) => conn.execute(
            "DELETE FROM turns WHERE session_id = ?1 AND user_id = ?2",
            params![session_id, uid],
        )?,
        None => conn.execute(
            "DELETE FROM turns WHERE session_id = ?1",
            params![session_id],
        )?,
    };
    Ok(deleted)
}

struct TurnRow {
    id: i64,
    user_id: Option<i64>,
    session_id: String,
    message: String,
    response: String,
    message_type: String,
    created_at: String,
}

fn turn_from_row(row: TurnRow) -> Result<Turn, DatabaseError> {
    Ok(Turn {
        id: row.id,
        user_id: row.user_id,
        session_id: row.session_id,
        message: row.message,
        response: row.response,
        message_type: QueryCategory::from_str(&row.message_type)?,
        created_at: parse_timestamp(&row.created_at),
    })
}

fn parse_timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap_or_default()
}

/// Parse a stored YYYY-MM-DD value.
pub(crate) fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn seed_turn(
        conn: &Connection,
        user_id: Option<i64>,
        session_id: &str,
        message: &str,
        created_at: NaiveDateTime,
    ) -> i64 {
        insert_turn(
            conn,
            &NewTurn {
                user_id,
                session_id,
                message,
                response: "Đây là câu trả lời.",
                message_type: QueryCategory::General,
                created_at,
            },
        )
        .unwrap()
    }

    #[test]
    fn insert_and_list_by_session() {
        let conn = open_memory_database().unwrap();
        seed_turn(&conn, Some(7), "s1", "first", at(1, 9));
        seed_turn(&conn, Some(7), "s1", "second", at(1, 10));
        seed_turn(&conn, Some(7), "other", "elsewhere", at(1, 11));

        let turns = turns_by_session(&conn, "s1").unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].message, "first");
        assert_eq!(turns[1].message, "second");
        assert_eq!(turns[0].message_type, QueryCategory::General);
    }

    #[test]
    fn list_by_session_is_idempotent() {
        let conn = open_memory_database().unwrap();
        seed_turn(&conn, None, "s1", "a", at(1, 9));
        seed_turn(&conn, None, "s1", "b", at(1, 9));

        let first = turns_by_session(&conn, "s1").unwrap();
        let second = turns_by_session(&conn, "s1").unwrap();
        let ids: Vec<i64> = first.iter().map(|t| t.id).collect();
        let ids_again: Vec<i64> = second.iter().map(|t| t.id).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let conn = open_memory_database().unwrap();
        let first = seed_turn(&conn, None, "s1", "a", at(1, 9));
        let second = seed_turn(&conn, None, "s1", "b", at(1, 9));

        let turns = turns_by_session(&conn, "s1").unwrap();
        assert_eq!(turns[0].id, first);
        assert_eq!(turns[1].id, second);
    }

    #[test]
    fn empty_session_id_rejected() {
        let conn = open_memory_database().unwrap();
        let result = insert_turn(
            &conn,
            &NewTurn {
                user_id: None,
                session_id: "",
                message: "hi",
                response: "ok",
                message_type: QueryCategory::General,
                created_at: at(1, 9),
            },
        );
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn summaries_sorted_by_last_activity_with_earliest_preview() {
        let conn = open_memory_database().unwrap();
        seed_turn(&conn, Some(7), "old", "old opener", at(1, 9));
        seed_turn(&conn, Some(7), "old", "old follow-up", at(1, 10));
        seed_turn(&conn, Some(7), "fresh", "fresh opener", at(2, 9));
        // Another user's session must not leak in
        seed_turn(&conn, Some(8), "theirs", "not mine", at(3, 9));

        let summaries = session_summaries_by_user(&conn, 7).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].session_id, "fresh");
        assert_eq!(summaries[0].preview_message, "fresh opener");
        assert_eq!(summaries[1].session_id, "old");
        assert_eq!(summaries[1].preview_message, "old opener");
        assert_eq!(summaries[1].last_activity, at(1, 10));
    }

    #[test]
    fn delete_unscoped_removes_all_turns() {
        let conn = open_memory_database().unwrap();
        seed_turn(&conn, Some(7), "s1", "a", at(1, 9));
        seed_turn(&conn, None, "s1", "b", at(1, 10));

        let deleted = delete_session_turns(&conn, "s1", None).unwrap();
        assert_eq!(deleted, 2);
        assert!(turns_by_session(&conn, "s1").unwrap().is_empty());
    }

    #[test]
    fn scoped_delete_skips_other_users_session() {
        let conn = open_memory_database().unwrap();
        seed_turn(&conn, Some(7), "s1", "mine", at(1, 9));

        let deleted = delete_session_turns(&conn, "s1", Some(8)).unwrap();
        assert_eq!(deleted, 0);
        assert_eq!(turns_by_session(&conn, "s1").unwrap().len(), 1);
    }
}
