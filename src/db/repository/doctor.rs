use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{Doctor, Review, Schedule};

use super::turn::parse_date;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Directory data for a doctor being registered.
#[derive(Debug, Clone, Default)]
pub struct NewDoctor<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub position: Option<&'a str>,
    pub specialty_id: Option<i64>,
    pub clinic_id: Option<i64>,
    pub price: Option<i64>,
    pub description: Option<&'a str>,
    pub content_markdown: Option<&'a str>,
}

/// Register a doctor: a users row with role R2 plus its directory row.
pub fn insert_doctor(conn: &Connection, doctor: &NewDoctor) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO users (first_name, last_name, role_id, position)
         VALUES (?1, ?2, 'R2', ?3)",
        params![doctor.first_name, doctor.last_name, doctor.position],
    )?;
    let doctor_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO doctor_infor (doctor_id, specialty_id, clinic_id, price, description, content_markdown)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            doctor_id,
            doctor.specialty_id,
            doctor.clinic_id,
            doctor.price,
            doctor.description,
            doctor.content_markdown,
        ],
    )?;
    Ok(doctor_id)
}

/// All doctors with their directory data joined in.
pub fn list_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.first_name, u.last_name, u.position,
                s.name, c.name, di.description, di.content_markdown, di.price
         FROM users u
         LEFT JOIN doctor_infor di ON di.doctor_id = u.id
         LEFT JOIN specialties s ON s.id = di.specialty_id
         LEFT JOIN clinics c ON c.id = di.clinic_id
         WHERE u.role_id = 'R2'
         ORDER BY u.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Doctor {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            position: row.get(3)?,
            specialty: row.get(4)?,
            clinic: row.get(5)?,
            description: row.get(6)?,
            content_markdown: row.get(7)?,
            price: row.get(8)?,
        })
    })?;

    let mut doctors = Vec::new();
    for row in rows {
        doctors.push(row?);
    }
    Ok(doctors)
}

/// Add a bookable slot to a doctor's calendar.
pub fn insert_schedule(
    conn: &Connection,
    doctor_id: i64,
    date: NaiveDate,
    timeslot: &str,
    max_capacity: i64,
    current_bookings: i64,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO schedules (doctor_id, date, timeslot, max_capacity, current_bookings)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            doctor_id,
            date.format(DATE_FORMAT).to_string(),
            timeslot,
            max_capacity,
            current_bookings,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// A doctor's slots within [from, until) — the upper bound is exclusive.
pub fn schedules_in_range(
    conn: &Connection,
    doctor_id: i64,
    from: NaiveDate,
    until: NaiveDate,
) -> Result<Vec<Schedule>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, doctor_id, date, timeslot, max_capacity, current_bookings
         FROM schedules
         WHERE doctor_id = ?1 AND date >= ?2 AND date < ?3
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            doctor_id,
            from.format(DATE_FORMAT).to_string(),
            until.format(DATE_FORMAT).to_string(),
        ],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
            ))
        },
    )?;

    let mut schedules = Vec::new();
    for row in rows {
        let (id, doctor_id, date, timeslot, max_capacity, current_bookings) = row?;
        schedules.push(Schedule {
            id,
            doctor_id,
            date: parse_date(&date),
            timeslot,
            max_capacity,
            current_bookings,
        });
    }
    Ok(schedules)
}

/// Record a patient review for a doctor.
pub fn insert_review(
    conn: &Connection,
    doctor_id: i64,
    patient_id: Option<i64>,
    rating: i64,
    comment: Option<&str>,
    created_at: NaiveDateTime,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO reviews (doctor_id, patient_id, rating, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            doctor_id,
            patient_id,
            rating,
            comment,
            created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The most recent reviews for a doctor that carry a non-empty comment.
pub fn recent_reviews_with_comments(
    conn: &Connection,
    doctor_id: i64,
    limit: usize,
) -> Result<Vec<Review>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, doctor_id, patient_id, rating, comment, created_at
         FROM reviews
         WHERE doctor_id = ?1 AND comment IS NOT NULL AND comment != ''
         ORDER BY created_at DESC, id DESC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![doctor_id, limit as i64], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, Option<i64>>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut reviews = Vec::new();
    for row in rows {
        let (id, doctor_id, patient_id, rating, comment, created_at) = row?;
        reviews.push(Review {
            id,
            doctor_id,
            patient_id,
            rating,
            comment,
            created_at: NaiveDateTime::parse_from_str(&created_at, "%Y-%m-%d %H:%M:%S")
                .unwrap_or_default(),
        });
    }
    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::insert_specialty;
    use crate::db::sqlite::open_memory_database;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    fn reviewed_at(day: u32) -> NaiveDateTime {
        date(day).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn list_doctors_joins_directory_data() {
        let conn = open_memory_database().unwrap();
        let specialty_id = insert_specialty(&conn, "Tim mạch", Some("Khám và điều trị tim")).unwrap();
        insert_doctor(
            &conn,
            &NewDoctor {
                first_name: "A",
                last_name: "Nguyen Van",
                position: Some("Phó giáo sư"),
                specialty_id: Some(specialty_id),
                price: Some(300_000),
                description: Some("Hơn 20 năm kinh nghiệm"),
                ..Default::default()
            },
        )
        .unwrap();

        let doctors = list_doctors(&conn).unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].display_name(), "Nguyen Van A");
        assert_eq!(doctors[0].specialty.as_deref(), Some("Tim mạch"));
        assert_eq!(doctors[0].price, Some(300_000));
    }

    #[test]
    fn list_doctors_skips_non_doctor_users() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO users (first_name, last_name, role_id) VALUES ('B', 'Tran', 'R3')",
            [],
        )
        .unwrap();

        assert!(list_doctors(&conn).unwrap().is_empty());
    }

    #[test]
    fn schedule_range_upper_bound_is_exclusive() {
        let conn = open_memory_database().unwrap();
        let doctor_id = insert_doctor(&conn, &NewDoctor::default()).unwrap();
        insert_schedule(&conn, doctor_id, date(6), "08:00 - 09:00", 3, 1).unwrap();
        insert_schedule(&conn, doctor_id, date(8), "09:00 - 10:00", 3, 0).unwrap();
        insert_schedule(&conn, doctor_id, date(9), "08:00 - 09:00", 3, 0).unwrap();

        let slots = schedules_in_range(&conn, doctor_id, date(6), date(9)).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].date, date(6));
        assert_eq!(slots[1].date, date(8));
    }

    #[test]
    fn recent_reviews_drop_empty_comments_and_cap_at_limit() {
        let conn = open_memory_database().unwrap();
        let doctor_id = insert_doctor(&conn, &NewDoctor::default()).unwrap();
        insert_review(&conn, doctor_id, Some(1), 5, Some("Rất tận tâm"), reviewed_at(1)).unwrap();
        insert_review(&conn, doctor_id, Some(2), 4, None, reviewed_at(2)).unwrap();
        insert_review(&conn, doctor_id, Some(3), 3, Some(""), reviewed_at(3)).unwrap();
        insert_review(&conn, doctor_id, Some(4), 5, Some("Khám kỹ"), reviewed_at(4)).unwrap();
        insert_review(&conn, doctor_id, Some(5), 4, Some("Chu đáo"), reviewed_at(5)).unwrap();

        let reviews = recent_reviews_with_comments(&conn, doctor_id, 2).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].comment.as_deref(), Some("Chu đáo"));
        assert_eq!(reviews[1].comment.as_deref(), Some("Khám kỹ"));
    }
}
