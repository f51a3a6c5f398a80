use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::Specialty;

pub fn insert_specialty(
    conn: &Connection,
    name: &str,
    description_markdown: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO specialties (name, description_markdown) VALUES (?1, ?2)",
        params![name, description_markdown],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_specialties(conn: &Connection) -> Result<Vec<Specialty>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description_markdown FROM specialties ORDER BY id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Specialty {
            id: row.get(0)?,
            name: row.get(1)?,
            description_markdown: row.get(2)?,
        })
    })?;

    let mut specialties = Vec::new();
    for row in rows {
        specialties.push(row?);
    }
    Ok(specialties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn insert_and_list_specialties() {
        let conn = open_memory_database().unwrap();
        insert_specialty(&conn, "Tim mạch", Some("Chẩn đoán và điều trị bệnh tim")).unwrap();
        insert_specialty(&conn, "Da liễu", None).unwrap();

        let specialties = list_specialties(&conn).unwrap();
        assert_eq!(specialties.len(), 2);
        assert_eq!(specialties[0].name, "Tim mạch");
        assert!(specialties[1].description_markdown.is_none());
    }
}
