use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::Clinic;

pub fn insert_clinic(
    conn: &Connection,
    name: &str,
    address: Option<&str>,
    description_markdown: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO clinics (name, address, description_markdown) VALUES (?1, ?2, ?3)",
        params![name, address, description_markdown],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_clinics(conn: &Connection) -> Result<Vec<Clinic>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, address, description_markdown FROM clinics ORDER BY id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Clinic {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            description_markdown: row.get(3)?,
        })
    })?;

    let mut clinics = Vec::new();
    for row in rows {
        clinics.push(row?);
    }
    Ok(clinics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn insert_and_list_clinics() {
        let conn = open_memory_database().unwrap();
        insert_clinic(
            &conn,
            "Phòng khám Đa khoa Thành Công",
            Some("165 Thái Hà, Hà Nội"),
            None,
        )
        .unwrap();

        let clinics = list_clinics(&conn).unwrap();
        assert_eq!(clinics.len(), 1);
        assert_eq!(clinics[0].address.as_deref(), Some("165 Thái Hà, Hà Nội"));
    }
}
