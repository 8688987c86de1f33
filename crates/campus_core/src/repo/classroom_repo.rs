//! Classroom repository contract and SQLite implementation.

use crate::model::record::{ClassroomRecord, RecordId};
use crate::repo::{ensure_changed, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CLASSROOM_SELECT_SQL: &str = "SELECT id, room_token, details FROM classrooms";

/// Storage contract for classroom details.
pub trait ClassroomRepository {
    fn create_classroom(&self, record: &ClassroomRecord) -> RepoResult<RecordId>;
    fn update_classroom(&self, record: &ClassroomRecord) -> RepoResult<()>;
    fn delete_classroom(&self, id: RecordId) -> RepoResult<()>;
    fn list_classrooms(&self) -> RepoResult<Vec<ClassroomRecord>>;
    /// First classroom whose room token contains `fragment`, ignoring case.
    fn find_by_room_fragment(&self, fragment: &str) -> RepoResult<Option<ClassroomRecord>>;
}

/// SQLite-backed classroom repository.
pub struct SqliteClassroomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClassroomRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClassroomRepository for SqliteClassroomRepository<'_> {
    fn create_classroom(&self, record: &ClassroomRecord) -> RepoResult<RecordId> {
        record.validate()?;
        self.conn.execute(
            "INSERT INTO classrooms (room_token, details) VALUES (?1, ?2);",
            params![record.room_token.as_str(), record.details.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_classroom(&self, record: &ClassroomRecord) -> RepoResult<()> {
        record.validate()?;
        let id = record.id.ok_or_else(|| {
            RepoError::InvalidData("cannot update a classroom without an id".to_string())
        })?;
        let changed = self.conn.execute(
            "UPDATE classrooms SET room_token = ?1, details = ?2 WHERE id = ?3;",
            params![record.room_token.as_str(), record.details.as_str(), id],
        )?;
        ensure_changed(changed, "classrooms", id)
    }

    fn delete_classroom(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM classrooms WHERE id = ?1;", [id])?;
        ensure_changed(changed, "classrooms", id)
    }

    fn list_classrooms(&self) -> RepoResult<Vec<ClassroomRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLASSROOM_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_classroom_row(row)?);
        }
        Ok(records)
    }

    fn find_by_room_fragment(&self, fragment: &str) -> RepoResult<Option<ClassroomRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CLASSROOM_SELECT_SQL}
             WHERE instr(lower(room_token), lower(?1)) > 0
             ORDER BY id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query([fragment])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_classroom_row(row)?)),
            None => Ok(None),
        }
    }
}

fn parse_classroom_row(row: &Row<'_>) -> RepoResult<ClassroomRecord> {
    Ok(ClassroomRecord {
        id: Some(row.get("id")?),
        room_token: row.get("room_token")?,
        details: row.get("details")?,
    })
}
