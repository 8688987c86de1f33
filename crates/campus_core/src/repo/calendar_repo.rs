//! Calendar repository contract and SQLite implementation.
//!
//! # Invariants
//! - Dates are stored as `YYYY-MM-DD` text so equality lookups are exact.

use crate::model::record::{format_calendar_date, CalendarEntry, RecordId, CALENDAR_DATE_FORMAT};
use crate::repo::{ensure_changed, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const CALENDAR_SELECT_SQL: &str = "SELECT id, date, event FROM calendar";

/// Storage contract for dated calendar entries.
pub trait CalendarRepository {
    fn create_entry(&self, entry: &CalendarEntry) -> RepoResult<RecordId>;
    fn update_entry(&self, entry: &CalendarEntry) -> RepoResult<()>;
    fn delete_entry(&self, id: RecordId) -> RepoResult<()>;
    /// All entries ordered by date, then id.
    fn list_entries(&self) -> RepoResult<Vec<CalendarEntry>>;
    /// Event texts dated exactly `date`, in insertion order.
    fn events_on(&self, date: NaiveDate) -> RepoResult<Vec<String>>;
}

/// SQLite-backed calendar repository.
pub struct SqliteCalendarRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCalendarRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CalendarRepository for SqliteCalendarRepository<'_> {
    fn create_entry(&self, entry: &CalendarEntry) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO calendar (date, event) VALUES (?1, ?2);",
            params![format_calendar_date(entry.date), entry.event.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_entry(&self, entry: &CalendarEntry) -> RepoResult<()> {
        let id = entry.id.ok_or_else(|| {
            RepoError::InvalidData("cannot update a calendar entry without an id".to_string())
        })?;
        let changed = self.conn.execute(
            "UPDATE calendar SET date = ?1, event = ?2 WHERE id = ?3;",
            params![format_calendar_date(entry.date), entry.event.as_str(), id],
        )?;
        ensure_changed(changed, "calendar", id)
    }

    fn delete_entry(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM calendar WHERE id = ?1;", [id])?;
        ensure_changed(changed, "calendar", id)
    }

    fn list_entries(&self) -> RepoResult<Vec<CalendarEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CALENDAR_SELECT_SQL} ORDER BY date ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_calendar_row(row)?);
        }
        Ok(entries)
    }

    fn events_on(&self, date: NaiveDate) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT event FROM calendar WHERE date = ?1 ORDER BY id ASC;")?;
        let mut rows = stmt.query([format_calendar_date(date)])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(row.get(0)?);
        }
        Ok(events)
    }
}

fn parse_calendar_row(row: &Row<'_>) -> RepoResult<CalendarEntry> {
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, CALENDAR_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in calendar.date"))
    })?;
    Ok(CalendarEntry {
        id: Some(row.get("id")?),
        date,
        event: row.get("event")?,
    })
}
