//! Stored records: resources, classrooms and calendar entries.
//!
//! # Invariants
//! - Resource names and locators are non-empty.
//! - Only file-backed categories hold resources.
//! - Classroom room tokens are non-empty.
//! - Calendar dates are calendar-valid `YYYY-MM-DD` values.

use crate::model::category::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row id of a stored record.
pub type RecordId = i64;

/// Date text format accepted from admins and persisted in SQLite.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures for record invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    EmptyLocator,
    EmptyRoomToken,
    CategoryWithoutFiles(Category),
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "resource name cannot be empty"),
            Self::EmptyLocator => write!(f, "resource locator cannot be empty"),
            Self::EmptyRoomToken => write!(f, "room number cannot be empty"),
            Self::CategoryWithoutFiles(category) => {
                write!(f, "category `{category}` does not hold uploaded resources")
            }
            Self::InvalidDate(value) => {
                write!(f, "date must be in YYYY-MM-DD format, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// A stored, categorized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// `None` until persisted.
    pub id: Option<RecordId>,
    pub category: Category,
    /// Display title used for matching.
    pub name: String,
    /// Opaque reference to the content, e.g. an upload path.
    pub locator: String,
}

impl Resource {
    pub fn new(category: Category, name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            id: None,
            category,
            name: name.into(),
            locator: locator.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.category.holds_files() {
            return Err(ValidationError::CategoryWithoutFiles(self.category));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.locator.trim().is_empty() {
            return Err(ValidationError::EmptyLocator);
        }
        Ok(())
    }
}

/// Classroom detail record keyed by a free-form room token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomRecord {
    pub id: Option<RecordId>,
    pub room_token: String,
    pub details: String,
}

impl ClassroomRecord {
    pub fn new(room_token: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            id: None,
            room_token: room_token.into(),
            details: details.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.room_token.trim().is_empty() {
            return Err(ValidationError::EmptyRoomToken);
        }
        Ok(())
    }
}

/// One dated calendar event (holiday, working-day note, campus event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub id: Option<RecordId>,
    pub date: NaiveDate,
    pub event: String,
}

impl CalendarEntry {
    pub fn new(date: NaiveDate, event: impl Into<String>) -> Self {
        Self {
            id: None,
            date,
            event: event.into(),
        }
    }
}

/// Parses admin-provided `YYYY-MM-DD` text into a calendar date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), CALENDAR_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Formats a date the way calendar rows store it.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}
