//! Store contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define the lookups the query engine depends on.
//! - Keep SQL details out of the engine and the catalog services.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Updates and deletes of unknown ids return [`RepoError::NotFound`].

use crate::db::DbError;
use crate::model::record::{RecordId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod calendar_repo;
pub mod classroom_repo;
pub mod resource_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error shared by all repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { table: &'static str, id: RecordId },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{table} row not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn ensure_changed(changed: usize, table: &'static str, id: RecordId) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound { table, id });
    }
    Ok(())
}
