//! Core engine for Campus Buddy.
//! Resolves free-text campus questions into events, classroom details or
//! stored resources, and manages the catalog those answers come from.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::Category;
pub use model::record::{
    parse_calendar_date, CalendarEntry, ClassroomRecord, RecordId, Resource, ValidationError,
};
pub use query::classifier::{classify, Classification, ClassificationSource};
pub use query::matcher::{match_resource, MatchKind, ResourceMatch};
pub use query::normalize::normalize;
pub use query::resolvers::{Clock, FixedClock, SystemClock};
pub use query::router::{QueryRouter, RouterOutcome};
pub use repo::calendar_repo::{CalendarRepository, SqliteCalendarRepository};
pub use repo::classroom_repo::{ClassroomRepository, SqliteClassroomRepository};
pub use repo::resource_repo::{ResourceRepository, SqliteResourceRepository};
pub use repo::{RepoError, RepoResult};
pub use service::answer_service::{AnswerService, Reply};
pub use service::catalog_service::{
    CatalogError, CatalogResult, CatalogService, ReplacementFile, ResourceEdit,
};
pub use service::fallback::{FallbackError, FallbackResponder, StaticFallback};
pub use storage::upload::{UploadError, UploadStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
