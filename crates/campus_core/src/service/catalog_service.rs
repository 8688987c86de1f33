//! Catalog management use-cases.
//!
//! # Responsibility
//! - Upload, rename, replace and delete categorized resources.
//! - Maintain classroom details and the dated calendar.
//!
//! # Invariants
//! - A resource row is only written after its file is stored.
//! - Replaced or deleted resources leave no stored file behind.
//! - Calendar dates from admins must be `YYYY-MM-DD`.
//! - Edits are carried in an explicit [`ResourceEdit`], never in ambient state.

use crate::model::category::Category;
use crate::model::record::{
    parse_calendar_date, CalendarEntry, ClassroomRecord, RecordId, Resource, ValidationError,
};
use crate::repo::calendar_repo::CalendarRepository;
use crate::repo::classroom_repo::ClassroomRepository;
use crate::repo::resource_repo::ResourceRepository;
use crate::repo::RepoError;
use crate::storage::upload::{ensure_allowed_extension, UploadError, UploadStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    Validation(ValidationError),
    NotFound { table: &'static str, id: RecordId },
    Upload(UploadError),
    Repo(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{table} row not found: {id}"),
            Self::Upload(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Upload(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<UploadError> for CatalogError {
    fn from(value: UploadError) -> Self {
        Self::Upload(value)
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { table, id } => Self::NotFound { table, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// In-progress edit of one resource, obtained from
/// [`CatalogService::begin_resource_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEdit {
    pub id: RecordId,
    pub category: Category,
    pub current_name: String,
    pub current_locator: String,
}

/// Replacement content for a resource edit.
#[derive(Debug, Clone, Copy)]
pub struct ReplacementFile<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

/// Admin facade over the stores and upload storage.
pub struct CatalogService<R, C, E> {
    resources: R,
    classrooms: C,
    calendar: E,
    uploads: UploadStore,
}

impl<R, C, E> CatalogService<R, C, E>
where
    R: ResourceRepository,
    C: ClassroomRepository,
    E: CalendarRepository,
{
    pub fn new(resources: R, classrooms: C, calendar: E, uploads: UploadStore) -> Self {
        Self {
            resources,
            classrooms,
            calendar,
            uploads,
        }
    }

    /// Stores an uploaded file and records it as a resource of `category`.
    pub fn upload_resource(
        &self,
        category: Category,
        name: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> CatalogResult<Resource> {
        let mut resource = Resource::new(category, name.trim(), "pending");
        resource.validate()?;
        ensure_allowed_extension(file_name, category.allowed_extensions())?;

        resource.locator = self.uploads.save(name, file_name, bytes)?;
        match self.resources.create_resource(&resource) {
            Ok(id) => resource.id = Some(id),
            Err(err) => {
                self.discard_file(&resource.locator);
                return Err(err.into());
            }
        }

        info!(
            "event=resource_upload module=catalog status=ok category={:?} bytes={}",
            category,
            bytes.len()
        );
        Ok(resource)
    }

    pub fn list_resources(&self, category: Category) -> CatalogResult<Vec<Resource>> {
        Ok(self.resources.list_by_category(category)?)
    }

    /// Starts editing resource `id`.
    pub fn begin_resource_edit(&self, id: RecordId) -> CatalogResult<ResourceEdit> {
        let resource = self.require_resource(id)?;
        Ok(ResourceEdit {
            id,
            category: resource.category,
            current_name: resource.name,
            current_locator: resource.locator,
        })
    }

    /// Renames the resource and, when `replacement` is given, swaps its file.
    pub fn apply_resource_edit(
        &self,
        edit: ResourceEdit,
        new_name: &str,
        replacement: Option<ReplacementFile<'_>>,
    ) -> CatalogResult<Resource> {
        let mut resource = Resource {
            id: Some(edit.id),
            category: edit.category,
            name: new_name.trim().to_string(),
            locator: edit.current_locator.clone(),
        };
        resource.validate()?;

        let Some(file) = replacement else {
            self.resources.update_resource(&resource)?;
            return Ok(resource);
        };

        ensure_allowed_extension(file.file_name, edit.category.allowed_extensions())?;
        resource.locator = self.uploads.save(new_name, file.file_name, file.bytes)?;
        if let Err(err) = self.resources.update_resource(&resource) {
            self.discard_file(&resource.locator);
            return Err(err.into());
        }
        self.discard_file(&edit.current_locator);
        Ok(resource)
    }

    /// Deletes resource `id` and its stored file.
    pub fn delete_resource(&self, id: RecordId) -> CatalogResult<Resource> {
        let resource = self.require_resource(id)?;
        self.resources.delete_resource(id)?;
        self.discard_file(&resource.locator);
        Ok(resource)
    }

    pub fn add_classroom(&self, room_token: &str, details: &str) -> CatalogResult<ClassroomRecord> {
        let mut record = ClassroomRecord::new(room_token.trim(), details);
        record.id = Some(self.classrooms.create_classroom(&record)?);
        Ok(record)
    }

    pub fn update_classroom(
        &self,
        id: RecordId,
        room_token: &str,
        details: &str,
    ) -> CatalogResult<ClassroomRecord> {
        let mut record = ClassroomRecord::new(room_token.trim(), details);
        record.id = Some(id);
        self.classrooms.update_classroom(&record)?;
        Ok(record)
    }

    pub fn delete_classroom(&self, id: RecordId) -> CatalogResult<()> {
        Ok(self.classrooms.delete_classroom(id)?)
    }

    pub fn list_classrooms(&self) -> CatalogResult<Vec<ClassroomRecord>> {
        Ok(self.classrooms.list_classrooms()?)
    }

    /// Adds a calendar event for `date_text` (`YYYY-MM-DD`).
    pub fn add_calendar_event(&self, date_text: &str, event: &str) -> CatalogResult<CalendarEntry> {
        let mut entry = CalendarEntry::new(parse_calendar_date(date_text)?, event);
        entry.id = Some(self.calendar.create_entry(&entry)?);
        Ok(entry)
    }

    pub fn update_calendar_event(
        &self,
        id: RecordId,
        date_text: &str,
        event: &str,
    ) -> CatalogResult<CalendarEntry> {
        let mut entry = CalendarEntry::new(parse_calendar_date(date_text)?, event);
        entry.id = Some(id);
        self.calendar.update_entry(&entry)?;
        Ok(entry)
    }

    pub fn delete_calendar_event(&self, id: RecordId) -> CatalogResult<()> {
        Ok(self.calendar.delete_entry(id)?)
    }

    pub fn list_calendar(&self) -> CatalogResult<Vec<CalendarEntry>> {
        Ok(self.calendar.list_entries()?)
    }

    fn require_resource(&self, id: RecordId) -> CatalogResult<Resource> {
        self.resources
            .get_resource(id)?
            .ok_or(CatalogError::NotFound {
                table: "resources",
                id,
            })
    }

    fn discard_file(&self, locator: &str) {
        if let Err(err) = self.uploads.remove(locator) {
            warn!("event=upload_discard module=catalog status=error error={err}");
        }
    }
}
