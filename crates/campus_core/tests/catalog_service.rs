use campus_core::db::open_db_in_memory;
use campus_core::{
    AnswerService, CatalogError, CatalogService, Category, FixedClock, QueryRouter, RecordId,
    RepoError, RepoResult, ReplacementFile, Reply, Resource, ResourceRepository,
    SqliteCalendarRepository, SqliteClassroomRepository, SqliteResourceRepository,
    StaticFallback, UploadError, UploadStore, ValidationError,
};
use rusqlite::Connection;
use std::path::Path;

type SqliteCatalog<'conn> = CatalogService<
    SqliteResourceRepository<'conn>,
    SqliteClassroomRepository<'conn>,
    SqliteCalendarRepository<'conn>,
>;

fn catalog<'conn>(conn: &'conn Connection, uploads: &Path) -> SqliteCatalog<'conn> {
    CatalogService::new(
        SqliteResourceRepository::new(conn),
        SqliteClassroomRepository::new(conn),
        SqliteCalendarRepository::new(conn),
        UploadStore::new(uploads),
    )
}

#[test]
fn upload_stores_file_and_records_resource() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = catalog(&conn, dir.path());

    let resource = service
        .upload_resource(
            Category::ClassTimetables,
            "CSE Semester 3 Timetable",
            "scan.PNG",
            b"png-bytes",
        )
        .unwrap();

    assert!(resource.id.is_some());
    assert!(resource.locator.ends_with(".png"));
    assert!(Path::new(&resource.locator).starts_with(dir.path()));
    assert_eq!(std::fs::read(&resource.locator).unwrap(), b"png-bytes");
    assert_eq!(service.list_resources(Category::ClassTimetables).unwrap(), vec![resource]);
}

#[test]
fn upload_rejects_disallowed_extension_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    let service = catalog(&conn, &uploads);

    let err = service
        .upload_resource(Category::Pdfs, "Handbook", "handbook.png", b"x")
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Upload(UploadError::DisallowedExtension { .. })
    ));
    assert!(!uploads.exists());

    let err = service
        .upload_resource(Category::ClassroomNumbers, "204", "room.pdf", b"x")
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::CategoryWithoutFiles(_))
    ));
}

#[test]
fn edit_without_file_only_renames() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = catalog(&conn, dir.path());
    let original = service
        .upload_resource(Category::Pdfs, "Handbook", "handbook.pdf", b"v1")
        .unwrap();

    let edit = service.begin_resource_edit(original.id.unwrap()).unwrap();
    assert_eq!(edit.current_name, "Handbook");
    let updated = service
        .apply_resource_edit(edit, "Student Handbook", None)
        .unwrap();

    assert_eq!(updated.locator, original.locator);
    assert_eq!(updated.name, "Student Handbook");
    assert!(Path::new(&original.locator).exists());
}

#[test]
fn edit_with_file_replaces_and_removes_old_file() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = catalog(&conn, dir.path());
    let original = service
        .upload_resource(Category::ExamTimetables, "ECE Finals", "finals.pdf", b"v1")
        .unwrap();

    let edit = service.begin_resource_edit(original.id.unwrap()).unwrap();
    let updated = service
        .apply_resource_edit(
            edit,
            "ECE Finals 2026",
            Some(ReplacementFile {
                file_name: "finals.jpg",
                bytes: b"v2",
            }),
        )
        .unwrap();

    assert_ne!(updated.locator, original.locator);
    assert!(!Path::new(&original.locator).exists());
    let stored = UploadStore::new(dir.path()).read(&updated.locator).unwrap();
    assert_eq!(stored, b"v2");
}

#[test]
fn delete_removes_row_and_file_and_reports_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = catalog(&conn, dir.path());
    let resource = service
        .upload_resource(Category::EventSchedules, "Tech Fest", "fest.pdf", b"x")
        .unwrap();
    let id = resource.id.unwrap();

    service.delete_resource(id).unwrap();
    assert!(!Path::new(&resource.locator).exists());
    assert!(service.list_resources(Category::EventSchedules).unwrap().is_empty());

    assert!(matches!(
        service.delete_resource(id).unwrap_err(),
        CatalogError::NotFound { .. }
    ));
    assert!(matches!(
        service.begin_resource_edit(id).unwrap_err(),
        CatalogError::NotFound { .. }
    ));
}

/// Resource store whose deletes always fail.
struct ReadOnlyResources<'conn>(SqliteResourceRepository<'conn>);

impl ResourceRepository for ReadOnlyResources<'_> {
    fn create_resource(&self, resource: &Resource) -> RepoResult<RecordId> {
        self.0.create_resource(resource)
    }
    fn update_resource(&self, resource: &Resource) -> RepoResult<()> {
        self.0.update_resource(resource)
    }
    fn get_resource(&self, id: RecordId) -> RepoResult<Option<Resource>> {
        self.0.get_resource(id)
    }
    fn delete_resource(&self, _id: RecordId) -> RepoResult<()> {
        Err(RepoError::InvalidData("resources are read-only".to_string()))
    }
    fn list_by_category(&self, category: Category) -> RepoResult<Vec<Resource>> {
        self.0.list_by_category(category)
    }
    fn find_by_name_fragment(
        &self,
        category: Category,
        fragment: &str,
    ) -> RepoResult<Option<Resource>> {
        self.0.find_by_name_fragment(category, fragment)
    }
}

#[test]
fn failed_row_delete_keeps_the_stored_file() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let resource = catalog(&conn, dir.path())
        .upload_resource(Category::Pdfs, "Handbook", "handbook.pdf", b"x")
        .unwrap();

    let service = CatalogService::new(
        ReadOnlyResources(SqliteResourceRepository::new(&conn)),
        SqliteClassroomRepository::new(&conn),
        SqliteCalendarRepository::new(&conn),
        UploadStore::new(dir.path()),
    );
    let err = service.delete_resource(resource.id.unwrap()).unwrap_err();

    assert!(matches!(err, CatalogError::Repo(RepoError::InvalidData(_))));
    assert!(Path::new(&resource.locator).exists());
    assert_eq!(service.list_resources(Category::Pdfs).unwrap(), vec![resource]);
}

#[test]
fn classrooms_can_be_added_updated_and_deleted() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = catalog(&conn, dir.path());

    let room = service.add_classroom(" 204 ", "Block A").unwrap();
    assert_eq!(room.room_token, "204");
    service
        .update_classroom(room.id.unwrap(), "204", "Block A, projector")
        .unwrap();
    assert_eq!(service.list_classrooms().unwrap()[0].details, "Block A, projector");

    service.delete_classroom(room.id.unwrap()).unwrap();
    assert!(service.list_classrooms().unwrap().is_empty());
    assert!(matches!(
        service.delete_classroom(room.id.unwrap()).unwrap_err(),
        CatalogError::NotFound { .. }
    ));
}

#[test]
fn calendar_events_require_iso_dates() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = catalog(&conn, dir.path());

    let err = service.add_calendar_event("17-10-2026", "Diwali").unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::InvalidDate(_))
    ));

    let later = service.add_calendar_event("2026-11-08", "Diwali").unwrap();
    let earlier = service.add_calendar_event("2026-10-17", "Hackathon").unwrap();
    service
        .update_calendar_event(earlier.id.unwrap(), "2026-10-17", "Hackathon finals")
        .unwrap();

    let events: Vec<_> = service
        .list_calendar()
        .unwrap()
        .into_iter()
        .map(|entry| entry.event)
        .collect();
    assert_eq!(events, vec!["Hackathon finals", "Diwali"]);

    service.delete_calendar_event(later.id.unwrap()).unwrap();
    assert_eq!(service.list_calendar().unwrap().len(), 1);
}

#[test]
fn uploaded_resources_are_answerable_end_to_end() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = catalog(&conn, dir.path());
    let uploaded = service
        .upload_resource(Category::ExamTimetables, "IT Year 3 Mid Exams", "mid.pdf", b"%PDF")
        .unwrap();
    service.add_calendar_event("2026-10-17", "Hackathon").unwrap();

    let router = QueryRouter::new(
        SqliteResourceRepository::new(&conn),
        SqliteClassroomRepository::new(&conn),
        SqliteCalendarRepository::new(&conn),
        FixedClock(campus_core::parse_calendar_date("2026-10-17").unwrap()),
    );
    let answers = AnswerService::new(StaticFallback::default());

    let query = "it 3rd year mid exam schedule";
    let reply = answers
        .render(query, router.resolve(query).unwrap())
        .unwrap();
    assert_eq!(
        reply,
        Reply::Resource {
            message: "Here is the exam timetables for it 3rd year mid:".to_string(),
            locator: uploaded.locator.clone(),
            mime_type: "application/pdf",
        }
    );

    let query = "events today";
    let reply = answers.render(query, router.resolve(query).unwrap()).unwrap();
    assert_eq!(reply.message(), "Today's events:\n• Hackathon");
}
