//! Resource repository contract and SQLite implementation.
//!
//! # Invariants
//! - Category lookups return rows in insertion (`id ASC`) order.
//! - Name-fragment lookups are case-insensitive substring matches.

use crate::model::category::Category;
use crate::model::record::{RecordId, Resource};
use crate::repo::{ensure_changed, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const RESOURCE_SELECT_SQL: &str = "SELECT id, category, name, locator FROM resources";

/// Storage contract for categorized resources.
pub trait ResourceRepository {
    fn create_resource(&self, resource: &Resource) -> RepoResult<RecordId>;
    fn update_resource(&self, resource: &Resource) -> RepoResult<()>;
    fn get_resource(&self, id: RecordId) -> RepoResult<Option<Resource>>;
    fn delete_resource(&self, id: RecordId) -> RepoResult<()>;
    /// All resources of `category`, oldest first.
    fn list_by_category(&self, category: Category) -> RepoResult<Vec<Resource>>;
    /// First resource of `category` whose name contains `fragment`, ignoring case.
    fn find_by_name_fragment(
        &self,
        category: Category,
        fragment: &str,
    ) -> RepoResult<Option<Resource>>;
}

/// SQLite-backed resource repository.
pub struct SqliteResourceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResourceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ResourceRepository for SqliteResourceRepository<'_> {
    fn create_resource(&self, resource: &Resource) -> RepoResult<RecordId> {
        resource.validate()?;

        self.conn.execute(
            "INSERT INTO resources (category, name, locator) VALUES (?1, ?2, ?3);",
            params![
                resource.category.label(),
                resource.name.as_str(),
                resource.locator.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_resource(&self, resource: &Resource) -> RepoResult<()> {
        resource.validate()?;
        let id = resource.id.ok_or_else(|| {
            RepoError::InvalidData("cannot update a resource without an id".to_string())
        })?;

        let changed = self.conn.execute(
            "UPDATE resources SET category = ?1, name = ?2, locator = ?3 WHERE id = ?4;",
            params![
                resource.category.label(),
                resource.name.as_str(),
                resource.locator.as_str(),
                id,
            ],
        )?;

        ensure_changed(changed, "resources", id)
    }

    fn get_resource(&self, id: RecordId) -> RepoResult<Option<Resource>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESOURCE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_resource_row(row)?)),
            None => Ok(None),
        }
    }

    fn delete_resource(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM resources WHERE id = ?1;", [id])?;
        ensure_changed(changed, "resources", id)
    }

    fn list_by_category(&self, category: Category) -> RepoResult<Vec<Resource>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESOURCE_SELECT_SQL} WHERE category = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([category.label()])?;
        let mut resources = Vec::new();
        while let Some(row) = rows.next()? {
            resources.push(parse_resource_row(row)?);
        }
        Ok(resources)
    }

    fn find_by_name_fragment(
        &self,
        category: Category,
        fragment: &str,
    ) -> RepoResult<Option<Resource>> {
        // instr() avoids LIKE wildcard escaping for `%` and `_` in user text.
        let mut stmt = self.conn.prepare(&format!(
            "{RESOURCE_SELECT_SQL}
             WHERE category = ?1
               AND instr(lower(name), lower(?2)) > 0
             ORDER BY id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query(params![category.label(), fragment])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_resource_row(row)?)),
            None => Ok(None),
        }
    }
}

fn parse_resource_row(row: &Row<'_>) -> RepoResult<Resource> {
    let label: String = row.get("category")?;
    let category = Category::from_label(&label).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid category `{label}` in resources.category"))
    })?;

    Ok(Resource {
        id: Some(row.get("id")?),
        category,
        name: row.get("name")?,
        locator: row.get("locator")?,
    })
}
