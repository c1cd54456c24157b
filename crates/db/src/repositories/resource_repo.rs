//! Repository for the `resource` table.

use impulso_core::dates;
use impulso_core::types::DbId;
use sqlx::SqliteExecutor;

use crate::models::resource::{CreateResource, Resource, ResourceCategoryRow, UpdateResource};

/// Column list for resource queries.
const COLUMNS: &str =
    "id, name, description, category_id, link, created_at, updated_at, is_favorite";

/// Select list for the resource/category join.
const JOIN_COLUMNS: &str = "r.id, r.name, r.description, r.category_id, r.link, \
     r.created_at, r.updated_at, r.is_favorite, \
     c.name AS category_name, c.icon AS category_icon, \
     c.created_at AS category_created_at, c.updated_at AS category_updated_at";

/// Provides CRUD operations for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// List all resources in id order.
    pub async fn list<'e, E>(db: E) -> Result<Vec<Resource>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM resource ORDER BY id ASC");
        sqlx::query_as::<_, Resource>(&query).fetch_all(db).await
    }

    /// Find a resource by its ID.
    pub async fn find_by_id<'e, E>(db: E, id: DbId) -> Result<Option<Resource>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM resource WHERE id = ?1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// List all resources filed under a category.
    pub async fn list_by_category<'e, E>(
        db: E,
        category_id: DbId,
    ) -> Result<Vec<Resource>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM resource WHERE category_id = ?1 ORDER BY id ASC");
        sqlx::query_as::<_, Resource>(&query)
            .bind(category_id)
            .fetch_all(db)
            .await
    }

    /// List all resources marked as favorite.
    pub async fn list_favorites<'e, E>(db: E) -> Result<Vec<Resource>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM resource WHERE is_favorite = 1 ORDER BY id ASC");
        sqlx::query_as::<_, Resource>(&query).fetch_all(db).await
    }

    /// List resources joined with their category.
    ///
    /// Uses a LEFT JOIN so a resource whose category does not resolve is
    /// still returned (with empty category columns) instead of vanishing.
    pub async fn list_with_category<'e, E>(
        db: E,
        category_id: Option<DbId>,
    ) -> Result<Vec<ResourceCategoryRow>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM resource r
             LEFT JOIN category c ON c.id = r.category_id
             WHERE ?1 IS NULL OR r.category_id = ?1
             ORDER BY r.id ASC"
        );
        sqlx::query_as::<_, ResourceCategoryRow>(&query)
            .bind(category_id)
            .fetch_all(db)
            .await
    }

    /// Count all resources.
    pub async fn count<'e, E>(db: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resource")
            .fetch_one(db)
            .await
    }

    /// Count the resources filed under a category.
    pub async fn count_by_category<'e, E>(db: E, category_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resource WHERE category_id = ?1")
            .bind(category_id)
            .fetch_one(db)
            .await
    }

    /// Create a new resource, returning the created row.
    pub async fn create<'e, E>(db: E, input: &CreateResource) -> Result<Resource, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let now = dates::now_string();
        let created_at = input.created_at.as_deref().unwrap_or(&now);
        let query = format!(
            "INSERT INTO resource
                (name, description, category_id, link, created_at, updated_at, is_favorite)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.link)
            .bind(created_at)
            .bind(&now)
            .bind(input.is_favorite)
            .fetch_one(db)
            .await
    }

    /// Overwrite a resource by ID, returning the updated row.
    ///
    /// Returns `None` if no resource has this ID.
    pub async fn update<'e, E>(
        db: E,
        id: DbId,
        input: &UpdateResource,
    ) -> Result<Option<Resource>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let now = dates::now_string();
        let query = format!(
            "UPDATE resource SET
                name = ?2,
                description = ?3,
                category_id = ?4,
                link = ?5,
                is_favorite = ?6,
                updated_at = ?7
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.link)
            .bind(input.is_favorite)
            .bind(&now)
            .fetch_optional(db)
            .await
    }

    /// Move every resource from one category to another.
    /// Returns the number of rows reassigned.
    pub async fn reassign_category<'e, E>(
        db: E,
        from_category_id: DbId,
        to_category_id: DbId,
    ) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE resource SET category_id = ?2, updated_at = ?3 WHERE category_id = ?1",
        )
        .bind(from_category_id)
        .bind(to_category_id)
        .bind(dates::now_string())
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a resource by ID. Returns `true` if a row was deleted.
    pub async fn delete<'e, E>(db: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM resource WHERE id = ?1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every resource filed under a category.
    /// Returns the number of rows deleted.
    pub async fn delete_by_category<'e, E>(db: E, category_id: DbId) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM resource WHERE category_id = ?1")
            .bind(category_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
