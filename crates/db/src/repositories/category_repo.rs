//! Repository for the `category` table.

use impulso_core::dates;
use impulso_core::types::DbId;
use sqlx::SqliteExecutor;

use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::stats::CategoryWithCount;

/// Column list for category queries.
const COLUMNS: &str = "id, name, icon, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories in id order.
    pub async fn list<'e, E>(db: E) -> Result<Vec<Category>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM category ORDER BY id ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(db).await
    }

    /// Find a category by its ID.
    pub async fn find_by_id<'e, E>(db: E, id: DbId) -> Result<Option<Category>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM category WHERE id = ?1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Whether a category with this ID exists.
    pub async fn exists<'e, E>(db: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM category WHERE id = ?1)")
            .bind(id)
            .fetch_one(db)
            .await
    }

    /// List all categories with the number of resources filed under each.
    pub async fn list_with_resource_count<'e, E>(
        db: E,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.icon, c.created_at, c.updated_at,
                    COUNT(r.id) AS resource_count
             FROM category c
             LEFT JOIN resource r ON r.category_id = c.id
             GROUP BY c.id
             ORDER BY c.id ASC",
        )
        .fetch_all(db)
        .await
    }

    /// Count all categories.
    pub async fn count<'e, E>(db: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category")
            .fetch_one(db)
            .await
    }

    /// Create a new category, returning the created row.
    pub async fn create<'e, E>(db: E, input: &CreateCategory) -> Result<Category, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let now = dates::now_string();
        let query = format!(
            "INSERT INTO category (name, icon, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(&now)
            .fetch_one(db)
            .await
    }

    /// Overwrite a category by ID, returning the updated row.
    ///
    /// Returns `None` if no category has this ID.
    pub async fn update<'e, E>(
        db: E,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let now = dates::now_string();
        let query = format!(
            "UPDATE category SET name = ?2, icon = ?3, updated_at = ?4
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(&now)
            .fetch_optional(db)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    ///
    /// Resources referencing the category are removed by the store's
    /// `ON DELETE CASCADE`.
    pub async fn delete<'e, E>(db: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM category WHERE id = ?1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
