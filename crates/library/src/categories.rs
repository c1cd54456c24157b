//! Category-side operations.

use impulso_core::error::CoreError;
use impulso_core::types::DbId;
use impulso_db::models::category::{Category, CreateCategory, UpdateCategory};
use impulso_db::repositories::CategoryRepo;
use impulso_events::ChangeKind;

use crate::error::LibraryResult;
use crate::library::Library;

impl Library {
    /// List every category.
    pub async fn list_categories(&self) -> LibraryResult<Vec<Category>> {
        self.run("list_categories", CategoryRepo::list(self.pool()))
            .await
    }

    /// Find a category by id. Absence is `Ok(None)`, not an error.
    pub async fn get_category(&self, id: DbId) -> LibraryResult<Option<Category>> {
        self.run("get_category", CategoryRepo::find_by_id(self.pool(), id))
            .await
    }

    /// Whether a category with this id exists. Used as the pre-write gate for
    /// every resource insert and update.
    pub async fn category_exists(&self, id: DbId) -> LibraryResult<bool> {
        self.run("category_exists", CategoryRepo::exists(self.pool(), id))
            .await
    }

    /// Insert a category. There is no referential constraint to check.
    pub async fn create_category(&self, input: &CreateCategory) -> LibraryResult<Category> {
        let category = self
            .run("create_category", CategoryRepo::create(self.pool(), input))
            .await?;
        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        self.publish(ChangeKind::CategoryCreated, Some(category.id));
        Ok(category)
    }

    /// Overwrite a category's name and icon by id.
    ///
    /// Fails with [`CoreError::NotFound`] if the id does not exist.
    pub async fn update_category(&self, category: &Category) -> LibraryResult<Category> {
        let input = UpdateCategory::from(category);
        let updated = self
            .run(
                "update_category",
                CategoryRepo::update(self.pool(), category.id, &input),
            )
            .await?
            .ok_or(CoreError::NotFound {
                entity: "category",
                id: category.id,
            })?;
        tracing::info!(category_id = updated.id, "Category updated");
        self.publish(ChangeKind::CategoryUpdated, Some(updated.id));
        Ok(updated)
    }

    /// Delete a category.
    ///
    /// See [`delete_category_by_id`](Self::delete_category_by_id).
    pub async fn delete_category(&self, category: &Category) -> LibraryResult<()> {
        self.delete_category_by_id(category.id).await
    }

    /// Bare delete of a category row.
    ///
    /// Resources filed under it are removed by the store's `ON DELETE
    /// CASCADE`. Callers that need the two-table removal to be explicit use
    /// [`delete_category_with_resources`](Self::delete_category_with_resources).
    /// Fails with [`CoreError::NotFound`] if the id does not exist.
    pub async fn delete_category_by_id(&self, id: DbId) -> LibraryResult<()> {
        let deleted = self
            .run("delete_category", CategoryRepo::delete(self.pool(), id))
            .await?;
        if !deleted {
            return Err(CoreError::NotFound {
                entity: "category",
                id,
            }
            .into());
        }
        tracing::info!(category_id = id, "Category deleted");
        self.publish(ChangeKind::CategoryDeleted, Some(id));
        Ok(())
    }
}
