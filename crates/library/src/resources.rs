//! Resource-side operations.

use impulso_core::error::CoreError;
use impulso_core::search::{matches_normalized, normalize_query};
use impulso_core::types::{DbId, PLACEHOLDER_ID};
use impulso_core::validation::normalize_link;
use impulso_db::models::resource::{
    CreateResource, Resource, ResourceCategoryRow, ResourceWithCategory, UpdateResource,
};
use impulso_db::repositories::{CategoryRepo, ResourceRepo};
use impulso_events::ChangeKind;

use crate::error::{LibraryError, LibraryResult, StoreError};
use crate::library::Library;

impl Library {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List every stored resource.
    pub async fn list_resources(&self) -> LibraryResult<Vec<Resource>> {
        self.run("list_resources", ResourceRepo::list(self.pool()))
            .await
    }

    /// Find a resource by id. Absence is `Ok(None)`, not an error.
    pub async fn get_resource(&self, id: DbId) -> LibraryResult<Option<Resource>> {
        self.run("get_resource", ResourceRepo::find_by_id(self.pool(), id))
            .await
    }

    pub async fn resource_exists(&self, id: DbId) -> LibraryResult<bool> {
        Ok(self.get_resource(id).await?.is_some())
    }

    /// List the resources filed under a category.
    pub async fn list_resources_by_category(
        &self,
        category_id: DbId,
    ) -> LibraryResult<Vec<Resource>> {
        self.run(
            "list_resources_by_category",
            ResourceRepo::list_by_category(self.pool(), category_id),
        )
        .await
    }

    pub async fn list_favorite_resources(&self) -> LibraryResult<Vec<Resource>> {
        self.run("list_favorite_resources", ResourceRepo::list_favorites(self.pool()))
            .await
    }

    /// List every resource joined with its category.
    ///
    /// A resource whose category does not resolve is a data-integrity
    /// violation and fails the whole call with [`StoreError::Inconsistent`].
    pub async fn list_resources_with_category(&self) -> LibraryResult<Vec<ResourceWithCategory>> {
        let rows = self
            .run(
                "list_resources_with_category",
                ResourceRepo::list_with_category(self.pool(), None),
            )
            .await?;
        resolve_joined(rows)
    }

    /// Joined listing restricted to one category.
    pub async fn list_resources_with_category_by_category(
        &self,
        category_id: DbId,
    ) -> LibraryResult<Vec<ResourceWithCategory>> {
        let rows = self
            .run(
                "list_resources_with_category_by_category",
                ResourceRepo::list_with_category(self.pool(), Some(category_id)),
            )
            .await?;
        resolve_joined(rows)
    }

    pub async fn list_favorite_resources_with_category(
        &self,
    ) -> LibraryResult<Vec<ResourceWithCategory>> {
        let mut joined = self.list_resources_with_category().await?;
        joined.retain(|j| j.resource.is_favorite);
        Ok(joined)
    }

    pub async fn count_by_category(&self, category_id: DbId) -> LibraryResult<i64> {
        self.run(
            "count_by_category",
            ResourceRepo::count_by_category(self.pool(), category_id),
        )
        .await
    }

    /// Whether at least one real (non-placeholder) resource is stored.
    pub async fn has_real_resources(&self) -> LibraryResult<bool> {
        Ok(self
            .list_resources()
            .await?
            .iter()
            .any(|r| !r.is_placeholder()))
    }

    /// Real resources if any exist, otherwise the single in-memory
    /// placeholder resource. The placeholder is never persisted.
    pub async fn list_resources_or_placeholder(&self) -> LibraryResult<Vec<Resource>> {
        let mut resources = self.list_resources().await?;
        resources.retain(|r| !r.is_placeholder());
        if resources.is_empty() {
            return Ok(vec![Resource::placeholder()]);
        }
        Ok(resources)
    }

    /// Joined counterpart of
    /// [`list_resources_or_placeholder`](Self::list_resources_or_placeholder).
    pub async fn list_resources_with_category_or_placeholder(
        &self,
    ) -> LibraryResult<Vec<ResourceWithCategory>> {
        let mut joined = self.list_resources_with_category().await?;
        joined.retain(|j| !j.resource.is_placeholder());
        if joined.is_empty() {
            return Ok(vec![ResourceWithCategory::placeholder()]);
        }
        Ok(joined)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Case-insensitive substring match on name or description.
    /// An empty query returns every resource.
    pub async fn search_by_name_or_description(&self, query: &str) -> LibraryResult<Vec<Resource>> {
        let needle = normalize_query(query);
        let mut resources = self.list_resources().await?;
        resources.retain(|r| matches_normalized(&needle, &[r.name.as_str(), r.description.as_str()]));
        Ok(resources)
    }

    pub async fn search_by_name(&self, query: &str) -> LibraryResult<Vec<Resource>> {
        let needle = normalize_query(query);
        let mut resources = self.list_resources().await?;
        resources.retain(|r| matches_normalized(&needle, &[r.name.as_str()]));
        Ok(resources)
    }

    pub async fn search_by_description(&self, query: &str) -> LibraryResult<Vec<Resource>> {
        let needle = normalize_query(query);
        let mut resources = self.list_resources().await?;
        resources.retain(|r| matches_normalized(&needle, &[r.description.as_str()]));
        Ok(resources)
    }

    /// Name-or-description search over the joined view.
    pub async fn search_with_category(
        &self,
        query: &str,
    ) -> LibraryResult<Vec<ResourceWithCategory>> {
        let needle = normalize_query(query);
        let mut joined = self.list_resources_with_category().await?;
        joined.retain(|j| {
            matches_normalized(
                &needle,
                &[j.resource.name.as_str(), j.resource.description.as_str()],
            )
        });
        Ok(joined)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a resource after checking that its category exists.
    ///
    /// The check, the insert, and the purge of any stray placeholder row run
    /// in one transaction, so the category cannot vanish in between.
    /// Fails with [`CoreError::ReferentialIntegrity`] if the category is
    /// missing.
    pub async fn create_resource(&self, input: &CreateResource) -> LibraryResult<Resource> {
        let mut input = input.clone();
        input.link = normalize_link(input.link.take());

        let created = self
            .run("create_resource", async {
                let mut tx = self.begin_write().await?;
                if !CategoryRepo::exists(&mut *tx, input.category_id).await? {
                    return Err(LibraryError::from(CoreError::ReferentialIntegrity {
                        category_id: input.category_id,
                    }));
                }
                let created = ResourceRepo::create(&mut *tx, &input).await?;
                if ResourceRepo::delete(&mut *tx, PLACEHOLDER_ID).await? {
                    tracing::warn!("Purged a persisted placeholder resource");
                }
                tx.commit().await?;
                Ok(created)
            })
            .await
            .inspect_err(|e| log_rejected_write("create_resource", e))?;

        tracing::info!(
            resource_id = created.id,
            category_id = created.category_id,
            "Resource created"
        );
        self.publish(ChangeKind::ResourceCreated, Some(created.id));
        Ok(created)
    }

    /// Overwrite a resource by id.
    ///
    /// The category check is re-applied on every update because the
    /// category may have changed. Fails with
    /// [`CoreError::ReferentialIntegrity`] if the category is missing and
    /// [`CoreError::NotFound`] if the resource is missing.
    pub async fn update_resource(&self, resource: &Resource) -> LibraryResult<Resource> {
        let mut input = UpdateResource::from(resource);
        input.link = normalize_link(input.link.take());

        let updated = self
            .run("update_resource", async {
                let mut tx = self.begin_write().await?;
                if !CategoryRepo::exists(&mut *tx, input.category_id).await? {
                    return Err(LibraryError::from(CoreError::ReferentialIntegrity {
                        category_id: input.category_id,
                    }));
                }
                let updated = ResourceRepo::update(&mut *tx, resource.id, &input)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "resource",
                        id: resource.id,
                    })?;
                tx.commit().await?;
                Ok(updated)
            })
            .await
            .inspect_err(|e| log_rejected_write("update_resource", e))?;

        tracing::info!(resource_id = updated.id, "Resource updated");
        self.publish(ChangeKind::ResourceUpdated, Some(updated.id));
        Ok(updated)
    }

    /// Flip a resource's favorite flag and persist it through
    /// [`update_resource`](Self::update_resource).
    ///
    /// Fails with [`CoreError::NotFound`] if the id does not exist.
    pub async fn toggle_favorite(&self, id: DbId) -> LibraryResult<Resource> {
        let mut resource = self.get_resource(id).await?.ok_or(CoreError::NotFound {
            entity: "resource",
            id,
        })?;
        resource.is_favorite = !resource.is_favorite;
        self.update_resource(&resource).await
    }

    pub async fn delete_resource(&self, resource: &Resource) -> LibraryResult<()> {
        self.delete_resource_by_id(resource.id).await
    }

    /// Fails with [`CoreError::NotFound`] if the id does not exist.
    pub async fn delete_resource_by_id(&self, id: DbId) -> LibraryResult<()> {
        let deleted = self
            .run("delete_resource", ResourceRepo::delete(self.pool(), id))
            .await?;
        if !deleted {
            return Err(CoreError::NotFound {
                entity: "resource",
                id,
            }
            .into());
        }
        tracing::info!(resource_id = id, "Resource deleted");
        self.publish(ChangeKind::ResourceDeleted, Some(id));
        Ok(())
    }

    /// Bulk delete of every resource filed under a category. Returns the
    /// number of resources removed.
    pub async fn delete_resources_by_category(&self, category_id: DbId) -> LibraryResult<u64> {
        let deleted = self
            .run(
                "delete_resources_by_category",
                ResourceRepo::delete_by_category(self.pool(), category_id),
            )
            .await?;
        tracing::info!(category_id, deleted, "Resources deleted by category");
        if deleted > 0 {
            self.publish(ChangeKind::ResourceDeleted, None);
        }
        Ok(deleted)
    }
}

/// Pair every joined row with its category, failing on the first row whose
/// category does not resolve.
fn resolve_joined(rows: Vec<ResourceCategoryRow>) -> LibraryResult<Vec<ResourceWithCategory>> {
    rows.into_iter()
        .map(|row| match row.split() {
            (resource, Some(category)) => Ok(ResourceWithCategory { resource, category }),
            (resource, None) => {
                tracing::error!(
                    resource_id = resource.id,
                    category_id = resource.category_id,
                    "Resource references a missing category"
                );
                Err(LibraryError::from(StoreError::Inconsistent(format!(
                    "resource {} references missing category {}",
                    resource.id, resource.category_id
                ))))
            }
        })
        .collect()
}

fn log_rejected_write(operation: &'static str, err: &LibraryError) {
    if let LibraryError::Core(core) = err {
        tracing::warn!(operation, error = %core, "Write rejected");
    }
}
