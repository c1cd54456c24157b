//! Operations spanning both tables.
//!
//! Each mutating operation here runs inside a single transaction: either
//! every row change is committed or none is, and no reader can observe a
//! half-applied state.

use impulso_core::error::CoreError;
use impulso_core::sample::{SAMPLE_CATEGORIES, SAMPLE_RESOURCES};
use impulso_core::types::DbId;
use impulso_db::models::category::CreateCategory;
use impulso_db::models::resource::CreateResource;
use impulso_db::models::stats::{CategoryWithCount, DashboardStats};
use impulso_db::repositories::{CategoryRepo, ResourceRepo};
use impulso_events::ChangeKind;

use crate::error::{LibraryError, LibraryResult};
use crate::library::Library;

impl Library {
    /// Delete a category together with every resource filed under it.
    ///
    /// Resources are removed first, then the category, in one transaction.
    /// Returns the number of resources removed. Fails with
    /// [`CoreError::NotFound`] if the category does not exist.
    pub async fn delete_category_with_resources(&self, category_id: DbId) -> LibraryResult<u64> {
        let removed = self
            .run("delete_category_with_resources", async {
                let mut tx = self.begin_write().await?;
                if !CategoryRepo::exists(&mut *tx, category_id).await? {
                    return Err(LibraryError::from(CoreError::NotFound {
                        entity: "category",
                        id: category_id,
                    }));
                }
                let removed = ResourceRepo::delete_by_category(&mut *tx, category_id).await?;
                CategoryRepo::delete(&mut *tx, category_id).await?;
                tx.commit().await?;
                Ok(removed)
            })
            .await?;

        tracing::info!(category_id, resources_removed = removed, "Category deleted with resources");
        self.publish(ChangeKind::CategoryDeleted, Some(category_id));
        Ok(removed)
    }

    /// Reassign every resource of `from_category_id` to `to_category_id`.
    ///
    /// Atomic: either all resources move or none do. Succeeds as a no-op when
    /// the source has no resources or equals the target. Returns the number
    /// of resources moved. Fails with [`CoreError::ReferentialIntegrity`] if
    /// the target category does not exist.
    pub async fn migrate_resources(
        &self,
        from_category_id: DbId,
        to_category_id: DbId,
    ) -> LibraryResult<u64> {
        let moved = self
            .run("migrate_resources", async {
                let mut tx = self.begin_write().await?;
                if !CategoryRepo::exists(&mut *tx, to_category_id).await? {
                    return Err(LibraryError::from(CoreError::ReferentialIntegrity {
                        category_id: to_category_id,
                    }));
                }
                if from_category_id == to_category_id {
                    return Ok(0);
                }
                let moved =
                    ResourceRepo::reassign_category(&mut *tx, from_category_id, to_category_id)
                        .await?;
                tx.commit().await?;
                Ok(moved)
            })
            .await?;

        if moved > 0 {
            tracing::info!(
                from_category_id,
                to_category_id,
                moved,
                "Resources migrated"
            );
            self.publish(ChangeKind::ResourcesMigrated, Some(to_category_id));
        }
        Ok(moved)
    }

    /// Total category and resource counts, read from one snapshot.
    pub async fn get_dashboard_stats(&self) -> LibraryResult<DashboardStats> {
        self.run("get_dashboard_stats", async {
            let mut tx = self.pool().begin().await?;
            let total_categories = CategoryRepo::count(&mut *tx).await?;
            let total_resources = ResourceRepo::count(&mut *tx).await?;
            tx.commit().await?;
            Ok::<_, LibraryError>(DashboardStats {
                total_categories,
                total_resources,
            })
        })
        .await
    }

    /// Every category with the number of resources filed under it.
    pub async fn get_categories_with_resource_count(&self) -> LibraryResult<Vec<CategoryWithCount>> {
        self.run(
            "get_categories_with_resource_count",
            CategoryRepo::list_with_resource_count(self.pool()),
        )
        .await
    }

    /// Insert the first-launch sample categories and resources.
    ///
    /// Does nothing (and returns `false`) if any category already exists.
    /// All sample rows are inserted in one transaction.
    pub async fn seed_sample_data(&self) -> LibraryResult<bool> {
        let seeded = self
            .run("seed_sample_data", async {
                let mut tx = self.begin_write().await?;
                if CategoryRepo::count(&mut *tx).await? > 0 {
                    return Ok::<_, LibraryError>(false);
                }

                let mut category_ids = Vec::with_capacity(SAMPLE_CATEGORIES.len());
                for sample in SAMPLE_CATEGORIES {
                    let input = CreateCategory {
                        name: sample.name.to_string(),
                        icon: sample.icon.to_string(),
                    };
                    category_ids.push(CategoryRepo::create(&mut *tx, &input).await?.id);
                }

                for sample in SAMPLE_RESOURCES {
                    let input = CreateResource {
                        name: sample.name.to_string(),
                        description: sample.description.to_string(),
                        category_id: category_ids[sample.category],
                        link: Some(sample.link.to_string()),
                        created_at: Some(sample.created_at.to_string()),
                        is_favorite: false,
                    };
                    ResourceRepo::create(&mut *tx, &input).await?;
                }

                tx.commit().await?;
                Ok(true)
            })
            .await?;

        if seeded {
            tracing::info!(
                categories = SAMPLE_CATEGORIES.len(),
                resources = SAMPLE_RESOURCES.len(),
                "Sample data seeded"
            );
            self.publish(ChangeKind::SampleDataSeeded, None);
        }
        Ok(seeded)
    }
}
