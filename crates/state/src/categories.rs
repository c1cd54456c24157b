//! View state for category screens.

use std::sync::Arc;

use impulso_core::error::CoreError;
use impulso_core::icons::resolve_icon;
use impulso_core::types::DbId;
use impulso_core::validation::{validate_form, CategoryForm};
use impulso_db::models::category::{Category, CreateCategory};
use impulso_db::models::stats::{CategoryWithCount, DashboardStats};
use impulso_events::LibraryEvent;
use impulso_library::{Library, LibraryError, LibraryResult};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::container::{Fallback, StateContainer};

/// Categories and per-category counts, kept in sync with the library.
///
/// Mutations report failures through the `categories` container's error
/// slot and, on success, reload both containers.
pub struct CategoryViewState {
    library: Arc<Library>,
    categories: StateContainer<Category>,
    categories_with_count: StateContainer<CategoryWithCount>,
}

impl CategoryViewState {
    pub fn new(library: Arc<Library>) -> Self {
        Self {
            library,
            categories: StateContainer::new(),
            categories_with_count: StateContainer::new(),
        }
    }

    pub fn categories(&self) -> &StateContainer<Category> {
        &self.categories
    }

    pub fn categories_with_count(&self) -> &StateContainer<CategoryWithCount> {
        &self.categories_with_count
    }

    /// Reload the category list. A failure clears the list.
    pub async fn refresh_categories(&self) -> bool {
        self.categories
            .load(
                "load categories",
                self.library.list_categories(),
                Fallback::Clear,
            )
            .await
    }

    pub async fn refresh_categories_with_count(&self) -> bool {
        self.categories_with_count
            .load(
                "load category counts",
                self.library.get_categories_with_resource_count(),
                Fallback::KeepData,
            )
            .await
    }

    pub async fn refresh_all(&self) {
        tokio::join!(self.refresh_categories(), self.refresh_categories_with_count());
    }

    /// Validate and insert a new category. Unknown icon keys fall back to
    /// the default icon.
    pub async fn add_category(&self, name: &str, icon: &str) -> Option<Category> {
        let form = CategoryForm {
            name: name.trim().to_string(),
            icon: resolve_icon(icon).key.to_string(),
        };
        let result = match validate_form(&form) {
            Ok(()) => {
                self.library
                    .create_category(&CreateCategory {
                        name: form.name,
                        icon: form.icon,
                    })
                    .await
            }
            Err(e) => Err(e.into()),
        };
        self.after_mutation("create category", result).await
    }

    pub async fn update_category(&self, category: &Category) -> Option<Category> {
        let form = CategoryForm {
            name: category.name.trim().to_string(),
            icon: resolve_icon(&category.icon).key.to_string(),
        };
        let result = match validate_form(&form) {
            Ok(()) => {
                let mut category = category.clone();
                category.name = form.name;
                category.icon = form.icon;
                self.library.update_category(&category).await
            }
            Err(e) => Err(e.into()),
        };
        self.after_mutation("update category", result).await
    }

    /// Delete a category and every resource filed under it.
    pub async fn delete_category(&self, category_id: DbId) -> bool {
        let result = self.library.delete_category_with_resources(category_id).await;
        self.after_mutation("delete category", result).await.is_some()
    }

    /// Move every resource of one category to another.
    pub async fn migrate_resources(&self, from_category_id: DbId, to_category_id: DbId) -> bool {
        let result = self
            .library
            .migrate_resources(from_category_id, to_category_id)
            .await;
        self.after_mutation("migrate resources", result).await.is_some()
    }

    pub async fn dashboard_stats(&self) -> Option<DashboardStats> {
        let result = self.library.get_dashboard_stats().await;
        self.categories.report("load dashboard stats", result)
    }

    /// Resources currently filed under a category, for the delete dialog.
    pub async fn resource_count(&self, category_id: DbId) -> Option<i64> {
        let result = match self.library.get_category(category_id).await {
            Ok(Some(_)) => self.library.count_by_category(category_id).await,
            Ok(None) => Err(LibraryError::from(CoreError::NotFound {
                entity: "category",
                id: category_id,
            })),
            Err(e) => Err(e),
        };
        self.categories.report("count resources", result)
    }

    pub fn clear_error(&self) {
        self.categories.clear_error();
        self.categories_with_count.clear_error();
    }

    /// Stop publishing into both containers.
    pub fn detach(&self) {
        self.categories.detach();
        self.categories_with_count.detach();
    }

    /// Reload both containers whenever the library reports a change.
    ///
    /// The task exits when the view is detached or the bus is dropped.
    pub fn spawn_sync(
        self: &Arc<Self>,
        mut receiver: broadcast::Receiver<LibraryEvent>,
    ) -> JoinHandle<()> {
        let view = Arc::clone(self);
        let lifetime = view.categories.lifetime();
        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    _ = lifetime.cancelled() => break,
                    received = receiver.recv() => received,
                };
                match received {
                    Ok(event) if event.kind.affects_categories() => view.refresh_all().await,
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Category view lagged, reloading");
                        view.refresh_all().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("Event bus closed, category sync stopping");
                        break;
                    }
                }
            }
        })
    }

    async fn after_mutation<V>(&self, action: &str, result: LibraryResult<V>) -> Option<V> {
        let value = self.categories.report(action, result)?;
        self.refresh_all().await;
        Some(value)
    }
}
