//! View state for resource screens.

use std::sync::{Arc, Mutex, PoisonError};

use impulso_core::types::DbId;
use impulso_core::validation::{normalize_link, validate_form, ResourceForm};
use impulso_db::models::resource::{CreateResource, Resource, ResourceWithCategory};
use impulso_events::LibraryEvent;
use impulso_library::{Library, LibraryResult};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::container::{Fallback, StateContainer};

/// Which slice of the library the `resources` container currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResourceFilter {
    #[default]
    All,
    Category(DbId),
    Favorites,
    Search(String),
}

/// Resource list and joined list, kept in sync with the library.
///
/// Every successful mutation reloads the full resource list (falling back to
/// the placeholder when nothing is stored) and the joined list. Failures go
/// to the `resources` container's error slot and trigger no reload.
pub struct ResourceViewState {
    library: Arc<Library>,
    resources: StateContainer<Resource>,
    resources_with_category: StateContainer<ResourceWithCategory>,
    filter: Mutex<ResourceFilter>,
}

impl ResourceViewState {
    pub fn new(library: Arc<Library>) -> Self {
        Self {
            library,
            resources: StateContainer::new(),
            resources_with_category: StateContainer::new(),
            filter: Mutex::new(ResourceFilter::All),
        }
    }

    pub fn resources(&self) -> &StateContainer<Resource> {
        &self.resources
    }

    pub fn resources_with_category(&self) -> &StateContainer<ResourceWithCategory> {
        &self.resources_with_category
    }

    /// The slice last loaded into the `resources` container.
    pub fn filter(&self) -> ResourceFilter {
        self.filter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_filter(&self, filter: ResourceFilter) {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner) = filter;
    }

    /// Reload every resource, or the placeholder when none is stored.
    ///
    /// On failure the list falls back to the placeholder alone.
    pub async fn refresh_resources(&self) -> bool {
        self.set_filter(ResourceFilter::All);
        self.resources
            .load(
                "load resources",
                self.library.list_resources_or_placeholder(),
                Fallback::Replace(vec![Resource::placeholder()]),
            )
            .await
    }

    pub async fn refresh_resources_with_category(&self) -> bool {
        self.resources_with_category
            .load(
                "load resources",
                self.library.list_resources_with_category(),
                Fallback::KeepData,
            )
            .await
    }

    pub async fn refresh_resources_by_category(&self, category_id: DbId) -> bool {
        self.set_filter(ResourceFilter::Category(category_id));
        self.resources
            .load(
                "load resources",
                self.library.list_resources_by_category(category_id),
                Fallback::KeepData,
            )
            .await
    }

    pub async fn refresh_favorite_resources(&self) -> bool {
        self.set_filter(ResourceFilter::Favorites);
        self.resources
            .load(
                "load favorites",
                self.library.list_favorite_resources(),
                Fallback::KeepData,
            )
            .await
    }

    /// Filter by name or description. An empty query reloads everything.
    pub async fn search(&self, query: &str) -> bool {
        if query.is_empty() {
            return self.refresh_resources().await;
        }
        self.set_filter(ResourceFilter::Search(query.to_string()));
        self.resources
            .load(
                "search resources",
                self.library.search_by_name_or_description(query),
                Fallback::KeepData,
            )
            .await
    }

    /// Re-run whichever load last filled the `resources` container.
    pub async fn reload_current(&self) -> bool {
        let (current, _) = tokio::join!(
            async {
                match self.filter() {
                    ResourceFilter::All => self.refresh_resources().await,
                    ResourceFilter::Category(id) => self.refresh_resources_by_category(id).await,
                    ResourceFilter::Favorites => self.refresh_favorite_resources().await,
                    ResourceFilter::Search(query) => self.search(&query).await,
                }
            },
            self.refresh_resources_with_category(),
        );
        current
    }

    pub async fn add_resource(
        &self,
        name: &str,
        description: &str,
        category_id: DbId,
        link: Option<&str>,
    ) -> Option<Resource> {
        let form = ResourceForm {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            category_id,
            link: normalize_link(link.map(str::to_string)),
        };
        let result = match validate_form(&form) {
            Ok(()) => {
                self.library
                    .create_resource(&CreateResource {
                        name: form.name,
                        description: form.description,
                        category_id: form.category_id,
                        link: form.link,
                        created_at: None,
                        is_favorite: false,
                    })
                    .await
            }
            Err(e) => Err(e.into()),
        };
        self.after_mutation("create resource", result).await
    }

    pub async fn update_resource(&self, resource: &Resource) -> Option<Resource> {
        let form = ResourceForm {
            name: resource.name.trim().to_string(),
            description: resource.description.trim().to_string(),
            category_id: resource.category_id,
            link: normalize_link(resource.link.clone()),
        };
        let result = match validate_form(&form) {
            Ok(()) => {
                let mut resource = resource.clone();
                resource.name = form.name;
                resource.description = form.description;
                resource.link = form.link;
                self.library.update_resource(&resource).await
            }
            Err(e) => Err(e.into()),
        };
        self.after_mutation("update resource", result).await
    }

    pub async fn delete_resource(&self, resource: &Resource) -> bool {
        let result = self.library.delete_resource(resource).await;
        self.after_mutation("delete resource", result).await.is_some()
    }

    pub async fn delete_resource_by_id(&self, id: DbId) -> bool {
        let result = self.library.delete_resource_by_id(id).await;
        self.after_mutation("delete resource", result).await.is_some()
    }

    pub async fn toggle_favorite(&self, id: DbId) -> Option<Resource> {
        let result = self.library.toggle_favorite(id).await;
        self.after_mutation("update favorite", result).await
    }

    pub fn clear_error(&self) {
        self.resources.clear_error();
        self.resources_with_category.clear_error();
    }

    /// Stop publishing into both containers.
    pub fn detach(&self) {
        self.resources.detach();
        self.resources_with_category.detach();
    }

    /// Re-run the current load whenever the library reports a change that
    /// touches resources.
    ///
    /// The task exits when the view is detached or the bus is dropped.
    pub fn spawn_sync(
        self: &Arc<Self>,
        mut receiver: broadcast::Receiver<LibraryEvent>,
    ) -> JoinHandle<()> {
        let view = Arc::clone(self);
        let lifetime = view.resources.lifetime();
        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    _ = lifetime.cancelled() => break,
                    received = receiver.recv() => received,
                };
                match received {
                    Ok(event) if event.kind.affects_resources() => {
                        view.reload_current().await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Resource view lagged, reloading");
                        view.reload_current().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("Event bus closed, resource sync stopping");
                        break;
                    }
                }
            }
        })
    }

    async fn after_mutation<V>(&self, action: &str, result: LibraryResult<V>) -> Option<V> {
        let value = self.resources.report(action, result)?;
        tokio::join!(self.refresh_resources(), self.refresh_resources_with_category());
        Some(value)
    }
}
