//! Resource model and the resource/category join.

use impulso_core::sample::{
    PLACEHOLDER_RESOURCE_DESCRIPTION, PLACEHOLDER_RESOURCE_LINK, PLACEHOLDER_RESOURCE_NAME,
    PLACEHOLDER_TIMESTAMP,
};
use impulso_core::share::{share_payload, SharePayload};
use impulso_core::types::{is_placeholder_id, DbId, PLACEHOLDER_ID};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;

/// A row from the `resource` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    pub link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub is_favorite: bool,
}

impl Resource {
    /// The in-memory example resource shown while the store is empty.
    /// Never persisted.
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_ID,
            name: PLACEHOLDER_RESOURCE_NAME.to_string(),
            description: PLACEHOLDER_RESOURCE_DESCRIPTION.to_string(),
            category_id: PLACEHOLDER_ID,
            link: Some(PLACEHOLDER_RESOURCE_LINK.to_string()),
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            updated_at: PLACEHOLDER_TIMESTAMP.to_string(),
            is_favorite: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        is_placeholder_id(self.id)
    }

    /// Text handed to the platform share sheet.
    pub fn share_payload(&self, category_name: Option<&str>) -> SharePayload {
        share_payload(
            &self.name,
            &self.description,
            self.link.as_deref(),
            category_name,
        )
    }
}

/// DTO for creating a new resource.
///
/// `created_at` defaults to the current time when `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResource {
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    pub link: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// DTO for overwriting a resource's mutable columns.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResource {
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    pub link: Option<String>,
    pub is_favorite: bool,
}

impl From<&Resource> for UpdateResource {
    fn from(resource: &Resource) -> Self {
        Self {
            name: resource.name.clone(),
            description: resource.description.clone(),
            category_id: resource.category_id,
            link: resource.link.clone(),
            is_favorite: resource.is_favorite,
        }
    }
}

/// A resource together with the category it is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceWithCategory {
    pub resource: Resource,
    pub category: Category,
}

impl ResourceWithCategory {
    pub fn placeholder() -> Self {
        Self {
            resource: Resource::placeholder(),
            category: Category::placeholder(),
        }
    }
}

/// Flat row produced by the `resource LEFT JOIN category` query.
///
/// Category columns are `None` when the resource's category does not
/// resolve; the domain layer decides how to treat that.
#[derive(Debug, Clone, FromRow)]
pub struct ResourceCategoryRow {
    #[sqlx(flatten)]
    pub resource: Resource,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
    pub category_created_at: Option<String>,
    pub category_updated_at: Option<String>,
}

impl ResourceCategoryRow {
    /// Split into the resource and its category, if the join resolved.
    pub fn split(self) -> (Resource, Option<Category>) {
        let category = match (
            self.category_name,
            self.category_icon,
            self.category_created_at,
            self.category_updated_at,
        ) {
            (Some(name), Some(icon), Some(created_at), Some(updated_at)) => Some(Category {
                id: self.resource.category_id,
                name,
                icon,
                created_at,
                updated_at,
            }),
            _ => None,
        };
        (self.resource, category)
    }
}
