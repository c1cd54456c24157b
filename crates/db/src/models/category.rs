//! Category model.

use impulso_core::icons::{resolve_icon, IconOption};
use impulso_core::sample::{
    PLACEHOLDER_CATEGORY_ICON, PLACEHOLDER_CATEGORY_NAME, PLACEHOLDER_TIMESTAMP,
};
use impulso_core::types::{is_placeholder_id, DbId, PLACEHOLDER_ID};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `category` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Category {
    /// The in-memory example category labelling the placeholder resource.
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_ID,
            name: PLACEHOLDER_CATEGORY_NAME.to_string(),
            icon: PLACEHOLDER_CATEGORY_ICON.to_string(),
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            updated_at: PLACEHOLDER_TIMESTAMP.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        is_placeholder_id(self.id)
    }

    /// Catalog icon for this category, falling back to the default icon.
    pub fn icon_option(&self) -> IconOption {
        resolve_icon(&self.icon)
    }
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub icon: String,
}

/// DTO for overwriting a category's mutable columns.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: String,
    pub icon: String,
}

impl From<&Category> for UpdateCategory {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            icon: category.icon.clone(),
        }
    }
}
