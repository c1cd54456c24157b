use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Category with id {category_id} does not exist")]
    ReferentialIntegrity { category_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}
