//! Form input validation applied before anything reaches the store.

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::DbId;

/// Input collected by the add/edit category dialog.
#[derive(Debug, Clone, Validate)]
pub struct CategoryForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub icon: String,
}

/// Input collected by the add/edit resource dialog.
#[derive(Debug, Clone, Validate)]
pub struct ResourceForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 1, message = "a category must be selected"))]
    pub category_id: DbId,
    pub link: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Run derive-based validation, mapping failures to [`CoreError::Validation`].
pub fn validate_form<T: Validate>(form: &T) -> Result<(), CoreError> {
    form.validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

/// Normalize an optional link: blank strings become `None`.
pub fn normalize_link(link: Option<String>) -> Option<String> {
    link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn resource_form(name: &str, description: &str, category_id: DbId) -> ResourceForm {
        ResourceForm {
            name: name.to_string(),
            description: description.to_string(),
            category_id,
            link: None,
        }
    }

    #[test]
    fn valid_forms_pass() {
        let category = CategoryForm {
            name: "Web".into(),
            icon: "computer".into(),
        };
        assert!(validate_form(&category).is_ok());
        assert!(validate_form(&resource_form("Docs", "x", 1)).is_ok());
    }

    #[test]
    fn blank_names_are_rejected() {
        let category = CategoryForm {
            name: "   ".into(),
            icon: "computer".into(),
        };
        assert_matches!(validate_form(&category), Err(CoreError::Validation(msg)) if msg.contains("name"));
        assert_matches!(
            validate_form(&resource_form("Docs", "", 1)),
            Err(CoreError::Validation(msg)) if msg.contains("description")
        );
    }

    #[test]
    fn missing_category_is_rejected() {
        assert_matches!(
            validate_form(&resource_form("Docs", "x", 0)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_links_normalize_to_none() {
        assert_eq!(normalize_link(Some("  ".into())), None);
        assert_eq!(normalize_link(None), None);
        assert_eq!(
            normalize_link(Some(" https://a.b ".into())),
            Some("https://a.b".to_string())
        );
    }
}
