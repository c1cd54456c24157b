//! Fixed catalog of category icons.
//!
//! Categories store an icon key as a plain string. Resolution against this
//! catalog happens at presentation time; unknown keys fall back to
//! [`DEFAULT_ICON`] instead of being rejected.

/// A selectable icon: the key persisted on the category and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconOption {
    pub key: &'static str,
    pub label: &'static str,
}

const fn icon(key: &'static str, label: &'static str) -> IconOption {
    IconOption { key, label }
}

/// Icon used when a category's key is not in [`ICON_CATALOG`].
pub const DEFAULT_ICON: IconOption = icon("category", "Category");

/// Every icon offered by the picker, in display order.
pub const ICON_CATALOG: &[IconOption] = &[
    icon("work", "Work"),
    icon("school", "Education"),
    icon("movie", "Entertainment"),
    icon("computer", "Technology"),
    icon("sports", "Sports"),
    icon("music", "Music"),
    icon("restaurant", "Cooking"),
    icon("flight", "Travel"),
    icon("hospital", "Health"),
    icon("shopping", "Shopping"),
    icon("palette", "Art"),
    icon("book", "Books"),
    icon("gaming", "Gaming"),
    icon("camera", "Photography"),
    icon("fitness", "Fitness"),
    icon("finance", "Finance"),
    icon("home", "Home"),
    icon("build", "Tools"),
    icon("brush", "Design"),
    icon("science", "Science"),
    icon("business", "Business"),
    icon("chat", "Communication"),
    icon("security", "Security"),
    icon("park", "Nature"),
    icon("car", "Cars"),
    icon("pets", "Pets"),
    icon("casino", "Games"),
    icon("mood", "AI"),
    icon("favorite", "Favorites"),
    icon("star", "Star"),
    icon("settings", "Settings"),
    icon("mobile", "Mobile"),
];

/// Look up an icon by key.
pub fn find_icon(key: &str) -> Option<IconOption> {
    ICON_CATALOG.iter().copied().find(|i| i.key == key)
}

/// Resolve an icon key, falling back to [`DEFAULT_ICON`].
pub fn resolve_icon(key: &str) -> IconOption {
    find_icon(key).unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_resolves() {
        assert_eq!(resolve_icon("music").label, "Music");
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        assert_eq!(find_icon("web"), None);
        assert_eq!(resolve_icon("web"), DEFAULT_ICON);
        assert_eq!(resolve_icon(""), DEFAULT_ICON);
    }

    #[test]
    fn catalog_keys_are_unique() {
        let mut keys: Vec<_> = ICON_CATALOG.iter().map(|i| i.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ICON_CATALOG.len());
        assert!(find_icon(DEFAULT_ICON.key).is_none());
    }
}
