//! Placeholder and first-launch sample content.
//!
//! The placeholder records are synthesized in memory whenever the store has
//! no real resources. They carry [`PLACEHOLDER_ID`](crate::types::PLACEHOLDER_ID)
//! and are never written to the store.

/// Name of the in-memory example category.
pub const PLACEHOLDER_CATEGORY_NAME: &str = "Example";

/// Icon key of the in-memory example category.
pub const PLACEHOLDER_CATEGORY_ICON: &str = "star";

/// Title of the in-memory example resource.
pub const PLACEHOLDER_RESOURCE_NAME: &str = "Welcome to Impulso!";

/// Description of the in-memory example resource.
pub const PLACEHOLDER_RESOURCE_DESCRIPTION: &str = "This is an example resource to help you get \
started. Create your own resources with the + button. Once you add your first resource, this \
example disappears automatically.";

/// Link of the in-memory example resource.
pub const PLACEHOLDER_RESOURCE_LINK: &str = "https://example.com";

/// Timestamp of the in-memory example records.
pub const PLACEHOLDER_TIMESTAMP: &str = "2024-01-01";

/// A category inserted on first launch.
#[derive(Debug, Clone, Copy)]
pub struct SampleCategory {
    pub name: &'static str,
    pub icon: &'static str,
}

/// A resource inserted on first launch.
///
/// `category` indexes into [`SAMPLE_CATEGORIES`]; the real category id is
/// only known once the categories have been inserted.
#[derive(Debug, Clone, Copy)]
pub struct SampleResource {
    pub name: &'static str,
    pub description: &'static str,
    pub category: usize,
    pub link: &'static str,
    pub created_at: &'static str,
}

pub const SAMPLE_CATEGORIES: &[SampleCategory] = &[
    SampleCategory { name: "Web Development", icon: "computer" },
    SampleCategory { name: "Artificial Intelligence", icon: "mood" },
    SampleCategory { name: "UI/UX Design", icon: "brush" },
    SampleCategory { name: "Databases", icon: "build" },
];

pub const SAMPLE_RESOURCES: &[SampleResource] = &[
    SampleResource {
        name: "React Documentation",
        description: "Official React documentation for web developers",
        category: 0,
        link: "https://reactjs.org/docs",
        created_at: "2024-01-15T10:30:00Z",
    },
    SampleResource {
        name: "Vue.js Guide",
        description: "Complete Vue.js guide for beginners and experts",
        category: 0,
        link: "https://vuejs.org/guide",
        created_at: "2024-01-16T14:20:00Z",
    },
    SampleResource {
        name: "TensorFlow Tutorials",
        description: "Official TensorFlow tutorials for machine learning",
        category: 1,
        link: "https://tensorflow.org/tutorials",
        created_at: "2024-01-17T09:15:00Z",
    },
    SampleResource {
        name: "PyTorch Learning",
        description: "Learning resources for PyTorch and deep learning",
        category: 1,
        link: "https://pytorch.org/tutorials",
        created_at: "2024-01-18T16:45:00Z",
    },
    SampleResource {
        name: "Figma Design System",
        description: "Complete Figma design system for UI/UX",
        category: 2,
        link: "https://figma.com/design-systems",
        created_at: "2024-01-19T11:30:00Z",
    },
    SampleResource {
        name: "PostgreSQL Documentation",
        description: "Complete PostgreSQL documentation",
        category: 3,
        link: "https://postgresql.org/docs",
        created_at: "2024-01-20T13:20:00Z",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_resources_reference_known_categories() {
        for r in SAMPLE_RESOURCES {
            assert!(r.category < SAMPLE_CATEGORIES.len(), "{} has a bad index", r.name);
            assert!(crate::dates::parse(r.created_at).is_some());
        }
    }
}
