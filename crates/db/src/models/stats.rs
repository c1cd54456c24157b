//! Read-only aggregates.

use serde::Serialize;
use sqlx::FromRow;

use crate::models::category::Category;

/// Totals shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_categories: i64,
    pub total_resources: i64,
}

/// A category with the number of resources filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    pub category: Category,
    pub resource_count: i64,
}
