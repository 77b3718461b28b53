use serde::{Deserialize, Serialize};

/// One asset as materialized by the sync job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub url: String,
    pub public_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

impl ImageRecord {
    /// Category used for grouping; records without one land in `uncategorized`.
    pub fn category_or_default(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }
}

pub const UNCATEGORIZED: &str = "uncategorized";

/// A category together with the records that belong to it, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub display_name: String,
    pub images: Vec<ImageRecord>,
}
