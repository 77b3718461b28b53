use super::{CatalogError, CategoryGroup, ImageRecord};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ImageRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    /// Builds a catalog keeping only the first record seen for each public id.
    pub fn deduplicated(records: Vec<ImageRecord>) -> Self {
        let total = records.len();
        let mut seen = HashSet::new();
        let records: Vec<ImageRecord> = records
            .into_iter()
            .filter(|record| seen.insert(record.public_id.clone()))
            .collect();

        if records.len() != total {
            debug!(
                "Dropped {} duplicate records by public id",
                total - records.len()
            );
        }

        Self { records }
    }

    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(CatalogError::DataFileMissing(path.to_path_buf()));
        }

        let content = tokio::fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let records: Option<Vec<ImageRecord>> = serde_yaml::from_str(&content)?;
        let records = records.unwrap_or_default();
        debug!("Loaded {} records from {:?}", records.len(), path);

        Ok(Self { records })
    }

    pub async fn save(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(dir).await?;
        }

        let yaml = serde_yaml::to_string(&self.records)?;
        tokio::fs::write(path, yaml).await?;
        info!("Wrote {:?} with {} items", path, self.records.len());

        Ok(())
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in first-seen order, with `preferred` moved to the
    /// front when the catalog contains it.
    pub fn categories(&self, preferred: Option<&str>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut categories: Vec<String> = self
            .records
            .iter()
            .map(|r| r.category_or_default())
            .filter(|c| seen.insert(*c))
            .map(str::to_string)
            .collect();

        if let Some(preferred) = preferred
            && let Some(pos) = categories.iter().position(|c| c == preferred)
        {
            let preferred = categories.remove(pos);
            categories.insert(0, preferred);
        }

        categories
    }

    pub fn grouped(&self, preferred: Option<&str>) -> Vec<CategoryGroup> {
        self.categories(preferred)
            .into_iter()
            .map(|name| {
                let images = self
                    .records
                    .iter()
                    .filter(|r| r.category_or_default() == name)
                    .cloned()
                    .collect();
                CategoryGroup {
                    display_name: nice_category_name(&name),
                    name,
                    images,
                }
            })
            .collect()
    }

    /// Up to `limit` featured records, or the first `limit` records when
    /// nothing is tagged as featured.
    pub fn featured(&self, limit: usize) -> Vec<&ImageRecord> {
        let featured: Vec<&ImageRecord> = self.records.iter().filter(|r| r.featured).collect();
        if featured.is_empty() {
            self.records.iter().take(limit).collect()
        } else {
            featured.into_iter().take(limit).collect()
        }
    }

    pub fn first_in_category(&self, category: &str) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.category == category)
    }
}

/// `wild_life-birds` becomes `Wild Life Birds`: runs of `_` and `-` turn into a
/// single space and the first letter of every word is upper-cased.
pub fn nice_category_name(category: &str) -> String {
    category
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
