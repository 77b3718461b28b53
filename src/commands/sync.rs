use super::CommandError;
use crate::catalog::{Catalog, ImageRecord};
use crate::cloudinary::{
    CloudinaryConfig, CloudinaryError, MediaLibrary, Resource, SearchRequest,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const FEATURED_TAG: &str = "featured";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub written: usize,
    pub data_file: PathBuf,
}

/// Every resource matching `expression`, following cursors until the last
/// page.
pub async fn fetch_all(
    library: &dyn MediaLibrary,
    expression: &str,
) -> Result<Vec<Resource>, CloudinaryError> {
    let mut resources = Vec::new();
    let mut cursor = None;
    let mut pages = 0;

    loop {
        let request = SearchRequest::new(expression).with_cursor(cursor.take());
        let page = library.search(&request).await?;
        pages += 1;
        debug!("Page {} of {:?}: {} resources", pages, expression, page.resources.len());
        resources.extend(page.resources);

        match page.next_cursor.filter(|c| !c.is_empty()) {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(resources)
}

/// Data-file record for one asset. The category is the folder directly
/// holding the asset; assets at the top level get `fallback_category`.
pub fn resource_to_record(resource: &Resource, fallback_category: &str) -> ImageRecord {
    let public_id = resource.public_id.clone();
    let segments: Vec<&str> = public_id.split('/').collect();

    let basename = segments.last().copied().unwrap_or_default();
    let title = resource
        .context_value("title")
        .unwrap_or(basename)
        .to_string();
    let caption = resource
        .context_value("caption")
        .unwrap_or_default()
        .to_string();

    let category = if segments.len() >= 2 {
        segments[segments.len() - 2].to_string()
    } else {
        fallback_category.to_string()
    };

    ImageRecord {
        url: resource.delivery_url().to_string(),
        title,
        caption,
        category,
        featured: resource.has_tag(FEATURED_TAG),
        public_id,
    }
}

/// Fetches every configured search, dedups by public id and rewrites the
/// data file.
pub async fn run_sync(
    library: &dyn MediaLibrary,
    config: &CloudinaryConfig,
    data_file: &Path,
) -> Result<SyncReport, CommandError> {
    let mut resources = Vec::new();
    for expression in config.search_expressions() {
        info!("Fetching resources matching {}", expression);
        resources.extend(fetch_all(library, &expression).await?);
    }
    info!("Found {} resources", resources.len());

    let records = resources
        .iter()
        .map(|r| resource_to_record(r, config.fallback_category()))
        .collect();
    let catalog = Catalog::deduplicated(records);

    catalog.save(data_file).await?;

    Ok(SyncReport {
        fetched: resources.len(),
        written: catalog.len(),
        data_file: data_file.to_path_buf(),
    })
}
