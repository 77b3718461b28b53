use super::types::non_empty;
use super::{DEFAULT_CAMERA, ImageAttributes, ImageMetadata, NO_DESCRIPTION};
use crate::catalog::{ImageRecord, capitalize_first};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct MetadataRegistry {
    records: Vec<ImageMetadata>,
    aliases: HashMap<String, usize>,
    // Registration order, so suffix matching is deterministic.
    alias_order: Vec<String>,
    default_camera: String,
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA)
    }
}

impl MetadataRegistry {
    pub fn new(default_camera: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            aliases: HashMap::new(),
            alias_order: Vec::new(),
            default_camera: default_camera.into(),
        }
    }

    pub fn from_records(records: &[ImageRecord], default_camera: impl Into<String>) -> Self {
        let mut registry = Self::new(default_camera);
        for record in records {
            registry.register(&ImageAttributes::from_record(record));
        }
        registry
    }

    /// Stores the metadata described by `attributes` under every alias of the
    /// image. Registering an image whose alias is already known replaces that
    /// record in place.
    pub fn register(&mut self, attributes: &ImageAttributes) -> &ImageMetadata {
        let reference = attributes.reference();
        let metadata = ImageMetadata {
            title: non_empty(&attributes.title)
                .or_else(|| non_empty(&attributes.alt))
                .map(str::to_string)
                .unwrap_or_else(|| prettify_filename(reference)),
            description: non_empty(&attributes.caption)
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            date: non_empty(&attributes.date).unwrap_or_default().to_string(),
            camera: non_empty(&attributes.camera)
                .unwrap_or(&self.default_camera)
                .to_string(),
            settings: non_empty(&attributes.settings)
                .unwrap_or_default()
                .to_string(),
        };

        let index = match attributes
            .aliases()
            .iter()
            .find_map(|alias| self.aliases.get(*alias).copied())
        {
            Some(existing) => {
                self.records[existing] = metadata;
                existing
            }
            None => {
                self.records.push(metadata);
                self.records.len() - 1
            }
        };

        for alias in attributes.aliases() {
            if self.aliases.insert(alias.to_string(), index).is_none() {
                self.alias_order.push(alias.to_string());
            }
        }

        trace!("Registered metadata for {}", reference);
        &self.records[index]
    }

    /// Exact alias match first, then a path-suffix match in either direction
    /// (absolute vs. relative URLs), then a record generated from the filename.
    pub fn lookup(&self, reference: &str) -> ImageMetadata {
        self.find(reference)
            .cloned()
            .unwrap_or_else(|| self.fallback(reference))
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.find(reference).is_some()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Number of distinct images stored, as opposed to [`len`](Self::len)
    /// which counts aliases.
    pub fn image_count(&self) -> usize {
        self.records.len()
    }

    fn find(&self, reference: &str) -> Option<&ImageMetadata> {
        if reference.is_empty() {
            return None;
        }

        if let Some(&index) = self.aliases.get(reference) {
            return self.records.get(index);
        }

        self.alias_order
            .iter()
            .find(|alias| is_suffix_match(reference, alias) || is_suffix_match(alias, reference))
            .and_then(|alias| self.aliases.get(alias.as_str()))
            .and_then(|&index| self.records.get(index))
    }

    fn fallback(&self, reference: &str) -> ImageMetadata {
        ImageMetadata {
            title: prettify_filename(reference),
            description: NO_DESCRIPTION.to_string(),
            date: String::new(),
            camera: self.default_camera.clone(),
            settings: String::new(),
        }
    }
}

/// True when `suffix` is a trailing path of `full`, cut at a `/` boundary.
pub(crate) fn is_suffix_match(full: &str, suffix: &str) -> bool {
    if suffix.is_empty() || !full.ends_with(suffix) {
        return false;
    }
    let head = &full[..full.len() - suffix.len()];
    head.is_empty() || head.ends_with('/') || suffix.starts_with('/')
}

/// `https://cdn/x/_night_sky_02.jpg?v=3` becomes `Night Sky 02`: last path
/// segment, extension and leading underscores removed, `_`/`-` turned into
/// spaces, first letter of every word upper-cased.
pub fn prettify_filename(reference: &str) -> String {
    let path = reference.split(['?', '#']).next().unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    };

    let title = stem
        .trim_start_matches('_')
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        "Untitled".to_string()
    } else {
        title
    }
}
