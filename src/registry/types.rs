use super::NOT_AVAILABLE;
use crate::catalog::ImageRecord;
use serde::{Deserialize, Serialize};

/// Attributes carried by one rendered gallery image, read once when the image
/// is registered. Explicit `data-*` values win over inferred ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttributes {
    /// `src`
    pub src: String,
    /// `currentSrc`, when the browser picked a `srcset` candidate
    pub current_src: Option<String>,
    /// `data-full`
    pub full: Option<String>,
    /// `data-title`
    pub title: Option<String>,
    /// `alt`
    pub alt: Option<String>,
    /// `data-caption`
    pub caption: Option<String>,
    /// `data-date`
    pub date: Option<String>,
    /// `data-camera`
    pub camera: Option<String>,
    /// `data-settings`
    pub settings: Option<String>,
    /// `data-public-id`
    pub public_id: Option<String>,
}

impl ImageAttributes {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }

    pub fn from_record(record: &ImageRecord) -> Self {
        Self {
            src: record.url.clone(),
            title: non_empty_owned(&record.title),
            alt: non_empty_owned(&record.title),
            caption: non_empty_owned(&record.caption),
            public_id: non_empty_owned(&record.public_id),
            ..Default::default()
        }
    }

    /// The reference handed to the viewer: full-size override first, then the
    /// source the browser actually displays.
    pub fn reference(&self) -> &str {
        non_empty(&self.full)
            .or_else(|| non_empty(&self.current_src))
            .unwrap_or(&self.src)
    }

    /// Every distinct, non-empty key this image can be looked up by.
    pub fn aliases(&self) -> Vec<&str> {
        let candidates = [
            Some(self.src.as_str()),
            non_empty(&self.current_src),
            non_empty(&self.full),
            non_empty(&self.public_id),
        ];

        let mut aliases: Vec<&str> = Vec::with_capacity(candidates.len());
        for alias in candidates.into_iter().flatten() {
            if !alias.is_empty() && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }
        aliases
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub title: String,
    pub description: String,
    pub date: String,
    pub camera: String,
    pub settings: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

impl ImageMetadata {
    /// Rows shown in the viewer's details panel, with `N/A` for empty fields.
    pub fn detail_rows(&self) -> Vec<DetailRow> {
        [
            ("Description", &self.description),
            ("Date", &self.date),
            ("Camera", &self.camera),
            ("Settings", &self.settings),
        ]
        .into_iter()
        .map(|(label, value)| DetailRow {
            label,
            value: if value.trim().is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                value.clone()
            },
        })
        .collect()
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn non_empty_owned(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
