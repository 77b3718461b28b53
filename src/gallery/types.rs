use crate::i18n::LocalizedText;
use crate::registry::ImageAttributes;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingHint {
    #[default]
    Lazy,
    Eager,
}

impl LoadingHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadingHint::Lazy => "lazy",
            LoadingHint::Eager => "eager",
        }
    }
}

/// One rendered `<img>` in a gallery container.
///
/// While the owning category is inactive its `src`/`srcset` live in
/// `deferred_src`/`deferred_srcset` (`data-src`/`data-srcset`) so the browser
/// does not fetch them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageElement {
    pub attributes: ImageAttributes,
    pub src: Option<String>,
    pub srcset: Option<String>,
    pub deferred_src: Option<String>,
    pub deferred_srcset: Option<String>,
    pub loading: LoadingHint,
    /// `--i`, drives the staggered fade-in
    pub style_index: usize,
    /// `data-lightbox-bound`
    pub bound: bool,
}

impl ImageElement {
    pub fn new(attributes: ImageAttributes) -> Self {
        Self {
            src: Some(attributes.src.clone()),
            srcset: None,
            deferred_src: None,
            deferred_srcset: None,
            loading: LoadingHint::Lazy,
            style_index: 0,
            bound: false,
            attributes,
        }
    }

    pub fn with_srcset(mut self, srcset: impl Into<String>) -> Self {
        self.srcset = Some(srcset.into());
        self
    }

    pub fn reference(&self) -> &str {
        self.attributes.reference()
    }

    pub fn is_hydrated(&self) -> bool {
        self.deferred_src.is_none() && self.deferred_srcset.is_none()
    }

    /// Moves `src`/`srcset` into their inert data attributes.
    pub fn dehydrate(&mut self) -> bool {
        let mut changed = false;
        if let Some(src) = self.src.take() {
            self.deferred_src = Some(src);
            changed = true;
        }
        if let Some(srcset) = self.srcset.take() {
            self.deferred_srcset = Some(srcset);
            changed = true;
        }
        changed
    }

    /// Restores `src`/`srcset` from their inert data attributes.
    pub fn hydrate(&mut self) -> bool {
        let mut changed = false;
        if let Some(src) = self.deferred_src.take() {
            self.src = Some(src);
            changed = true;
        }
        if let Some(srcset) = self.deferred_srcset.take() {
            self.srcset = Some(srcset);
            changed = true;
        }
        changed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryContainer {
    pub selector: String,
    /// `data-category`, for per-category containers
    pub category: Option<String>,
    pub visible: bool,
    /// The markup flagged this container as the active one.
    pub marked_active: bool,
    pub elements: Vec<ImageElement>,
}

impl GalleryContainer {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            category: None,
            visible: true,
            marked_active: false,
            elements: Vec::new(),
        }
    }

    pub fn for_category(category: impl Into<String>, elements: Vec<ImageElement>) -> Self {
        let category = category.into();
        Self {
            selector: format!(r#".gallery-category[data-category="{}"]"#, category),
            category: Some(category),
            visible: true,
            marked_active: false,
            elements,
        }
    }

    pub fn marked_active(mut self, active: bool) -> Self {
        self.marked_active = active;
        self
    }

    /// References of every image in the container, in display order.
    pub fn references(&self) -> Vec<String> {
        self.elements
            .iter()
            .map(|e| e.reference().to_string())
            .collect()
    }

    pub fn position_of(&self, reference: &str) -> Option<usize> {
        self.elements.iter().position(|e| {
            e.reference() == reference || e.attributes.aliases().contains(&reference)
        })
    }
}

/// What activating a bound gallery image asks the viewer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub reference: String,
    pub context: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryButton {
    pub category: String,
    pub label: String,
    pub active: bool,
    pub labels: Option<LocalizedText>,
}
