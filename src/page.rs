//! The portfolio page as one unit: category filter, metadata registry and
//! lightbox viewer are built together here and nowhere else, so every gallery
//! image is registered before the viewer can be asked to show it.

use crate::gallery::{
    CategoryButton, CategoryFilter, GalleryContainer, GalleryRenderer, LoadingHint,
    category_buttons, category_sections,
};
use crate::lightbox::{Effect, InputEvent, LightboxViewer};
use crate::registry::{ImageAttributes, MetadataRegistry};
use crate::{LightboxConfig, SiteConfig};
use std::time::Instant;
use tracing::{debug, info};

/// Query parameter carrying a deep-linked image reference.
pub const IMAGE_PARAM: &str = "image";

pub struct PortfolioPage {
    filter: CategoryFilter,
    viewer: LightboxViewer,
    default_alt: String,
}

impl PortfolioPage {
    /// Page over server-rendered per-category containers.
    pub fn from_containers(
        containers: Vec<GalleryContainer>,
        site: &SiteConfig,
        lightbox: &LightboxConfig,
    ) -> Self {
        let mut registry = MetadataRegistry::new(site.default_camera.clone());
        let filter = CategoryFilter::with_containers(
            containers,
            GalleryRenderer::new(LoadingHint::Lazy),
            &mut registry,
        );
        Self::assemble(filter, registry, site, lightbox)
    }

    /// Page with one shared container rebuilt from `table` per category.
    pub fn from_table(
        container: GalleryContainer,
        table: Vec<(String, Vec<ImageAttributes>)>,
        site: &SiteConfig,
        lightbox: &LightboxConfig,
    ) -> Self {
        let registry = MetadataRegistry::new(site.default_camera.clone());
        let filter =
            CategoryFilter::with_table(container, table, GalleryRenderer::new(LoadingHint::Lazy));
        Self::assemble(filter, registry, site, lightbox)
    }

    fn assemble(
        mut filter: CategoryFilter,
        mut registry: MetadataRegistry,
        site: &SiteConfig,
        lightbox: &LightboxConfig,
    ) -> Self {
        filter.initialize(site.preferred_category.as_deref(), &mut registry);
        info!(
            "Portfolio page ready: {} categories, {} registered references",
            filter.categories().len(),
            registry.len()
        );

        Self {
            filter,
            viewer: LightboxViewer::new(lightbox, registry),
            default_alt: site.default_alt.clone(),
        }
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn viewer(&self) -> &LightboxViewer {
        &self.viewer
    }

    pub fn active_category(&self) -> Option<&str> {
        self.filter.active_category()
    }

    pub fn select_category(&mut self, name: &str) -> usize {
        self.filter
            .set_active_category(name, self.viewer.registry_mut())
    }

    /// Click on the `index`-th image of the visible category.
    pub fn activate_image(&mut self, index: usize, now: Instant) -> Vec<Effect> {
        let request = self
            .filter
            .active_container()
            .and_then(|container| self.filter.renderer().activate(container, index));

        match request {
            Some(request) => self.viewer.open(&request.reference, &request.context, now),
            None => Vec::new(),
        }
    }

    /// Handles `?image=<ref>`: shows the category holding the image and opens
    /// the viewer on it. Queries without the parameter do nothing.
    pub fn open_deep_link(&mut self, query: &str, now: Instant) -> Vec<Effect> {
        let Some(reference) = image_param(query) else {
            return Vec::new();
        };
        debug!("Deep link to {}", reference);

        if let Some(category) = self.filter.category_of(&reference) {
            self.select_category(&category);
        }

        let position = self
            .filter
            .active_container()
            .and_then(|container| container.position_of(&reference));
        match position {
            Some(index) => self.activate_image(index, now),
            None => self.viewer.open(&reference, &[], now),
        }
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<Effect> {
        self.viewer.handle(event, now)
    }

    pub fn buttons(&self) -> Vec<CategoryButton> {
        self.filter.buttons()
    }

    pub fn buttons_html(&self) -> String {
        category_buttons(&self.buttons())
    }

    pub fn sections_html(&self) -> String {
        category_sections(
            self.filter.containers(),
            self.viewer.registry(),
            &self.default_alt,
        )
    }

    /// Category buttons followed by the category sections.
    pub fn gallery_html(&self) -> String {
        format!("{}\n{}", self.buttons_html(), self.sections_html())
    }
}

/// Value of the `image` parameter in a query string (with or without `?`).
pub fn image_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == IMAGE_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
