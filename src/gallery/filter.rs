use super::{CategoryButton, GalleryContainer, GalleryRenderer};
use crate::catalog::nice_category_name;
use crate::i18n::category_labels;
use crate::registry::{ImageAttributes, MetadataRegistry};
use tracing::{debug, info};

#[derive(Debug, Clone)]
enum Layout {
    /// One container per category already present in the markup.
    Containers(Vec<GalleryContainer>),
    /// A single shared container rebuilt from an in-memory table.
    Shared {
        container: GalleryContainer,
        table: Vec<(String, Vec<ImageAttributes>)>,
    },
}

#[derive(Debug, Clone)]
pub struct CategoryFilter {
    layout: Layout,
    active: Option<String>,
    renderer: GalleryRenderer,
}

impl CategoryFilter {
    /// Filter over pre-rendered category containers. Containers not marked
    /// active have their images dehydrated until they are first shown.
    pub fn with_containers(
        mut containers: Vec<GalleryContainer>,
        renderer: GalleryRenderer,
        registry: &mut MetadataRegistry,
    ) -> Self {
        for container in &mut containers {
            renderer.enhance(container, registry);
            if !container.marked_active {
                container.visible = false;
                container.elements.iter_mut().for_each(|e| {
                    e.dehydrate();
                });
            }
        }

        Self {
            layout: Layout::Containers(containers),
            active: None,
            renderer,
        }
    }

    /// Filter that rebuilds `container` from `table` on every switch.
    pub fn with_table(
        container: GalleryContainer,
        table: Vec<(String, Vec<ImageAttributes>)>,
        renderer: GalleryRenderer,
    ) -> Self {
        Self {
            layout: Layout::Shared { container, table },
            active: None,
            renderer,
        }
    }

    pub fn categories(&self) -> Vec<&str> {
        match &self.layout {
            Layout::Containers(containers) => containers
                .iter()
                .filter_map(|c| c.category.as_deref())
                .collect(),
            Layout::Shared { table, .. } => table.iter().map(|(name, _)| name.as_str()).collect(),
        }
    }

    /// First container marked active, else `preferred` when present, else the
    /// first category.
    pub fn default_category(&self, preferred: Option<&str>) -> Option<String> {
        if let Layout::Containers(containers) = &self.layout
            && let Some(active) = containers
                .iter()
                .find(|c| c.marked_active)
                .and_then(|c| c.category.clone())
        {
            return Some(active);
        }

        let categories = self.categories();
        preferred
            .filter(|p| categories.contains(p))
            .or_else(|| categories.first().copied())
            .map(str::to_string)
    }

    /// Activates the default category; returns its name.
    pub fn initialize(
        &mut self,
        preferred: Option<&str>,
        registry: &mut MetadataRegistry,
    ) -> Option<String> {
        let category = self.default_category(preferred)?;
        self.set_active_category(&category, registry);
        info!("Default gallery category: {}", category);
        Some(category)
    }

    /// Shows `name` and hides every other category; returns the number of
    /// images now visible. An unknown or empty category shows nothing.
    pub fn set_active_category(&mut self, name: &str, registry: &mut MetadataRegistry) -> usize {
        self.active = Some(name.to_string());

        let visible = match &mut self.layout {
            Layout::Containers(containers) => {
                let mut visible = 0;
                for container in containers.iter_mut() {
                    let is_active = container.category.as_deref() == Some(name);
                    container.visible = is_active;
                    if is_active {
                        let mut hydrated = 0;
                        for element in container.elements.iter_mut() {
                            if element.hydrate() {
                                hydrated += 1;
                            }
                        }
                        if hydrated > 0 {
                            debug!("Hydrated {} images in category {}", hydrated, name);
                        }
                        visible += container.elements.len();
                    }
                }
                visible
            }
            Layout::Shared { container, table } => {
                let images = table
                    .iter()
                    .find(|(category, _)| category == name)
                    .map(|(_, images)| images.as_slice())
                    .unwrap_or_default();
                container.category = Some(name.to_string());
                self.renderer.render(container, images, registry)
            }
        };

        debug!("Category {} active with {} images", name, visible);
        visible
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn containers(&self) -> &[GalleryContainer] {
        match &self.layout {
            Layout::Containers(containers) => containers,
            Layout::Shared { container, .. } => std::slice::from_ref(container),
        }
    }

    /// The container currently on screen.
    pub fn active_container(&self) -> Option<&GalleryContainer> {
        let active = self.active.as_deref()?;
        self.containers()
            .iter()
            .find(|c| c.visible && c.category.as_deref() == Some(active))
    }

    /// Category holding `reference`, searching rendered containers first and
    /// then the in-memory table.
    pub fn category_of(&self, reference: &str) -> Option<String> {
        match &self.layout {
            Layout::Containers(containers) => containers
                .iter()
                .find(|c| c.position_of(reference).is_some())
                .and_then(|c| c.category.clone()),
            Layout::Shared { table, .. } => table
                .iter()
                .find(|(_, images)| {
                    images
                        .iter()
                        .any(|a| a.reference() == reference || a.aliases().contains(&reference))
                })
                .map(|(name, _)| name.clone()),
        }
    }

    pub fn renderer(&self) -> &GalleryRenderer {
        &self.renderer
    }

    pub fn buttons(&self) -> Vec<CategoryButton> {
        let active = self.active.as_deref();
        self.categories()
            .into_iter()
            .map(|category| CategoryButton {
                category: category.to_string(),
                label: nice_category_name(category),
                active: Some(category) == active,
                labels: category_labels(category),
            })
            .collect()
    }
}
