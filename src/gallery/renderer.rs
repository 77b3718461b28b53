use super::{GalleryContainer, ImageElement, LoadingHint, OpenRequest};
use crate::registry::{ImageAttributes, MetadataRegistry};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryRenderer {
    loading: LoadingHint,
}

impl GalleryRenderer {
    pub fn new(loading: LoadingHint) -> Self {
        Self { loading }
    }

    /// Clears `container` and rebuilds it from `images`, keeping list order.
    /// Every image is registered for metadata lookup and bound for activation.
    pub fn render(
        &self,
        container: &mut GalleryContainer,
        images: &[ImageAttributes],
        registry: &mut MetadataRegistry,
    ) -> usize {
        container.elements.clear();
        container
            .elements
            .extend(images.iter().cloned().map(ImageElement::new));

        self.enhance(container, registry);

        debug!(
            "Rendered {} images into {}",
            container.elements.len(),
            container.selector
        );
        container.elements.len()
    }

    /// Prepares elements that already exist (server-rendered markup): lazy
    /// hint, fade-in index, metadata registration and activation binding.
    pub fn enhance(&self, container: &mut GalleryContainer, registry: &mut MetadataRegistry) {
        for (i, element) in container.elements.iter_mut().enumerate() {
            element.loading = self.loading;
            element.style_index = i + 1;
            registry.register(&element.attributes);
        }
        self.bind(container);
    }

    /// Marks unbound elements as bound; returns how many were newly bound.
    pub fn bind(&self, container: &mut GalleryContainer) -> usize {
        let mut newly_bound = 0;
        for element in container.elements.iter_mut().filter(|e| !e.bound) {
            element.bound = true;
            newly_bound += 1;
        }
        newly_bound
    }

    /// The viewer request for activating the image at `index`: the clicked
    /// reference plus every reference in the same container.
    pub fn activate(&self, container: &GalleryContainer, index: usize) -> Option<OpenRequest> {
        let element = container.elements.get(index)?;
        if !element.bound {
            return None;
        }

        Some(OpenRequest {
            reference: element.reference().to_string(),
            context: container.references(),
        })
    }
}
