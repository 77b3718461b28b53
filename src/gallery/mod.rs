// Gallery module - rendering, category filtering and markup
mod filter;
mod markup;
mod renderer;
mod types;

pub use filter::CategoryFilter;
pub use markup::{category_buttons, category_sections, escape_html, image_tag};
pub use renderer::GalleryRenderer;
pub use types::*;
