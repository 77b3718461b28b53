// Catalog module - the image list written by `sync` and read by `preview`
mod core;
mod error;
mod types;

pub use core::{Catalog, nice_category_name};
pub(crate) use core::capitalize_first;
pub use error::CatalogError;
pub use types::*;

#[cfg(test)]
mod tests;
