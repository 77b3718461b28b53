//! Metadata registry: maps every alias of an image (display URL, full-size URL,
//! public id) to one descriptive record, and produces a usable record for
//! references it has never seen.

mod core;
mod types;

pub use core::{MetadataRegistry, prettify_filename};
pub(crate) use core::is_suffix_match;
pub use types::*;

pub const DEFAULT_CAMERA: &str = "Fujifilm XT-30";
pub const NO_DESCRIPTION: &str = "No description.";
pub const NOT_AVAILABLE: &str = "N/A";
