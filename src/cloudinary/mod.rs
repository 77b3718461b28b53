//! Client for the Cloudinary media host: credentials from the environment,
//! the paginated Search API and signed uploads.

pub mod client;
pub mod config;
pub mod error;
pub mod signing;
pub mod types;

pub use client::CloudinaryClient;
pub use config::*;
pub use error::*;
pub use types::*;

use async_trait::async_trait;

/// Read side of the media host.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, CloudinaryError>;
}

/// Write side of the media host.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, CloudinaryError>;
    fn name(&self) -> &str;
}
