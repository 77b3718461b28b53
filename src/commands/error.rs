use crate::catalog::CatalogError;
use crate::cloudinary::CloudinaryError;
use crate::templating::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Cloudinary(#[from] CloudinaryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl CommandError {
    /// Process exit status. Missing media-host credentials is a graceful no-op.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Cloudinary(CloudinaryError::MissingCredentials(_)) => 0,
            _ => 1,
        }
    }
}
