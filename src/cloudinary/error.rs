use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudinaryError {
    #[error("Missing Cloudinary credentials: {0}")]
    MissingCredentials(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Cloudinary API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
