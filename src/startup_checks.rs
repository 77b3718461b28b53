use crate::Config;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Failed to create output directory: {0}")]
    OutputDirectoryCreationFailed(#[from] std::io::Error),

    #[error("Data file does not exist: {0:?}")]
    DataFileMissing(PathBuf),

    #[error("Template directory does not exist: {0:?}")]
    TemplateDirectoryMissing(PathBuf),

    #[error("Preview has not been generated yet: {0:?}")]
    PreviewMissing(PathBuf),
}

impl StartupCheckError {
    /// Critical failures stop the command; the rest are logged.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            StartupCheckError::OutputDirectoryCreationFailed(_)
                | StartupCheckError::DataFileMissing(_)
        )
    }
}

/// `serve` needs the output directory; a missing `index.html` only warns.
pub async fn check_serve(config: &Config) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();
    let output_dir = &config.preview.output_directory;

    info!("Performing startup checks...");

    if !output_dir.exists() {
        info!("Output directory does not exist, creating: {:?}", output_dir);
        if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
            error!("Failed to create output directory: {}", e);
            errors.push(StartupCheckError::OutputDirectoryCreationFailed(e));
        }
    } else {
        info!("Output directory exists: {:?}", output_dir);
    }

    let index = output_dir.join("index.html");
    if !index.exists() {
        warn!("No index.html in {:?}; run `portfolio preview` first", output_dir);
        errors.push(StartupCheckError::PreviewMissing(index));
    }

    finish(errors)
}

/// `preview` needs the data file; a missing template directory only warns.
pub async fn check_preview(config: &Config) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    info!("Performing startup checks...");

    let data_file = &config.data.data_file;
    if !data_file.exists() {
        error!("No data file found at {:?}; run `portfolio sync` first", data_file);
        errors.push(StartupCheckError::DataFileMissing(data_file.clone()));
    } else {
        info!("Data file exists: {:?}", data_file);
    }

    let templates_dir = &config.preview.template_directory;
    if !templates_dir.exists() {
        warn!("Templates directory does not exist: {:?}", templates_dir);
        errors.push(StartupCheckError::TemplateDirectoryMissing(
            templates_dir.clone(),
        ));
    } else {
        info!("Templates directory exists: {:?}", templates_dir);
    }

    finish(errors)
}

fn finish(errors: Vec<StartupCheckError>) -> Result<(), Vec<StartupCheckError>> {
    if errors.is_empty() {
        info!("All startup checks passed");
        Ok(())
    } else {
        warn!("Startup checks reported {} problems", errors.len());
        Err(errors)
    }
}
