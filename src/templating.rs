use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
    time::SystemTime,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const HEADER_TEMPLATE: &str = "_header.html.liquid";
pub const FOOTER_TEMPLATE: &str = "_footer.html.liquid";
pub const LIGHTBOX_TEMPLATE: &str = "_lightbox.html.liquid";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to read template {name}: {source}")]
    ReadFailed {
        name: String,
        source: std::io::Error,
    },

    #[error("Failed to parse template {name}: {message}")]
    ParseFailed { name: String, message: String },

    #[error("Failed to render template {name}: {message}")]
    RenderFailed { name: String, message: String },
}

/// Liquid templates read from one directory, cached until their mtime changes.
pub struct TemplateEngine {
    template_dir: PathBuf,
    cache: Arc<RwLock<HashMap<String, CachedTemplate>>>,
}

struct CachedTemplate {
    content: String,
    modified: SystemTime,
}

impl TemplateEngine {
    pub fn new(template_dir: PathBuf) -> Self {
        Self {
            template_dir,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    pub async fn has_template(&self, name: &str) -> bool {
        tokio::fs::metadata(self.template_dir.join(name))
            .await
            .is_ok_and(|m| m.is_file())
    }

    pub async fn load_template(&self, name: &str) -> Result<String, TemplateError> {
        let template_path = self.template_dir.join(name);

        let metadata = tokio::fs::metadata(&template_path)
            .await
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.get(name)
            && cached.modified >= modified
        {
            debug!("Using cached template for {}", name);
            return Ok(cached.content.clone());
        }

        info!("Loading template: {}", name);
        let content = tokio::fs::read_to_string(&template_path)
            .await
            .map_err(|source| TemplateError::ReadFailed {
                name: name.to_string(),
                source,
            })?;

        cache.insert(
            name.to_string(),
            CachedTemplate {
                content: content.clone(),
                modified,
            },
        );

        Ok(content)
    }

    fn render_source(
        name: &str,
        source: &str,
        globals: &liquid::Object,
    ) -> Result<String, TemplateError> {
        let parser = liquid::ParserBuilder::with_stdlib().build().map_err(|e| {
            TemplateError::ParseFailed {
                name: name.to_string(),
                message: e.to_string(),
            }
        })?;

        let template = parser
            .parse(source)
            .map_err(|e| TemplateError::ParseFailed {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        template
            .render(globals)
            .map_err(|e| TemplateError::RenderFailed {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Partials are rendered with the page globals and exposed to the page as
    /// `header`, `footer` and `lightbox`. A missing partial renders as empty.
    async fn render_partial(&self, name: &str, globals: &liquid::Object) -> String {
        let source = match self.load_template(name).await {
            Ok(source) => source,
            Err(e) => {
                warn!("Partial unavailable: {}", e);
                return String::new();
            }
        };

        Self::render_source(name, &source, globals).unwrap_or_else(|e| {
            warn!("Failed to render partial: {}", e);
            String::new()
        })
    }

    pub async fn render_template(
        &self,
        template_name: &str,
        globals: liquid::Object,
    ) -> Result<String, TemplateError> {
        let template_content = self.load_template(template_name).await?;

        let header = self.render_partial(HEADER_TEMPLATE, &globals).await;
        let footer = self.render_partial(FOOTER_TEMPLATE, &globals).await;
        let lightbox = self.render_partial(LIGHTBOX_TEMPLATE, &globals).await;

        let mut full_globals = globals;
        full_globals.insert("header".into(), liquid::model::Value::scalar(header));
        full_globals.insert("footer".into(), liquid::model::Value::scalar(footer));
        full_globals.insert("lightbox".into(), liquid::model::Value::scalar(lightbox));

        Self::render_source(template_name, &template_content, &full_globals)
    }
}

#[cfg(test)]
#[path = "templating_tests.rs"]
mod tests;
