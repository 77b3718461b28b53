use axum::{
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
    sync::Arc,
    time::UNIX_EPOCH,
};
use tokio::{fs::File, sync::RwLock};
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

/// Serves the generated preview pages and their assets.
#[derive(Clone)]
pub struct StaticFileHandler {
    pub root: PathBuf,
    file_versions: Arc<RwLock<HashMap<String, u64>>>,
}

impl StaticFileHandler {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_versions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Records the mtime of every top-level stylesheet and script.
    pub async fn refresh_file_versions(&self) {
        info!("Refreshing asset versions in {:?}", self.root);
        let mut versions = self.file_versions.write().await;
        versions.clear();

        let Ok(mut entries) = tokio::fs::read_dir(&self.root).await else {
            return;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if let Ok(metadata) = entry.metadata().await
                && metadata.is_file()
                && let Some(ext) = path.extension()
                && (ext == "css" || ext == "js")
                && let Ok(modified) = metadata.modified()
                && let Ok(duration) = modified.duration_since(UNIX_EPOCH)
                && let Some(file_name) = path.file_name().and_then(|n| n.to_str())
            {
                versions.insert(file_name.to_string(), duration.as_secs());
                debug!("Asset version: {} -> {}", file_name, duration.as_secs());
            }
        }
    }

    pub async fn get_file_version(&self, filename: &str) -> Option<u64> {
        self.file_versions.read().await.get(filename).copied()
    }

    /// `style.css` becomes `style.css?v=<mtime>` once its version is known.
    pub async fn get_versioned_url(&self, path: &str) -> String {
        let filename = path.rsplit('/').next().unwrap_or(path);

        match self.get_file_version(filename).await {
            Some(version) => format!("{}?v={}", path, version),
            None => path.to_string(),
        }
    }

    /// Maps a request path to a file below the root. Extensionless paths get
    /// `.html` so `/portfolio` serves `portfolio.html`.
    async fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            warn!("Rejected path outside preview root: {:?}", path);
            return None;
        }

        let direct = self.root.join(relative);
        if tokio::fs::metadata(&direct)
            .await
            .is_ok_and(|m| m.is_file())
        {
            return Some(direct);
        }

        if relative.extension().is_none() {
            let html = direct.with_extension("html");
            if tokio::fs::metadata(&html).await.is_ok_and(|m| m.is_file()) {
                return Some(html);
            }
        }
        None
    }

    pub async fn serve(&self, path: &str, has_version: bool) -> Response {
        let Some(file_path) = self.resolve(path).await else {
            debug!("No preview file for {:?}", path);
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        };

        let metadata = match tokio::fs::metadata(&file_path).await {
            Ok(m) => m,
            Err(e) => {
                debug!("Failed to get metadata for {:?}: {}", file_path, e);
                return (StatusCode::NOT_FOUND, "File not found").into_response();
            }
        };

        let file = match File::open(&file_path).await {
            Ok(file) => file,
            Err(e) => {
                debug!("Failed to open file {:?}: {}", file_path, e);
                return (StatusCode::NOT_FOUND, "File not found").into_response();
            }
        };

        let content_type = mime_guess::from_path(&file_path)
            .first_or_octet_stream()
            .to_string();

        let cache_control = if has_version {
            "public, max-age=31536000, immutable"
        } else if content_type.starts_with("text/html") {
            "no-cache"
        } else if content_type.starts_with("image/") {
            "public, max-age=31536000"
        } else {
            "public, max-age=300, must-revalidate"
        };

        let mut response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, cache_control);

        if let Ok(modified) = metadata.modified()
            && let Ok(duration) = modified.duration_since(UNIX_EPOCH)
        {
            response = response
                .header(header::LAST_MODIFIED, httpdate::fmt_http_date(modified))
                .header(
                    header::ETAG,
                    format!("\"{}-{}\"", duration.as_secs(), metadata.len()),
                );
        }

        response
            .body(Body::from_stream(ReaderStream::new(file)))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
