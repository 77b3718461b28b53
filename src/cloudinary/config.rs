use super::CloudinaryError;

pub const DEFAULT_FOLDER: &str = "images";

/// Credentials and search scope, read from `CLOUDINARY_*` variables only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folders searched by `sync`; the first one is the upload target.
    pub folders: Vec<String>,
    /// Raw search expression replacing the folder filters.
    pub search_expression: Option<String>,
    pub fallback_category: Option<String>,
}

impl CloudinaryConfig {
    pub fn from_env() -> Result<Self, CloudinaryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CloudinaryError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cloud_name = get("CLOUDINARY_CLOUD_NAME")
            .or_else(|| get("CLOUDINARY_CLOUDNAME"))
            .or_else(|| get("CLOUDINARY_CLOUD"));
        let api_key = get("CLOUDINARY_API_KEY");
        let api_secret = get("CLOUDINARY_API_SECRET");

        let (Some(cloud_name), Some(api_key), Some(api_secret)) = (cloud_name, api_key, api_secret)
        else {
            return Err(CloudinaryError::MissingCredentials(
                "set CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET"
                    .to_string(),
            ));
        };

        let mut folders: Vec<String> = get("CLOUDINARY_FOLDERS")
            .map(|list| {
                list.split(',')
                    .map(|f| f.trim().trim_matches('/').to_string())
                    .filter(|f| !f.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if folders.is_empty() {
            folders.push(get("CLOUDINARY_FOLDER").unwrap_or_else(|| DEFAULT_FOLDER.to_string()));
        }

        Ok(Self {
            cloud_name,
            api_key,
            api_secret,
            folders,
            search_expression: get("CLOUDINARY_SEARCH_EXPRESSION"),
            fallback_category: get("CLOUDINARY_FALLBACK_CATEGORY"),
        })
    }

    pub fn folder(&self) -> &str {
        self.folders
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_FOLDER)
    }

    /// One expression per search pass: the override, else `folder:<f>/*` for
    /// every folder.
    pub fn search_expressions(&self) -> Vec<String> {
        match &self.search_expression {
            Some(expression) => vec![expression.clone()],
            None => self
                .folders
                .iter()
                .map(|f| format!("folder:{}/*", f))
                .collect(),
        }
    }

    /// Category for assets whose public id has no folder part.
    pub fn fallback_category(&self) -> &str {
        self.fallback_category.as_deref().unwrap_or(self.folder())
    }
}
