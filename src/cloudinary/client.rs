use super::signing::sign;
use super::{
    CloudinaryConfig, CloudinaryError, MediaLibrary, MediaUploader, SearchRequest,
    SearchResponse, UploadRequest, UploadResponse,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary over HTTPS.
pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http: reqwest::Client,
    api_base: String,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Result<Self, CloudinaryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            config,
            http,
            api_base: API_BASE.to_string(),
        })
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.api_base, self.config.cloud_name, path)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CloudinaryError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or(body);
        return Err(CloudinaryError::ApiError {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl MediaLibrary for CloudinaryClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, CloudinaryError> {
        debug!(
            "Searching {:?} (cursor: {:?})",
            request.expression, request.next_cursor
        );

        let response = self
            .http
            .post(self.endpoint("resources/search"))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }
}

#[async_trait]
impl MediaUploader for CloudinaryClient {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, CloudinaryError> {
        let bytes = tokio::fs::read(&request.file).await?;
        let file_name = request
            .file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("folder", request.folder.clone()),
            ("overwrite", request.overwrite.to_string()),
            ("public_id", request.public_id.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = sign(&signed, &self.config.api_secret);

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in signed {
            form = form.text(key, value);
        }

        let response = self
            .http
            .post(self.endpoint("image/upload"))
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadResponse = read_json(response).await?;
        info!("Uploaded {:?} -> {}", request.file, uploaded.secure_url);
        Ok(uploaded)
    }

    fn name(&self) -> &str {
        "cloudinary"
    }
}
