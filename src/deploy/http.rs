//! Blocking HTTP client for the deploy service.

use crate::config::DeployConfig;
use crate::deploy::DeployService;
use crate::error::{ApiError, StorageError};
use crate::project::ProjectConfig;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Deploy service reached over HTTP with a bearer API key.
#[derive(Debug, Clone)]
pub struct HttpDeployService {
    client: Client,
    base_url: Url,
}

impl HttpDeployService {
    pub fn new(config: &DeployConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(concat!("coderman/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(config.endpoint.trim_end_matches('/')).map_err(|e| {
            ApiError::ConfigError(format!("Invalid deploy endpoint {}: {}", config.endpoint, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::ConfigError(format!(
                "Deploy endpoint {} cannot carry a path",
                config.endpoint
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Endpoint URL with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::ConfigError(format!("Deploy endpoint {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn failure(context: &str, res: Response) -> ApiError {
        let status = res.status();
        let body = res.text().unwrap_or_default();
        ApiError::DeployFailed(format!("{}: {} {}", context, status, body.trim()))
    }
}

impl DeployService for HttpDeployService {
    fn verify_api_key(&self, api_key: &str) -> Result<bool, ApiError> {
        let url = self.url(&["api", "v1", "auth", "verify"])?;
        debug!(url = %url, "Verifying API key");
        let res = self
            .client
            .post(url.clone())
            .bearer_auth(api_key)
            .send()
            .map_err(|e| ApiError::DeployFailed(format!("Failed to reach {}: {}", url, e)))?;

        match res.status() {
            s if s.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            _ => Err(Self::failure("API key check failed", res)),
        }
    }

    fn upload(&self, project: &ProjectConfig, bundle: &Path) -> Result<(), ApiError> {
        let body = fs::read(bundle).map_err(|source| StorageError::ReadFailed {
            path: bundle.to_path_buf(),
            source,
        })?;
        let url = self.url(&["api", "v1", "projects", &project.project_name, "deploy"])?;
        info!(url = %url, bytes = body.len(), "Uploading bundle");

        let res = self
            .client
            .post(url.clone())
            .bearer_auth(&project.api_key)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/gzip"))
            .body(body)
            .send()
            .map_err(|e| ApiError::DeployFailed(format!("Failed to reach {}: {}", url, e)))?;

        match res.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized(
                format!("upload to {} was refused", url),
            )),
            _ => Err(Self::failure("Upload failed", res)),
        }
    }
}
