use crate::domain::model::{ColumnMetadata, ColumnSpecification};
use crate::domain::ports::DatasetService;
use crate::utils::error::{BuilderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Dataset service reached over HTTP, scoped to one dataset.
#[derive(Debug, Clone)]
pub struct HttpDatasetService {
    client: Client,
    base_url: Url,
    data_id: String,
}

impl HttpDatasetService {
    pub fn new(base_url: &str, data_id: impl Into<String>) -> Result<Self> {
        Self::with_client(Client::new(), base_url, data_id)
    }

    /// Requests are never cancelled unless a timeout is configured here.
    pub fn with_timeout(
        base_url: &str,
        data_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url, data_id)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        data_id: impl Into<String>,
    ) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| BuilderError::InvalidConfigValueError {
            field: "service.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        Ok(Self {
            client,
            base_url,
            data_id: data_id.into(),
        })
    }

    pub fn dtypes_url(&self) -> Result<Url> {
        self.endpoint("dtale/dtypes")
    }

    pub fn build_column_url(&self) -> Result<Url> {
        self.endpoint("dtale/build-column")
    }

    fn endpoint(&self, route: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{}/{}", route, self.data_id))
            .map_err(|e| BuilderError::ConfigError {
                message: format!("Cannot build {} URL: {}", route, e),
            })
    }

    /// Reads a JSON body and turns `{error, traceback}` payloads into errors.
    async fn read_payload(response: reqwest::Response) -> Result<serde_json::Value> {
        let status = response.status();
        tracing::debug!("Dataset service response status: {}", status);
        let body = response.text().await?;

        let payload: serde_json::Value = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(BuilderError::ServiceError {
                    message: format!("Dataset service responded with {}", status),
                    traceback: None,
                })
            }
        };

        if let Some(error) = payload.get("error").filter(|e| !e.is_null()) {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            let traceback = payload
                .get("traceback")
                .and_then(|t| t.as_str())
                .map(str::to_string);
            return Err(BuilderError::ServiceError { message, traceback });
        }

        if !status.is_success() {
            return Err(BuilderError::ServiceError {
                message: format!("Dataset service responded with {}", status),
                traceback: None,
            });
        }

        Ok(payload)
    }
}

#[async_trait]
impl DatasetService for HttpDatasetService {
    async fn fetch_columns(&self) -> Result<ColumnMetadata> {
        let url = self.dtypes_url()?;
        tracing::debug!("Making dtypes request to: {}", url);
        let response = self.client.get(url).send().await?;
        let payload = Self::read_payload(response).await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn build_column(&self, spec: &ColumnSpecification) -> Result<()> {
        let url = self.build_column_url()?;
        let query = spec.to_query_pairs()?;
        tracing::debug!(
            "Making build-column request to: {} ({} '{}')",
            url,
            spec.kind,
            spec.name
        );
        let response = self.client.get(url).query(&query).send().await?;
        Self::read_payload(response).await?;
        Ok(())
    }
}
