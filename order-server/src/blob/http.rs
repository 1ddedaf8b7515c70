//! HTTP blob sink (PUT to a hosting endpoint)

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::{BlobSink, UploadError};

/// Uploads documents via `PUT <endpoint>/<remote_name>`
#[derive(Debug, Clone)]
pub struct HttpBlobSink {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpBlobSink {
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| UploadError(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl BlobSink for HttpBlobSink {
    async fn upload(&self, bytes: &[u8], remote_name: &str) -> Result<(), UploadError> {
        let mut request = self
            .client
            .put(format!("{}/{}", self.endpoint, remote_name))
            .body(bytes.to_vec());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UploadError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UploadError(format!(
                "{remote_name}: HTTP {}",
                response.status()
            )));
        }

        info!(remote_name, "blob upload ok");
        Ok(())
    }
}
