use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;

pub trait DocumentSource {
    /// Download one document as raw bytes.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

pub struct HttpDocumentSource {
    client: reqwest::blocking::Client,
}

impl HttpDocumentSource {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl DocumentSource for HttpDocumentSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = reqwest::Url::parse(url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        debug!(url = %url, "fetching document");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/pdf")
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
