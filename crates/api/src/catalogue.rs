use showroom_core::CatalogueItem;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;

pub trait CatalogueSource {
    /// Pull the full remote catalogue, in the order the server lists it.
    fn fetch_all(&self) -> Result<Vec<CatalogueItem>, ApiError>;
}

pub struct HttpCatalogueSource {
    client: reqwest::blocking::Client,
    url: reqwest::Url,
}

impl HttpCatalogueSource {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let url = reqwest::Url::parse(&config.catalogue_url)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, url })
    }
}

impl CatalogueSource for HttpCatalogueSource {
    fn fetch_all(&self) -> Result<Vec<CatalogueItem>, ApiError> {
        debug!(url = %self.url, "fetching catalogue");
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<Vec<CatalogueItem>>()
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}
