use std::time::Duration;

pub const DEFAULT_CATALOGUE_URL: &str = "https://api.restful-api.dev/objects";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub catalogue_url: String,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            catalogue_url: DEFAULT_CATALOGUE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}
