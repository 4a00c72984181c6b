// Numbers API provider
// Fetches `{base_url}/{n}/{category}` and returns the plain text body

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{FactError, FactProvider};
use crate::config::FactConfig;

/// HTTP client for a numbersapi.com compatible trivia service
pub struct NumbersApiProvider {
    client: Client,
    base_url: String,
    category: String,
}

impl NumbersApiProvider {
    pub fn new(config: &FactConfig) -> Result<Self, FactError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| FactError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            category: config.category.clone(),
        })
    }

    fn fact_url(&self, n: i64) -> String {
        format!("{}/{n}/{}", self.base_url, self.category)
    }
}

#[async_trait]
impl FactProvider for NumbersApiProvider {
    fn name(&self) -> &'static str {
        "numbersapi"
    }

    async fn fetch_fact(&self, n: i64) -> Result<String, FactError> {
        let response = self
            .client
            .get(self.fact_url(n))
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(map_body_error)?;
        if text.trim().is_empty() {
            return Err(FactError::Empty);
        }
        Ok(text)
    }
}

fn map_request_error(e: reqwest::Error) -> FactError {
    if e.is_timeout() {
        FactError::Timeout
    } else {
        FactError::Network(e.to_string())
    }
}

fn map_body_error(e: reqwest::Error) -> FactError {
    if e.is_timeout() {
        FactError::Timeout
    } else {
        FactError::Body(e.to_string())
    }
}
