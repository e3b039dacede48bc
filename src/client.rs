use std::future::Future;
use tracing::debug;

use crate::{config::ApiConfig, error::FetchError};

/// Источник сырых ответов со списком мест.
///
/// Поллер работает через этот трейт, чтобы в тестах можно было подменить сеть.
pub trait SeatSource: Clone + Send + Sync + 'static {
    fn fetch_payload(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP-клиент к `GET /api_root/Seat/`. Без авторизации, без параметров.
#[derive(Clone)]
pub struct SeatApiClient {
    url: String,
    http_client: reqwest::Client,
}

impl SeatApiClient {
    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            url: config.url.clone(),
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SeatSource for SeatApiClient {
    async fn fetch_payload(&self) -> Result<String, FetchError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(bytes = body.len(), url = %self.url, "Seat payload received");
        Ok(body)
    }
}
