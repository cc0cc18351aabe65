use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use tseries::{FetchError, FetchResult, Reading, SampleSource};

#[derive(Deserialize)]
struct CurrentPayload {
    temperature: f64,
}

#[derive(Deserialize)]
struct HistoryPayload {
    history: Vec<f64>,
}

/// Reads the sensor backend over HTTP.
pub struct HttpSampleSource {
    client: Client,
    base_url: String,
}

impl HttpSampleSource {
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn current_url(&self) -> String {
        format!("{}/get_temperature", self.base_url)
    }

    pub fn history_url(&self, look_back_seconds: u64) -> String {
        format!("{}/get_history?seconds={}", self.base_url, look_back_seconds)
    }

    async fn get_text(&self, url: &str) -> FetchResult<String> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.text().await?)
    }
}

pub fn parse_current(body: &str) -> FetchResult<f64> {
    let payload: CurrentPayload =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;
    if !payload.temperature.is_finite() {
        return Err(FetchError::Payload("non-finite temperature".to_string()));
    }
    Ok(payload.temperature)
}

pub fn parse_history(body: &str) -> FetchResult<Vec<f64>> {
    let payload: HistoryPayload =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;
    Ok(payload.history)
}

impl SampleSource for HttpSampleSource {
    async fn fetch_current(&self) -> FetchResult<Reading> {
        let body = self.get_text(&self.current_url()).await?;
        let value = parse_current(&body)?;
        // the payload has no timestamp; stamp on receipt
        Ok(Reading {
            value,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    async fn fetch_history(&self, look_back_seconds: u64) -> FetchResult<Vec<f64>> {
        let body = self.get_text(&self.history_url(look_back_seconds)).await?;
        parse_history(&body)
    }
}
