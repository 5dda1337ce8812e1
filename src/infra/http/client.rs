use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

use crate::domain::catalog::DatasetKind;
use crate::domain::entities::jockey::JockeyData;
use crate::domain::entities::plot::{PlotResponse, PlotSpec};
use crate::usecase::ports::datasource::{DatasetSource, FetchError, PlotSource};

const PLOT_FALLBACK_ERROR: &str = "Error generating plot.";

fn fetch_error(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        FetchError::Deserialize(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

async fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .ok()
        .filter(|body| !body.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(FetchError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Analytics backend: auction datasets, jockey analytics and plot generation.
#[derive(Clone)]
pub struct HttpAnalyticsApi {
    client: Client,
    base_url: String,
    jockey_url: String,
}

impl HttpAnalyticsApi {
    pub fn new(base_url: impl Into<String>, jockey_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            jockey_url: jockey_url.into(),
        }
    }

    pub fn dataset_url(&self, kind: DatasetKind) -> String {
        format!("{}/api/data/{}", self.base_url, kind.slug())
    }

    pub fn plot_url(&self) -> String {
        format!("{}/api/ai-plot", self.base_url)
    }
}

#[async_trait]
impl DatasetSource for HttpAnalyticsApi {
    async fn fetch_dataset(&self, kind: DatasetKind) -> Result<Value, FetchError> {
        let url = self.dataset_url(kind);
        tracing::debug!(%url, "fetching dataset");
        let response = self.client.get(&url).send().await.map_err(fetch_error)?;
        let response = ensure_success(response).await?;
        response.json::<Value>().await.map_err(fetch_error)
    }

    async fn fetch_jockey_analytics(&self) -> Result<JockeyData, FetchError> {
        let response = self
            .client
            .get(&self.jockey_url)
            .send()
            .await
            .map_err(fetch_error)?;
        let response = ensure_success(response).await?;
        response.json::<JockeyData>().await.map_err(fetch_error)
    }
}

#[async_trait]
impl PlotSource for HttpAnalyticsApi {
    async fn generate_plot(&self, prompt: &str) -> Result<PlotSpec, FetchError> {
        let response = self
            .client
            .post(self.plot_url())
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(fetch_error)?;
        let status = response.status();
        let body = response.text().await.map_err(fetch_error)?;
        plot_from_body(status, &body)
    }
}

/// Error bodies are read leniently so the service's message survives; a
/// success body must decode.
fn plot_from_body(status: StatusCode, body: &str) -> Result<PlotSpec, FetchError> {
    if !status.is_success() {
        let message = serde_json::from_str::<PlotResponse>(body)
            .ok()
            .and_then(|response| response.error)
            .unwrap_or_else(|| PLOT_FALLBACK_ERROR.to_string());
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }
    let response: PlotResponse = serde_json::from_str(body)?;
    let encoded = response
        .plot
        .ok_or_else(|| FetchError::Deserialize("response has no plot".to_string()))?;
    Ok(PlotSpec::from_encoded(&encoded)?)
}
