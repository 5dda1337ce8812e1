use async_trait::async_trait;
use serde_json::Value;

use crate::domain::catalog::DatasetKind;
use crate::domain::entities::jockey::JockeyData;
use crate::domain::entities::plot::PlotSpec;
use crate::domain::entities::record::IngestError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Deserialize(String),
    #[error("failed to read local data: {0}")]
    Local(String),
}

impl From<IngestError> for FetchError {
    fn from(err: IngestError) -> Self {
        FetchError::Deserialize(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Deserialize(err.to_string())
    }
}

/// Read-only analytics feeds.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Raw JSON payload of one auction dataset; validated by the caller.
    async fn fetch_dataset(&self, kind: DatasetKind) -> Result<Value, FetchError>;
    async fn fetch_jockey_analytics(&self) -> Result<JockeyData, FetchError>;
}

#[async_trait]
pub trait PlotSource: Send + Sync {
    async fn generate_plot(&self, prompt: &str) -> Result<PlotSpec, FetchError>;
}
