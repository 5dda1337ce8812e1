use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Number, Value};

use crate::domain::catalog::DatasetKind;
use crate::domain::entities::jockey::JockeyData;
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::ports::datasource::{DatasetSource, FetchError};

const JOCKEY_FILE: &str = "jockeys.json";

fn csv_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Reads a CSV export into the same JSON shape the HTTP API returns: an array
/// of flat objects keyed by header, empty cells as null.
pub fn read_csv_rows(csv_path: &Path) -> anyhow::Result<Value> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        let row: Map<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), csv_cell(record.get(idx).unwrap_or(""))))
            .collect();
        rows.push(Value::Object(row));
    }
    Ok(Value::Array(rows))
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn local_error(err: anyhow::Error) -> FetchError {
    FetchError::Local(format!("{err:#}"))
}

fn into_fetch_error(err: anyhow::Error) -> FetchError {
    err.downcast::<FetchError>().unwrap_or_else(local_error)
}

/// Offline dataset source: `<dir>/<slug>.json` or `<dir>/<slug>.csv`, plus
/// `<dir>/jockeys.json`.
pub struct LocalDataDir {
    dir: PathBuf,
}

impl LocalDataDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dataset_path(&self, kind: DatasetKind) -> PathBuf {
        let json = self.dir.join(format!("{}.json", kind.slug()));
        if json.exists() {
            json
        } else {
            self.dir.join(format!("{}.csv", kind.slug()))
        }
    }
}

#[async_trait]
impl DatasetSource for LocalDataDir {
    async fn fetch_dataset(&self, kind: DatasetKind) -> Result<Value, FetchError> {
        let path = self.dataset_path(kind);
        run_blocking(move || {
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let value = if is_json {
                read_json(&path)
            } else {
                read_csv_rows(&path)
            };
            value.map_err(local_error)
        })
        .await
        .map_err(into_fetch_error)
    }

    async fn fetch_jockey_analytics(&self) -> Result<JockeyData, FetchError> {
        let path = self.dir.join(JOCKEY_FILE);
        run_blocking(move || {
            let value = read_json(&path).map_err(local_error)?;
            serde_json::from_value::<JockeyData>(value).map_err(FetchError::from)
        })
        .await
        .map_err(into_fetch_error)
    }
}
