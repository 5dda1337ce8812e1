use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::catalog::Section;

pub const DEFAULT_API_BASE_URL: &str = "https://auction-dashboard.onrender.com";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "reports.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
}

/// Runtime settings: `config.toml` in the platform config dir, then
/// `MOVE37_*` environment variables on top.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub jockey_analytics_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub supabase: Option<SupabaseConfig>,
    pub db_path: Option<PathBuf>,
    pub http_timeout_secs: u64,
    pub start_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            jockey_analytics_url: None,
            data_dir: None,
            supabase: None,
            db_path: None,
            http_timeout_secs: 0,
            start_path: None,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "move37", "move37")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = project_dirs()?.config_dir().join(CONFIG_FILE);
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        tracing::info!(path = %path.display(), "loading config file");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = var("MOVE37_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(url) = var("MOVE37_JOCKEY_ANALYTICS_URL") {
            self.jockey_analytics_url = Some(url);
        }
        if let Some(dir) = var("MOVE37_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let (Some(url), Some(key)) = (var("MOVE37_SUPABASE_URL"), var("MOVE37_SUPABASE_KEY")) {
            self.supabase = Some(SupabaseConfig { url, key });
        }
        if let Some(path) = var("MOVE37_DB_PATH") {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(secs) = var("MOVE37_HTTP_TIMEOUT_SECS") {
            match secs.trim().parse() {
                Ok(secs) => self.http_timeout_secs = secs,
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid MOVE37_HTTP_TIMEOUT_SECS"),
            }
        }
        if let Some(path) = var("MOVE37_START_PATH") {
            self.start_path = Some(path);
        }
    }

    pub fn jockey_url(&self) -> String {
        self.jockey_analytics_url.clone().unwrap_or_else(|| {
            format!(
                "{}/data/jockeys.json",
                self.api_base_url.trim_end_matches('/')
            )
        })
    }

    /// Section shown at launch; unknown paths fall back to home.
    pub fn start_section(&self) -> Section {
        let Some(path) = self.start_path.as_deref() else {
            return Section::default();
        };
        Section::from_path(path).unwrap_or_else(|| {
            tracing::warn!(path, "unknown start path, opening home");
            Section::default()
        })
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        (self.http_timeout_secs > 0).then(|| Duration::from_secs(self.http_timeout_secs))
    }

    pub fn resolve_db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_local_dir().join(DB_FILE)),
        }
    }
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
