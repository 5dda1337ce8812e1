mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::default_webview_data_dir;

fn init_logging() {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    // A subscriber may already be installed by an embedding harness.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_logging();

    let mut config = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Move37 Dashboard"));
    match default_webview_data_dir() {
        Ok(dir) => config = config.with_data_directory(dir),
        Err(err) => tracing::warn!("using default webview data directory: {err:#}"),
    }

    dioxus::LaunchBuilder::desktop().with_cfg(config).launch(App);
}
