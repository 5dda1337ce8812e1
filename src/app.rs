use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::catalog::Section;
use crate::infra::http::client::HttpAnalyticsApi;
use crate::infra::import::csv::LocalDataDir;
use crate::infra::postgrest::repo::PostgrestReportRepo;
use crate::infra::sqlite::repo::SqliteReportRepo;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::nav::NavBar;
use crate::ui::pages::auctions::AuctionsPage;
use crate::ui::pages::board_page::BoardPage;
use crate::ui::pages::home::HomePage;
use crate::ui::pages::jockeys::JockeysPage;
use crate::ui::state::app_state::{AppServices, Navigation};
use crate::ui::style::{error_box_style, page_style, root_container_style};
use crate::usecase::ports::datasource::DatasetSource;
use crate::usecase::ports::repo::ReportRepository;
use crate::usecase::services::dataset_service::DatasetService;
use crate::usecase::services::report_service::ReportService;

/// Wires the configured adapters into the two services the views use.
pub fn build_services(config: &AppConfig) -> Result<AppServices> {
    let repo: Arc<dyn ReportRepository> = match &config.supabase {
        Some(supabase) => {
            tracing::info!(url = %supabase.url, "reports stored in remote table");
            Arc::new(PostgrestReportRepo::new(
                supabase.url.clone(),
                supabase.key.clone(),
                config.http_timeout(),
            ))
        }
        None => {
            let db_path = config.resolve_db_path()?;
            tracing::info!(path = %db_path.display(), "reports stored in local database");
            Arc::new(SqliteReportRepo { db_path })
        }
    };

    let api = Arc::new(HttpAnalyticsApi::new(
        config.api_base_url.clone(),
        config.jockey_url(),
    ));
    let source: Arc<dyn DatasetSource> = match &config.data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "datasets read from local directory");
            Arc::new(LocalDataDir::new(dir.clone()))
        }
        None => api.clone(),
    };

    Ok(AppServices {
        reports: Arc::new(ReportService::new(repo)),
        datasets: Arc::new(DatasetService::new(source, api)),
    })
}

#[component]
pub fn App() -> Element {
    let started = use_hook(|| {
        AppConfig::load()
            .and_then(|config| Ok((build_services(&config)?, config.start_section())))
            .map_err(|err| format!("{err:#}"))
    });
    let start = started.as_ref().map(|(_, start)| *start).unwrap_or_default();
    let section = use_signal(|| start);
    use_context_provider(|| Navigation { section });

    let services = match started {
        Ok((services, _)) => services,
        Err(message) => {
            tracing::error!(%message, "failed to start");
            return rsx! {
                div { style: "{root_container_style()}",
                    div { style: "{page_style()}",
                        div { style: "{error_box_style()}", "Failed to start: {message}" }
                    }
                }
            };
        }
    };
    use_context_provider(|| services.clone());

    let reports = services.reports.clone();
    let init = use_resource(move || {
        let reports = reports.clone();
        async move { run_blocking(move || reports.init()).await.map_err(|err| format!("{err:#}")) }
    });

    let current = section();
    let body = match init.cloned() {
        None => rsx! { p { style: "color: #9ca3af;", "Opening report store..." } },
        Some(Err(message)) => rsx! {
            div { style: "{error_box_style()}", "Failed to open the report store: {message}" }
        },
        Some(Ok(())) => match current {
            Section::Home => rsx! { HomePage {} },
            Section::Auctions => rsx! { AuctionsPage {} },
            Section::Jockeys => rsx! { JockeysPage {} },
            other => rsx! { BoardPage { key: "{other.path()}", section: other } },
        },
    };

    rsx! {
        div { style: "{root_container_style()}",
            NavBar {}
            main { style: "{page_style()}", {body} }
        }
    }
}
