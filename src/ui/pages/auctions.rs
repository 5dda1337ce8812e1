use dioxus::prelude::*;

use crate::domain::catalog::{DatasetKind, Section};
use crate::domain::entities::plot::PlotSpec;
use crate::domain::grid::GridData;
use crate::ui::components::data_grid::DataGrid;
use crate::ui::components::nav::BackLink;
use crate::ui::state::app_state::AppServices;
use crate::ui::style::{button_style, error_box_style, input_style, page_title_style, tab_style};
use crate::usecase::services::dataset_service::AuctionBundle;

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PLOT_ELEMENT_ID: &str = "plot-area";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuctionTab {
    Table(DatasetKind),
    Plot,
}

impl AuctionTab {
    const ALL: [AuctionTab; 4] = [
        AuctionTab::Table(DatasetKind::Dams),
        AuctionTab::Table(DatasetKind::Horses),
        AuctionTab::Table(DatasetKind::PastAuctions),
        AuctionTab::Plot,
    ];

    fn label(self) -> &'static str {
        match self {
            AuctionTab::Table(DatasetKind::Dams) => "Dams",
            AuctionTab::Table(DatasetKind::Horses) => "Horses",
            AuctionTab::Table(DatasetKind::PastAuctions) => "Past Auctions",
            AuctionTab::Plot => "AI Plot",
        }
    }
}

/// Grid-ready copies of the three auction tables.
#[derive(Debug, Clone, PartialEq)]
struct AuctionGrids {
    dams: GridData,
    horses: GridData,
    past_auctions: GridData,
}

impl AuctionGrids {
    fn from_bundle(bundle: AuctionBundle) -> Self {
        Self {
            dams: GridData::new(DatasetKind::Dams.schema(), bundle.dams),
            horses: GridData::new(DatasetKind::Horses.schema(), bundle.horses),
            past_auctions: GridData::new(DatasetKind::PastAuctions.schema(), bundle.past_auctions),
        }
    }

    fn get(&self, kind: DatasetKind) -> GridData {
        match kind {
            DatasetKind::Dams => self.dams.clone(),
            DatasetKind::Horses => self.horses.clone(),
            DatasetKind::PastAuctions => self.past_auctions.clone(),
        }
    }
}

#[component]
pub fn AuctionsPage() -> Element {
    let services = use_context::<AppServices>();
    let mut tab = use_signal(|| AuctionTab::Table(DatasetKind::Dams));

    let datasets = services.datasets.clone();
    let grids = use_resource(move || {
        let datasets = datasets.clone();
        async move {
            datasets
                .load_auctions()
                .await
                .map(AuctionGrids::from_bundle)
                .ok()
        }
    });

    let active = tab();
    let body = match (active, grids.cloned()) {
        (AuctionTab::Plot, _) => rsx! { PlotPanel {} },
        (_, None) => rsx! { p { style: "color: #9ca3af;", "Loading data..." } },
        // Already logged by the service; the tables stay empty.
        (_, Some(None)) => rsx! {},
        (AuctionTab::Table(kind), Some(Some(grids))) => rsx! {
            h2 { style: "font-weight: 300;", "{kind.title()}" }
            DataGrid { key: "{kind.slug()}", kind, data: grids.get(kind) }
        },
    };

    rsx! {
        BackLink {}
        h1 { style: "{page_title_style()}", "{Section::Auctions.title()}" }
        div { style: "display: flex; gap: 4px; border-bottom: 1px solid #233554; margin-bottom: 16px;",
            for candidate in AuctionTab::ALL {
                button {
                    style: "{tab_style(candidate == active)}",
                    onclick: move |_| tab.set(candidate),
                    "{candidate.label()}"
                }
            }
        }
        {body}
    }
}

#[component]
fn PlotPanel() -> Element {
    let services = use_context::<AppServices>();
    let mut prompt = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let on_generate = move |_| {
        let text = prompt();
        if text.trim().is_empty() {
            return;
        }
        let datasets = services.datasets.clone();
        loading.set(true);
        error.set(None);
        spawn(async move {
            match datasets.generate_plot(&text).await {
                Ok(spec) => {
                    if let Err(err) = render(&spec).await {
                        tracing::warn!(%err, "plot rendering failed");
                        error.set(Some(err));
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "plot generation failed");
                    error.set(Some(err.to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        document::Script { src: PLOTLY_SRC }
        div { style: "display: flex; flex-direction: column; gap: 12px;",
            textarea {
                style: "{input_style()} min-height: 80px;",
                placeholder: "Describe the chart you want, e.g. average price by sire",
                value: "{prompt}",
                oninput: move |event| prompt.set(event.value()),
            }
            div {
                button {
                    style: "{button_style(true)}",
                    disabled: loading() || prompt().trim().is_empty(),
                    onclick: on_generate,
                    if loading() { "Generating..." } else { "Generate Plot" }
                }
            }
            if let Some(message) = error() {
                div { style: "{error_box_style()}", "{message}" }
            }
            div {
                id: PLOT_ELEMENT_ID,
                style: "min-height: 480px; background: #fff; border-radius: 8px;",
            }
        }
    }
}

async fn render(spec: &PlotSpec) -> Result<(), String> {
    let script = spec
        .render_script(PLOT_ELEMENT_ID)
        .map_err(|err| format!("Invalid plot data: {err}"))?;
    document::eval(&script)
        .await
        .map_err(|err| format!("Failed to draw plot: {err}"))?;
    Ok(())
}
