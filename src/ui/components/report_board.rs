use chrono::NaiveDate;
use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::domain::catalog::BoardSpec;
use crate::domain::entities::report::{
    Category, Report, ReportDraft, ReportForm, ReportId, ReportPatch,
};
use crate::domain::entities::report_filter::{category_options, ReportFilter, KNOWN_CRIADORES};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::report_card::{PinnedCard, ReportCard};
use crate::ui::components::report_modal::ReportModal;
use crate::ui::state::app_state::{AppServices, ModalMode, ReportBoardState};
use crate::ui::style::{button_style, card_grid_style, error_box_style, input_style};
use crate::usecase::services::report_service::ReportListState;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

enum Mutation {
    Create(ReportDraft),
    Update(ReportId, ReportPatch),
}

fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT).ok()
}

fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// Lists, filters and edits the reports of one location partition.
#[component]
pub fn ReportBoard(spec: BoardSpec) -> Element {
    let services = use_context::<AppServices>();
    let ReportBoardState {
        mut reports,
        mut reload,
        mut filter,
        mut modal,
        mut form_error,
        mut action_error,
        mut busy,
    } = ReportBoardState::new();

    let loader_service = services.reports.clone();
    let _loader = use_resource(move || {
        let service = loader_service.clone();
        let _generation = reload();
        async move {
            reports.set(ReportListState::Loading);
            let result = run_blocking(move || service.list(spec.location, spec.criador)).await;
            if let Err(err) = &result {
                tracing::error!(location = spec.location, "failed to load reports: {err:#}");
            }
            reports.set(ReportListState::from_result(result));
        }
    });

    let submit_service = services.reports.clone();
    let on_submit = move |form: ReportForm| {
        let Some(mode) = modal() else {
            return;
        };
        let service = submit_service.clone();
        let pending = match &mode {
            ModalMode::Add => form
                .to_draft(spec.location, spec.criador)
                .map(Mutation::Create),
            ModalMode::Edit(report) => form
                .to_patch(spec.criador)
                .map(|patch| Mutation::Update(report.id.clone(), patch)),
        };
        let mutation = match pending {
            Ok(mutation) => mutation,
            Err(err) => {
                form_error.set(Some(err.to_string()));
                return;
            }
        };
        busy.set(true);
        spawn(async move {
            let outcome = match mutation {
                Mutation::Create(draft) => run_blocking(move || service.create(draft))
                    .await
                    .map(|report| reports.write().apply_created(report)),
                Mutation::Update(id, patch) => run_blocking(move || service.update(&id, patch))
                    .await
                    .map(|report| reports.write().apply_updated(report)),
            };
            match outcome {
                Ok(()) => {
                    modal.set(None);
                    form_error.set(None);
                }
                Err(err) => form_error.set(Some(format!("{err:#}"))),
            }
            busy.set(false);
        });
    };

    let delete_service = services.reports.clone();
    let on_delete = move |report: Report| {
        let confirm = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Delete report")
            .set_description(format!("Delete \"{}\"?", report.title))
            .set_buttons(MessageButtons::YesNo)
            .show();
        if confirm != MessageDialogResult::Yes {
            return;
        }
        let service = delete_service.clone();
        busy.set(true);
        spawn(async move {
            let id = report.id.clone();
            let target = id.clone();
            match run_blocking(move || service.delete(&target)).await {
                Ok(()) => {
                    reports.write().apply_deleted(&id);
                    action_error.set(None);
                }
                Err(err) => action_error.set(Some(format!("Failed to delete report: {err:#}"))),
            }
            busy.set(false);
        });
    };

    let list = reports();
    let current_filter = filter();
    let categories = category_options(list.reports());
    let visible: Vec<Report> = current_filter
        .apply(list.reports())
        .into_iter()
        .cloned()
        .collect();
    let nothing_visible = visible.is_empty();
    let is_busy = busy();
    let can_add = list.accepts_changes();
    let selected_category = current_filter
        .category
        .map(|category| category.as_str().to_string())
        .unwrap_or_else(|| "all".to_string());

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 16px;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h2 { style: "margin: 0; font-weight: 300;", "{spec.title}" }
                button {
                    style: "{button_style(true)}",
                    disabled: is_busy || !can_add,
                    onclick: move |_| {
                        form_error.set(None);
                        modal.set(Some(ModalMode::Add));
                    },
                    "Add Report"
                }
            }

            div { style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center;",
                input {
                    style: "{input_style()} width: 220px;",
                    placeholder: "Search by title",
                    value: "{current_filter.search}",
                    oninput: move |event| filter.write().search = event.value(),
                }
                if spec.category_filter {
                    select {
                        style: "{input_style()}",
                        value: "{selected_category}",
                        onchange: move |event| {
                            filter.write().category = event.value().parse::<Category>().ok();
                        },
                        option { value: "all", "All categories" }
                        for category in categories {
                            option {
                                value: "{category.as_str()}",
                                selected: current_filter.category == Some(category),
                                "{category.label()}"
                            }
                        }
                    }
                }
                if spec.date_filter {
                    label { style: "font-size: 12px; color: #9ca3af;", "From" }
                    input {
                        style: "{input_style()}",
                        r#type: "date",
                        value: "{date_input_value(current_filter.from)}",
                        oninput: move |event| filter.write().from = parse_date_input(&event.value()),
                    }
                    label { style: "font-size: 12px; color: #9ca3af;", "To" }
                    input {
                        style: "{input_style()}",
                        r#type: "date",
                        value: "{date_input_value(current_filter.to)}",
                        oninput: move |event| filter.write().to = parse_date_input(&event.value()),
                    }
                }
                if current_filter.is_active() {
                    button {
                        style: "{button_style(false)}",
                        onclick: move |_| filter.set(ReportFilter::default()),
                        "Clear filters"
                    }
                }
            }

            if spec.criador_filter {
                div { style: "display: flex; flex-wrap: wrap; gap: 6px 14px;",
                    for criador in KNOWN_CRIADORES {
                        label { style: "display: flex; align-items: center; gap: 4px; font-size: 12px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: current_filter.criadores.iter().any(|c| c == criador),
                                onclick: move |_| filter.write().toggle_criador(criador),
                            }
                            "{criador}"
                        }
                    }
                }
            }

            if let Some(message) = action_error() {
                div { style: "{error_box_style()}", "{message}" }
            }

            {match list {
                ReportListState::Loading => rsx! {
                    p { style: "color: #9ca3af;", "Loading reports..." }
                },
                ReportListState::Error(message) => rsx! {
                    div { style: "{error_box_style()}",
                        "Failed to load reports: {message}"
                        button {
                            style: "{button_style(false)} margin-left: 12px;",
                            onclick: move |_| *reload.write() += 1,
                            "Retry"
                        }
                    }
                },
                ReportListState::Ready(_) => rsx! {
                    div { style: "{card_grid_style()}",
                        for link in spec.pinned {
                            PinnedCard { key: "{link.url}", title: link.title, url: link.url }
                        }
                        for report in visible {
                            ReportCard {
                                key: "{report.id}",
                                report,
                                busy: is_busy,
                                on_edit: move |report: Report| {
                                    form_error.set(None);
                                    modal.set(Some(ModalMode::Edit(report)));
                                },
                                on_delete: on_delete.clone(),
                            }
                        }
                    }
                    if nothing_visible {
                        p { style: "color: #9ca3af;", "No reports found." }
                    }
                },
            }}

            if let Some(mode) = modal() {
                ReportModal {
                    key: "{modal_key(&mode)}",
                    mode,
                    pinned_criador: spec.criador,
                    error: form_error(),
                    busy: is_busy,
                    on_submit: on_submit.clone(),
                    on_close: move |_| {
                        modal.set(None);
                        form_error.set(None);
                    },
                }
            }
        }
    }
}

fn modal_key(mode: &ModalMode) -> String {
    match mode {
        ModalMode::Add => "add".to_string(),
        ModalMode::Edit(report) => format!("edit-{}", report.id),
    }
}
