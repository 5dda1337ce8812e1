use dioxus::prelude::*;

use crate::domain::entities::report::{Category, ReportForm};
use crate::ui::state::app_state::ModalMode;
use crate::ui::style::{button_style, error_box_style, input_style, modal_backdrop_style, modal_style};

/// Add/edit dialog. The board owns validation and persistence; this only
/// collects the raw form.
#[component]
pub fn ReportModal(
    mode: ModalMode,
    pinned_criador: Option<&'static str>,
    error: Option<String>,
    busy: bool,
    on_submit: EventHandler<ReportForm>,
    on_close: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| match &mode {
        ModalMode::Add => ReportForm {
            criador: pinned_criador.unwrap_or_default().to_string(),
            ..ReportForm::default()
        },
        ModalMode::Edit(report) => ReportForm::from_report(report),
    });
    let heading = match mode {
        ModalMode::Add => "Add Report",
        ModalMode::Edit(_) => "Edit Report",
    };
    let current = form();

    rsx! {
        div { style: "{modal_backdrop_style()}",
            onclick: move |_| on_close.call(()),
            div { style: "{modal_style()}",
                onclick: move |event| event.stop_propagation(),
                h2 { style: "margin: 0; font-weight: 400;", "{heading}" }

                label { "Title" }
                input {
                    style: "{input_style()}",
                    value: "{current.title}",
                    oninput: move |event| form.write().title = event.value(),
                }

                label { "URL" }
                input {
                    style: "{input_style()}",
                    r#type: "url",
                    value: "{current.url}",
                    oninput: move |event| form.write().url = event.value(),
                }

                label { "Category" }
                select {
                    style: "{input_style()}",
                    value: "{current.category}",
                    onchange: move |event| form.write().category = event.value(),
                    option { value: "", "Select a category" }
                    for category in Category::ALL {
                        option {
                            value: "{category.as_str()}",
                            selected: current.category == category.as_str(),
                            "{category.label()}"
                        }
                    }
                }

                if pinned_criador.is_none() {
                    label { "Criador" }
                    input {
                        style: "{input_style()}",
                        value: "{current.criador}",
                        oninput: move |event| form.write().criador = event.value(),
                    }
                }

                if let Some(message) = error {
                    div { style: "{error_box_style()}", "{message}" }
                }

                div { style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        style: "{button_style(false)}",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        style: "{button_style(true)}",
                        disabled: busy,
                        onclick: move |_| on_submit.call(form()),
                        if busy { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}
