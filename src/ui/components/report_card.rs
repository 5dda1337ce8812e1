use dioxus::prelude::*;

use crate::domain::entities::report::{Category, Report};
use crate::ui::style::{badge_style, button_style, card_style};

fn category_color(category: Category) -> &'static str {
    match category {
        Category::Reports => "#93c5fd",
        Category::Tables => "#86efac",
        Category::Analysis => "#fcd34d",
        Category::Proposals => "#f9a8d4",
        Category::Auctions => "#c4b5fd",
    }
}

#[component]
pub fn ReportCard(
    report: Report,
    busy: bool,
    on_edit: EventHandler<Report>,
    on_delete: EventHandler<Report>,
) -> Element {
    let created = report
        .created_at
        .map(|at| at.format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    let for_edit = report.clone();
    let for_delete = report.clone();

    rsx! {
        div { style: "{card_style()}",
            div { style: "display: flex; justify-content: space-between; gap: 8px;",
                span { style: "{badge_style(category_color(report.category))}", "{report.category.label()}" }
                span { style: "font-size: 12px; color: #9ca3af;", "{created}" }
            }
            a {
                href: "{report.url}",
                target: "_blank",
                style: "color: #f3f4f6; font-size: 16px; text-decoration: none;",
                "{report.title}"
            }
            if let Some(criador) = report.criador.as_deref() {
                span { style: "font-size: 12px; color: #9ca3af;", "{criador}" }
            }
            div { style: "display: flex; gap: 8px; margin-top: auto;",
                button {
                    style: "{button_style(false)}",
                    disabled: busy,
                    onclick: move |_| on_edit.call(for_edit.clone()),
                    "Edit"
                }
                button {
                    style: "{button_style(false)}",
                    disabled: busy,
                    onclick: move |_| on_delete.call(for_delete.clone()),
                    "Delete"
                }
            }
        }
    }
}

#[component]
pub fn PinnedCard(title: &'static str, url: &'static str) -> Element {
    rsx! {
        div { style: "{card_style()} border-color: #64ffda;",
            span { style: "{badge_style(\"#64ffda\")}", "Pinned" }
            a {
                href: "{url}",
                target: "_blank",
                style: "color: #f3f4f6; font-size: 16px; text-decoration: none;",
                "{title}"
            }
        }
    }
}
