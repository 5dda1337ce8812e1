use dioxus::prelude::*;

use crate::domain::catalog::{Section, BREEDER_PAGES};
use crate::ui::components::nav::BackLink;
use crate::ui::components::report_board::ReportBoard;
use crate::ui::state::app_state::Navigation;
use crate::ui::style::{button_style, page_title_style};

/// Any section whose body is a single report board.
#[component]
pub fn BoardPage(section: Section) -> Element {
    let Some(spec) = section.board() else {
        return rsx! {};
    };

    rsx! {
        BackLink {}
        h1 { style: "{page_title_style()}", "{section.title()}" }
        if section == Section::Breeders {
            BreederLinks {}
        }
        ReportBoard { key: "{spec.location}", spec }
    }
}

#[component]
fn BreederLinks() -> Element {
    let Navigation { mut section } = use_context::<Navigation>();

    rsx! {
        div { style: "display: flex; flex-wrap: wrap; gap: 8px; margin-bottom: 24px;",
            for page in BREEDER_PAGES {
                button {
                    style: "{button_style(false)}",
                    onclick: move |_| section.set(Section::Breeder(page)),
                    "{page.name}"
                }
            }
        }
    }
}
