use dioxus::prelude::*;

use crate::domain::catalog::Section;
use crate::ui::state::app_state::Navigation;
use crate::ui::style::{card_grid_style, card_style, page_title_style};

fn blurb(section: Section) -> &'static str {
    match section {
        Section::Auctions => "Dams, horses and past auction results with AI plots.",
        Section::Sires => "Sire reports and tables.",
        Section::Breeders => "Breeder overview and per-breeder reports.",
        Section::Jockeys => "Jockey reports and win-share analytics.",
        Section::Trainers => "Trainer reports.",
        Section::Foals => "Stakes winners updates by breeder.",
        Section::Dams => "Dam reports.",
        _ => "",
    }
}

#[component]
pub fn HomePage() -> Element {
    let Navigation { mut section } = use_context::<Navigation>();

    rsx! {
        h1 { style: "{page_title_style()}", "{Section::Home.title()}" }
        div { style: "{card_grid_style()}",
            for target in Section::TOP_LEVEL {
                div {
                    style: "{card_style()} cursor: pointer;",
                    onclick: move |_| section.set(target),
                    h2 { style: "margin: 0; font-weight: 300;", "{target.title()}" }
                    p { style: "margin: 0; color: #9ca3af; font-size: 14px;", "{blurb(target)}" }
                }
            }
        }
    }
}
