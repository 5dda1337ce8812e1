use dioxus::prelude::*;

use crate::domain::catalog::Section;
use crate::ui::state::app_state::Navigation;
use crate::ui::style::{nav_bar_style, nav_link_style, ACCENT};

fn is_within(current: Section, target: Section) -> bool {
    current == target || (current.parent() == Some(target) && target != Section::Home)
}

#[component]
pub fn NavBar() -> Element {
    let Navigation { mut section } = use_context::<Navigation>();
    let current = section();

    rsx! {
        nav { style: "{nav_bar_style()}",
            button {
                style: "background: none; border: none; cursor: pointer; font-size: 18px; color: {ACCENT}; margin-right: 16px;",
                onclick: move |_| section.set(Section::Home),
                "Move37"
            }
            for target in Section::TOP_LEVEL {
                button {
                    style: "{nav_link_style(is_within(current, target))}",
                    title: "{target.path()}",
                    onclick: move |_| section.set(target),
                    "{target.title()}"
                }
            }
        }
    }
}

/// Back link to the parent section, if any.
#[component]
pub fn BackLink() -> Element {
    let Navigation { mut section } = use_context::<Navigation>();
    let Some(parent) = section().parent() else {
        return rsx! {};
    };

    rsx! {
        button {
            style: "background: none; border: none; cursor: pointer; color: #9ca3af; padding: 0; margin-bottom: 16px;",
            onclick: move |_| section.set(parent),
            "← {parent.title()}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::BREEDER_PAGES;

    #[test]
    fn breeder_pages_highlight_the_breeders_link() {
        let page = Section::Breeder(BREEDER_PAGES[0]);
        assert!(is_within(page, Section::Breeders));
        assert!(is_within(Section::Dams, Section::Dams));
        assert!(!is_within(Section::Dams, Section::Home));
    }
}
