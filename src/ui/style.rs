//! Inline style strings shared by the views.

use crate::domain::entities::column::{ColumnSpec, Tone};
use crate::domain::grid::gradient::gradient_background;

pub const ACCENT: &str = "#64ffda";

pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; background: #0a192f; color: #e5e7eb; font-family: system-ui, sans-serif;"
}

pub fn nav_bar_style() -> &'static str {
    "display: flex; align-items: center; gap: 16px; padding: 12px 24px; border-bottom: 1px solid #233554; flex-wrap: wrap;"
}

pub fn nav_link_style(active: bool) -> String {
    let color = if active { ACCENT } else { "#9ca3af" };
    format!("background: none; border: none; cursor: pointer; font-size: 14px; color: {color}; padding: 4px 0;")
}

pub fn page_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; padding: 24px 32px;"
}

pub fn page_title_style() -> &'static str {
    "font-size: 40px; font-weight: 300; margin: 0 0 32px 0; color: #f3f4f6;"
}

pub fn card_style() -> &'static str {
    "background: rgba(255,255,255,0.04); border: 1px solid #233554; border-radius: 8px; padding: 16px; display: flex; flex-direction: column; gap: 8px;"
}

pub fn card_grid_style() -> &'static str {
    "display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 16px;"
}

pub fn badge_style(background: &str) -> String {
    format!("display: inline-block; padding: 2px 8px; border-radius: 999px; font-size: 11px; background: {background}; color: #0a192f;")
}

pub fn button_style(primary: bool) -> &'static str {
    if primary {
        "border: 1px solid #64ffda; background: #64ffda; color: #0a192f; padding: 6px 14px; border-radius: 6px; cursor: pointer;"
    } else {
        "border: 1px solid #233554; background: transparent; color: #e5e7eb; padding: 6px 14px; border-radius: 6px; cursor: pointer;"
    }
}

pub fn input_style() -> &'static str {
    "border: 1px solid #233554; background: rgba(255,255,255,0.05); color: #e5e7eb; padding: 6px 10px; border-radius: 6px;"
}

pub fn tab_style(active: bool) -> &'static str {
    if active {
        "padding: 8px 16px; border: none; border-bottom: 2px solid #64ffda; background: none; color: #64ffda; cursor: pointer;"
    } else {
        "padding: 8px 16px; border: none; border-bottom: 2px solid transparent; background: none; color: #9ca3af; cursor: pointer;"
    }
}

pub fn error_box_style() -> &'static str {
    "padding: 12px; border: 1px solid rgba(239,68,68,0.3); background: rgba(239,68,68,0.1); color: #f87171; border-radius: 6px;"
}

pub fn modal_backdrop_style() -> &'static str {
    "position: fixed; inset: 0; background: rgba(0,0,0,0.6); display: flex; align-items: center; justify-content: center; z-index: 1000;"
}

pub fn modal_style() -> &'static str {
    "background: #112240; border: 1px solid #233554; border-radius: 10px; padding: 24px; width: 440px; display: flex; flex-direction: column; gap: 12px;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; max-height: calc(100vh - 300px); background: #fff; color: #1f2937;"
}

pub fn table_style() -> &'static str {
    "width: 100%; border-collapse: collapse; font-size: 10px; line-height: 1.2;"
}

pub fn group_header_style(tone: Tone) -> String {
    format!(
        "background: {}; text-align: center; border: 1px solid #d1d5db; padding: 4px 8px; position: sticky; top: 0; z-index: 2;",
        tone.css()
    )
}

pub fn column_header_style(column: &ColumnSpec) -> String {
    let background = match column.tone {
        Tone::Plain => "#ffffff",
        tone => tone.css(),
    };
    format!(
        "background: {background}; min-width: {}px; border: 1px solid #e5e7eb; padding: 4px 8px; text-align: center; vertical-align: bottom; cursor: pointer; position: sticky; top: 22px; z-index: 1;",
        column.min_width
    )
}

pub fn body_cell_style(column: &ColumnSpec, intensity: Option<f64>) -> String {
    let shade = intensity.map(gradient_background).unwrap_or_default();
    format!(
        "min-width: {}px; padding: 4px 8px; text-align: center; white-space: nowrap; {shade}",
        column.min_width
    )
}

pub fn row_style(index: usize) -> &'static str {
    if index % 2 == 0 {
        "background: #ffffff;"
    } else {
        "background: #f9fafb;"
    }
}

pub fn gap_color(value: f64) -> &'static str {
    if value >= 0.0 {
        "#4ade80"
    } else {
        "#f87171"
    }
}
