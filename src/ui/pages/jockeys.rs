use std::sync::Arc;

use dioxus::prelude::*;

use crate::domain::catalog::Section;
use crate::domain::entities::jockey::{
    format_count, pct, pp, signed, BreakdownEntry, ChartPoint, ComboEntry, Jockey, JockeyData,
    ViewWindow,
};
use crate::ui::components::nav::BackLink;
use crate::ui::components::report_board::ReportBoard;
use crate::ui::state::app_state::AppServices;
use crate::ui::style::{card_style, error_box_style, gap_color, input_style, page_title_style, tab_style};

const COMBO_ROWS: usize = 6;
const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JockeyTab {
    Reports,
    Analytics,
}

#[component]
pub fn JockeysPage() -> Element {
    let mut tab = use_signal(|| JockeyTab::Reports);
    let active = tab();

    rsx! {
        BackLink {}
        h1 { style: "{page_title_style()}", "{Section::Jockeys.title()}" }
        div { style: "display: flex; gap: 4px; border-bottom: 1px solid #233554; margin-bottom: 16px;",
            button {
                style: "{tab_style(active == JockeyTab::Reports)}",
                onclick: move |_| tab.set(JockeyTab::Reports),
                "Reports"
            }
            button {
                style: "{tab_style(active == JockeyTab::Analytics)}",
                onclick: move |_| tab.set(JockeyTab::Analytics),
                "Analytics"
            }
        }
        {match active {
            JockeyTab::Reports => rsx! {
                if let Some(spec) = Section::Jockeys.board() {
                    ReportBoard { key: "{spec.location}", spec }
                }
            },
            JockeyTab::Analytics => rsx! { JockeyAnalytics {} },
        }}
    }
}

#[component]
fn JockeyAnalytics() -> Element {
    let services = use_context::<AppServices>();
    let mut search = use_signal(String::new);
    let mut selected = use_signal(|| None::<i64>);
    let mut window = use_signal(ViewWindow::default);

    let datasets = services.datasets.clone();
    let data = use_resource(move || {
        let datasets = datasets.clone();
        async move {
            datasets
                .load_jockey_analytics()
                .await
                .map(Arc::new)
                .map_err(|err| err.to_string())
        }
    });

    let data: Arc<JockeyData> = match data.cloned() {
        None => return rsx! { p { style: "color: #9ca3af;", "Loading jockey analytics..." } },
        Some(Err(message)) => {
            return rsx! {
                div { style: "{error_box_style()}", "Failed to load jockey analytics: {message}" }
            }
        }
        Some(Ok(data)) => data,
    };

    let term = search();
    let matches: Vec<Jockey> = data.search(&term).into_iter().cloned().collect();
    let chosen = selected()
        .and_then(|id| data.find(id))
        .or_else(|| data.jockeys.first())
        .cloned();
    let chosen_id = chosen.as_ref().map(|jockey| jockey.id);
    let view_window = window();

    rsx! {
        p { style: "font-size: 12px; color: #9ca3af;",
            "{format_count(data.metadata.num_jockeys)} jockeys, exported {data.metadata.export_date}"
        }
        div { style: "display: flex; gap: 24px; align-items: flex-start;",
            aside { style: "width: 260px; flex-shrink: 0; display: flex; flex-direction: column; gap: 8px;",
                input {
                    style: "{input_style()}",
                    placeholder: "Search jockey",
                    value: "{term}",
                    oninput: move |event| search.set(event.value()),
                }
                div { style: "max-height: calc(100vh - 320px); overflow-y: auto; display: flex; flex-direction: column;",
                    for jockey in matches {
                        button {
                            key: "{jockey.id}",
                            style: "{sidebar_item_style(Some(jockey.id) == chosen_id)}",
                            onclick: move |_| selected.set(Some(jockey.id)),
                            span { style: "color: #9ca3af; margin-right: 6px;", "#{jockey.rank}" }
                            "{jockey.surname} "
                            span { style: "font-size: 11px;", "{pct(jockey.win_share(ViewWindow::L200))} " }
                            span { style: "font-size: 11px; color: {gap_color(jockey.gap(ViewWindow::L200))};",
                                "{pp(jockey.gap(ViewWindow::L200))}"
                            }
                        }
                    }
                }
            }
            div { style: "flex: 1; min-width: 0; display: flex; flex-direction: column; gap: 16px;",
                if let Some(jockey) = chosen {
                    div { style: "display: flex; gap: 4px;",
                        for candidate in ViewWindow::ALL {
                            button {
                                style: "{tab_style(candidate == view_window)}",
                                onclick: move |_| window.set(candidate),
                                "{candidate.label()}"
                            }
                        }
                    }
                    JockeyDetail { jockey, window: view_window }
                } else {
                    p { style: "color: #9ca3af;", "No jockeys in this export." }
                }
            }
        }
    }
}

fn sidebar_item_style(selected: bool) -> String {
    let background = if selected {
        "rgba(100,255,218,0.12)"
    } else {
        "transparent"
    };
    format!("text-align: left; border: none; padding: 6px 8px; cursor: pointer; background: {background}; color: #e5e7eb;")
}

#[component]
fn StatCard(label: &'static str, value: String, color: Option<&'static str>) -> Element {
    let color = color.unwrap_or("#f3f4f6");
    rsx! {
        div { style: "{card_style()} min-width: 140px;",
            span { style: "font-size: 11px; color: #9ca3af; text-transform: uppercase;", "{label}" }
            span { style: "font-size: 22px; color: {color};", "{value}" }
        }
    }
}

#[component]
fn JockeyDetail(jockey: Jockey, window: ViewWindow) -> Element {
    let gap = jockey.gap(window);
    let points = jockey.chart_points();

    rsx! {
        h2 { style: "margin: 0; font-weight: 300;", "{jockey.name}" }
        div { style: "display: flex; flex-wrap: wrap; gap: 12px;",
            StatCard { label: "Rank", value: format!("#{}", jockey.rank), color: None }
            StatCard { label: "Win share", value: pct(jockey.win_share(window)), color: None }
            StatCard { label: "Implied prob.", value: pct(jockey.implied_prob(window)), color: None }
            StatCard { label: "Gap", value: pp(gap), color: Some(gap_color(gap)) }
            StatCard { label: "Races (6m)", value: format_count(jockey.races_l6m), color: None }
            StatCard { label: "Total races", value: format_count(jockey.total_races), color: None }
            StatCard { label: "HRR L50", value: format!("{:.2}", jockey.hrr.l50), color: None }
            StatCard { label: "HRR L200", value: format!("{:.2}", jockey.hrr.l200), color: None }
        }

        if !points.is_empty() {
            TimeSeriesChart { points }
        }

        if jockey.has_breakdowns() {
            div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px;",
                BreakdownTable { title: "Tracks", entries: jockey.tracks.clone(), window }
                BreakdownTable { title: "Surfaces", entries: jockey.surfaces.clone(), window }
                BreakdownTable { title: "Distances", entries: jockey.distances.clone(), window }
            }
        }

        if !jockey.rankings.is_empty() {
            div { style: "{card_style()}",
                h3 { style: "margin: 0; font-weight: 400;", "Rankings by distance" }
                table { style: "width: 100%; font-size: 12px; border-collapse: collapse;",
                    thead {
                        tr {
                            th { style: "text-align: left;", "Distance" }
                            th { "Rank" }
                            th { "Win share" }
                            th { "Races" }
                            th { "vs overall" }
                            th { "Gap" }
                        }
                    }
                    tbody {
                        for (distance, entry) in jockey.rankings.iter() {
                            tr {
                                td { "{distance}" }
                                td { style: "text-align: center;", "#{entry.rank}" }
                                td { style: "text-align: center;", "{pct(entry.ws_in_dist)}" }
                                td { style: "text-align: center;", "{format_count(entry.races)}" }
                                td { style: "text-align: center; color: {gap_color(entry.ws_diff_vs_overall)};", "{pp(entry.ws_diff_vs_overall)}" }
                                td { style: "text-align: center; color: {gap_color(entry.gap_to_implied)};", "{pp(entry.gap_to_implied)}" }
                            }
                        }
                    }
                }
            }
        }

        if !jockey.combos.is_empty() {
            div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 16px;",
                ComboTable { title: "Trainers", entries: jockey.combos.trainers.clone() }
                ComboTable { title: "Sires", entries: jockey.combos.sires.clone() }
                ComboTable { title: "Stables", entries: jockey.combos.stables.clone() }
            }
        }

        div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px;",
            if let Some(quality) = jockey.horse_quality.clone() {
                div { style: "{card_style()}",
                    h3 { style: "margin: 0; font-weight: 400;", "Horse quality" }
                    span { "Avg. quality {quality.avg_quality:.1} {percentile(quality.quality_pctile)}" }
                    span { "Avg. age {quality.avg_age:.1} {percentile(quality.age_pctile)}" }
                    span { "Avg. distance {format_count(quality.avg_distance)}m {percentile(quality.distance_pctile)}" }
                }
            }
            if let Some(improvement) = jockey.improvement.clone() {
                div { style: "{card_style()}",
                    h3 { style: "margin: 0; font-weight: 400;", "Improvement" }
                    span {
                        "Ratio "
                        {improvement.ratio.map(|ratio| format!("{ratio:.2}")).unwrap_or_else(|| "-".to_string())}
                    }
                    span { "New horses received {format_count(improvement.new_horses_received)}" }
                    span { "Share of new horses {pct(improvement.share_new_horses)}" }
                }
            }
            if let Some(estado) = jockey.estado.clone() {
                div { style: "{card_style()}",
                    h3 { style: "margin: 0; font-weight: 400;", "Track condition" }
                    span { "Normal: {pct(estado.normal_ws_l200)} L200 / {pct(estado.normal_ws_hist)} hist" }
                    span { "Not normal: {pct(estado.not_normal_ws_l200)} L200 / {pct(estado.not_normal_ws_hist)} hist" }
                }
            }
        }
    }
}

fn percentile(value: Option<f64>) -> String {
    value
        .map(|p| format!("(p{:.0})", p * 100.0))
        .unwrap_or_default()
}

#[component]
fn BreakdownTable(
    title: &'static str,
    entries: Vec<(String, BreakdownEntry)>,
    window: ViewWindow,
) -> Element {
    if entries.is_empty() {
        return rsx! {};
    }
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "margin: 0; font-weight: 400;", "{title}" }
            table { style: "width: 100%; font-size: 12px; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: "text-align: left;", "" }
                        th { "WS" }
                        th { "IP" }
                        th { "Gap" }
                        th { "Races" }
                    }
                }
                tbody {
                    for (name, entry) in entries.iter() {
                        {
                            let (ws, ip, races) = entry.for_window(window);
                            rsx! {
                                tr {
                                    td { "{name}" }
                                    td { style: "text-align: center;", "{pct(ws)}" }
                                    td { style: "text-align: center;", "{pct(ip)}" }
                                    td { style: "text-align: center; color: {gap_color(ws - ip)};", "{pp(ws - ip)}" }
                                    td { style: "text-align: center;", "{format_count(races)}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ComboTable(title: &'static str, entries: Vec<ComboEntry>) -> Element {
    if entries.is_empty() {
        return rsx! {};
    }
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "margin: 0; font-weight: 400;", "{title}" }
            table { style: "width: 100%; font-size: 12px; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: "text-align: left;", "Name" }
                        th { "Races" }
                        th { "WS" }
                        th { "Gap" }
                        th { "vs other" }
                        th { "HRR" }
                    }
                }
                tbody {
                    for entry in entries.iter().take(COMBO_ROWS) {
                        tr {
                            td { "{entry.name}" }
                            td { style: "text-align: center;", "{format_count(entry.races)}" }
                            td { style: "text-align: center;", "{pct(entry.ws_combo)}" }
                            td { style: "text-align: center; color: {gap_color(entry.gap_combo)};", "{pp(entry.gap_combo)}" }
                            td { style: "text-align: center; color: {gap_color(entry.ws_combo_vs_other)};", "{pp(entry.ws_combo_vs_other)}" }
                            td { style: "text-align: center;", "{signed(entry.hrr_combo_vs_other)}" }
                        }
                    }
                }
            }
        }
    }
}

/// SVG `points` attribute for a series scaled into the chart box.
fn polyline_points(values: &[f64], ceiling: f64) -> String {
    let ceiling = if ceiling > 0.0 { ceiling } else { 1.0 };
    let step = if values.len() > 1 {
        CHART_WIDTH / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = i as f64 * step;
            let y = CHART_HEIGHT - (value.max(0.0) / ceiling).min(1.0) * CHART_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
fn TimeSeriesChart(points: Vec<ChartPoint>) -> Element {
    let ceiling = points
        .iter()
        .flat_map(|p| [p.win_share, p.implied, p.field_mean, p.field_p90])
        .fold(0.0_f64, f64::max);
    let series: [(&str, &str, Vec<f64>); 4] = [
        ("Win share", "#64ffda", points.iter().map(|p| p.win_share).collect()),
        ("Implied", "#fbbf24", points.iter().map(|p| p.implied).collect()),
        ("Field mean", "#9ca3af", points.iter().map(|p| p.field_mean).collect()),
        ("Field p90", "#f472b6", points.iter().map(|p| p.field_p90).collect()),
    ];
    let first = points.first().map(|p| p.month.clone()).unwrap_or_default();
    let last = points.last().map(|p| p.month.clone()).unwrap_or_default();

    rsx! {
        div { style: "{card_style()}",
            h3 { style: "margin: 0; font-weight: 400;", "L200 win share over time (%)" }
            svg {
                width: "100%",
                view_box: "-4 -4 {CHART_WIDTH + 8.0} {CHART_HEIGHT + 8.0}",
                preserve_aspect_ratio: "none",
                style: "height: 240px;",
                for (_, color, values) in series.iter() {
                    polyline {
                        fill: "none",
                        stroke: "{color}",
                        stroke_width: "2",
                        points: "{polyline_points(values, ceiling)}",
                    }
                }
            }
            div { style: "display: flex; justify-content: space-between; font-size: 11px; color: #9ca3af;",
                span { "{first}" }
                span { "max {ceiling:.1}%" }
                span { "{last}" }
            }
            div { style: "display: flex; gap: 16px; font-size: 11px;",
                for (label, color, _) in series.iter() {
                    span { style: "color: {color};", "● {label}" }
                }
            }
        }
    }
}
