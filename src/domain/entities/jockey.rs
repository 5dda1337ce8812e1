use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Rolling window the detail view reads win shares from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewWindow {
    L100,
    #[default]
    L200,
    L400,
    L500,
    Hist,
}

impl ViewWindow {
    pub const ALL: [ViewWindow; 5] = [
        ViewWindow::L100,
        ViewWindow::L200,
        ViewWindow::L400,
        ViewWindow::L500,
        ViewWindow::Hist,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ViewWindow::L100 => "l100",
            ViewWindow::L200 => "l200",
            ViewWindow::L400 => "l400",
            ViewWindow::L500 => "l500",
            ViewWindow::Hist => "hist",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewWindow::L100 => "L100",
            ViewWindow::L200 => "L200",
            ViewWindow::L400 => "L400",
            ViewWindow::L500 => "L500",
            ViewWindow::Hist => "Hist",
        }
    }
}

/// JSON objects whose key order matters for display (tracks, distances, ...).
fn ordered_entries<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct EntriesVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor(PhantomData))
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JockeyData {
    pub metadata: Metadata,
    pub jockeys: Vec<Jockey>,
    pub global: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub export_date: String,
    pub num_jockeys: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub ws_l200: f64,
    pub ip_l200: f64,
    pub races_l200: f64,
    pub ws_hist: f64,
    pub ip_hist: f64,
    pub races_hist: f64,
}

impl BreakdownEntry {
    /// (win share, implied probability, races); historical columns only for `Hist`.
    pub fn for_window(&self, window: ViewWindow) -> (f64, f64, f64) {
        if window == ViewWindow::Hist {
            (self.ws_hist, self.ip_hist, self.races_hist)
        } else {
            (self.ws_l200, self.ip_l200, self.races_l200)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComboEntry {
    pub name: String,
    pub races: f64,
    pub ws_combo: f64,
    pub gap_combo: f64,
    pub ws_combo_vs_other: f64,
    pub gap_combo_vs_other: f64,
    pub hrr_combo: f64,
    pub hrr_combo_vs_other: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimePoint {
    pub date: String,
    pub ws_l200: f64,
    pub ip_l200: f64,
    pub ws_l200_mean: f64,
    pub ws_l200_p90: f64,
    pub hrr_l50: f64,
    pub hrr_l200: f64,
    pub races_l3m: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankEntry {
    pub rank: f64,
    pub ws_in_dist: f64,
    pub races: f64,
    pub ws_diff_vs_overall: f64,
    pub gap_to_implied: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Hrr {
    pub l50: f64,
    pub l200: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Combos {
    pub trainers: Vec<ComboEntry>,
    pub sires: Vec<ComboEntry>,
    pub stables: Vec<ComboEntry>,
}

impl Combos {
    pub fn is_empty(&self) -> bool {
        self.trainers.is_empty() && self.sires.is_empty() && self.stables.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Improvement {
    pub ratio: Option<f64>,
    pub new_horses_received: f64,
    pub share_new_horses: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HorseQuality {
    pub avg_quality: f64,
    pub quality_pctile: Option<f64>,
    pub avg_age: f64,
    pub age_pctile: Option<f64>,
    pub avg_distance: f64,
    pub distance_pctile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Estado {
    pub normal_ws_hist: f64,
    pub normal_ws_l200: f64,
    pub not_normal_ws_hist: f64,
    pub not_normal_ws_l200: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Jockey {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub rank: f64,
    pub races_l6m: f64,
    pub total_races: f64,
    pub win_shares: BTreeMap<String, f64>,
    pub implied_probs: BTreeMap<String, f64>,
    pub hrr: Hrr,
    #[serde(deserialize_with = "ordered_entries")]
    pub tracks: Vec<(String, BreakdownEntry)>,
    #[serde(deserialize_with = "ordered_entries")]
    pub surfaces: Vec<(String, BreakdownEntry)>,
    #[serde(deserialize_with = "ordered_entries")]
    pub distances: Vec<(String, BreakdownEntry)>,
    pub time_series: Vec<TimePoint>,
    pub combos: Combos,
    #[serde(deserialize_with = "ordered_entries")]
    pub rankings: Vec<(String, RankEntry)>,
    pub improvement: Option<Improvement>,
    pub horse_quality: Option<HorseQuality>,
    pub estado: Option<Estado>,
}

fn windowed(values: &BTreeMap<String, f64>, window: ViewWindow) -> f64 {
    values
        .get(window.key())
        .or_else(|| values.get(ViewWindow::L200.key()))
        .copied()
        .unwrap_or(0.0)
}

/// One plotted point of the L200 series, already in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub month: String,
    pub win_share: f64,
    pub implied: f64,
    pub field_mean: f64,
    pub field_p90: f64,
}

pub const CHART_POINTS: usize = 24;

impl Jockey {
    pub fn win_share(&self, window: ViewWindow) -> f64 {
        windowed(&self.win_shares, window)
    }

    pub fn implied_prob(&self, window: ViewWindow) -> f64 {
        windowed(&self.implied_probs, window)
    }

    pub fn gap(&self, window: ViewWindow) -> f64 {
        self.win_share(window) - self.implied_prob(window)
    }

    pub fn has_breakdowns(&self) -> bool {
        !self.tracks.is_empty() || !self.surfaces.is_empty() || !self.distances.is_empty()
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        let skip = self.time_series.len().saturating_sub(CHART_POINTS);
        self.time_series[skip..]
            .iter()
            .map(|point| ChartPoint {
                month: point.date.chars().take(7).collect(),
                win_share: round2(point.ws_l200 * 100.0),
                implied: round2(point.ip_l200 * 100.0),
                field_mean: round2(point.ws_l200_mean * 100.0),
                field_p90: round2(point.ws_l200_p90 * 100.0),
            })
            .collect()
    }
}

impl JockeyData {
    pub fn search(&self, term: &str) -> Vec<&Jockey> {
        let term = term.to_lowercase();
        self.jockeys
            .iter()
            .filter(|jockey| jockey.name.to_lowercase().contains(&term))
            .collect()
    }

    pub fn find(&self, id: i64) -> Option<&Jockey> {
        self.jockeys.iter().find(|jockey| jockey.id == id)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `0.1234` -> `"12.3%"`.
pub fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// `0.012` -> `"+1.2pp"`.
pub fn pp(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{:.1}pp", value * 100.0)
}

/// Signed one-decimal number without scaling, for values already in points.
pub fn signed(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}")
}

/// Whole count with thousands separators.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data() -> JockeyData {
        serde_json::from_value(json!({
            "metadata": {"exportDate": "2025-01-02", "numJockeys": 2},
            "jockeys": [
                {
                    "id": 7,
                    "name": "Juan Perez",
                    "surname": "Perez",
                    "rank": 1,
                    "racesL6m": 310,
                    "totalRaces": 12045.0,
                    "winShares": {"l200": 0.2, "hist": 0.15},
                    "impliedProbs": {"l200": 0.18},
                    "tracks": {"San Isidro": {"wsL200": 0.2}, "Palermo": {"wsHist": 0.1}},
                    "timeSeries": (0..30).map(|i| json!({
                        "date": format!("2023-{:02}-01", (i % 12) + 1),
                        "wsL200": 0.123456
                    })).collect::<Vec<_>>(),
                    "rankings": {"1000": {"rank": 2}, "800": {"rank": 5}}
                },
                {"id": 9, "name": "Pablo Falero", "surname": "Falero"}
            ],
            "global": {"anything": [1, 2]}
        }))
        .expect("document should deserialize")
    }

    #[test]
    fn missing_windows_fall_back_to_l200_then_zero() {
        let data = data();
        let juan = data.find(7).expect("jockey 7 exists");
        let pablo = data.find(9).expect("jockey 9 exists");

        assert_eq!(juan.win_share(ViewWindow::Hist), 0.15);
        assert_eq!(juan.win_share(ViewWindow::L400), 0.2);
        assert_eq!(juan.implied_prob(ViewWindow::Hist), 0.18);
        assert_eq!(pablo.win_share(ViewWindow::L100), 0.0);
        assert!((juan.gap(ViewWindow::L200) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn breakdowns_keep_document_order() {
        let data = data();
        let juan = data.find(7).expect("jockey 7 exists");

        let tracks: Vec<&str> = juan.tracks.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(tracks, vec!["San Isidro", "Palermo"]);
        let distances: Vec<&str> = juan.rankings.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(distances, vec!["1000", "800"]);
        assert_eq!(juan.tracks[1].1.for_window(ViewWindow::Hist).0, 0.1);
        assert!(!data.find(9).expect("jockey 9 exists").has_breakdowns());
    }

    #[test]
    fn chart_keeps_last_24_points_in_percent() {
        let data = data();
        let points = data.find(7).expect("jockey 7 exists").chart_points();

        assert_eq!(points.len(), CHART_POINTS);
        assert_eq!(points[0].month, "2023-07");
        assert_eq!(points[0].win_share, 12.35);
    }

    #[test]
    fn search_matches_name_substring() {
        let data = data();

        assert_eq!(data.search("FALERO").len(), 1);
        assert_eq!(data.search("").len(), 2);
    }

    #[test]
    fn formatting_helpers() {
        assert_eq!(pct(0.1234), "12.3%");
        assert_eq!(pp(0.012), "+1.2pp");
        assert_eq!(pp(-0.012), "-1.2pp");
        assert_eq!(signed(3.14), "+3.1");
        assert_eq!(format_count(12045.0), "12,045");
        assert_eq!(format_count(310.0), "310");
        assert_eq!(format_count(-1234567.0), "-1,234,567");
    }
}
