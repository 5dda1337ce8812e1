use std::collections::BTreeMap;

use crate::domain::entities::column::{ColumnSpec, GradientPolarity};
use crate::domain::entities::record::{parse_leading_number, CellValue, Record};

/// Per-column maxima used to shade gradient cells. Built from the full record
/// set, never from the filtered view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradientScale {
    maxima: BTreeMap<String, (GradientPolarity, f64)>,
}

fn gradient_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Null => None,
        CellValue::Number(number) => Some(*number),
        CellValue::Text(text) => parse_leading_number(&text.replace('%', "")),
    }
}

pub fn compute_gradient(records: &[Record], columns: &[&ColumnSpec]) -> GradientScale {
    let maxima = columns
        .iter()
        .filter_map(|column| column.gradient.map(|polarity| (column, polarity)))
        .map(|(column, polarity)| {
            let max = records
                .iter()
                .map(|record| gradient_number(record.value(&column.key)).unwrap_or(0.0))
                .filter(|value| !value.is_nan())
                .fold(None, |acc: Option<f64>, value| {
                    Some(acc.map_or(value, |current| current.max(value)))
                })
                .unwrap_or(0.0);
            (column.key.clone(), (polarity, max))
        })
        .collect();

    GradientScale { maxima }
}

/// Intensity in `[0, 1]`; `None` means the cell stays unshaded (non-numeric value,
/// or a column maximum of zero).
pub fn style_for_cell(polarity: GradientPolarity, value: f64, max: f64) -> Option<f64> {
    if !value.is_finite() || !max.is_finite() || max == 0.0 {
        return None;
    }
    let ratio = match polarity {
        GradientPolarity::HigherIsBetter => value / max,
        GradientPolarity::LowerIsBetter => 1.0 - value / max,
    };
    Some(ratio.clamp(0.0, 1.0))
}

impl GradientScale {
    pub fn max_for(&self, column: &str) -> Option<f64> {
        self.maxima.get(column).map(|(_, max)| *max)
    }

    pub fn intensity(&self, column: &str, value: &CellValue) -> Option<f64> {
        let (polarity, max) = self.maxima.get(column)?;
        style_for_cell(*polarity, gradient_number(value)?, *max)
    }
}

/// CSS background for an intensity: red at 0, green at 1.
pub fn gradient_background(ratio: f64) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let red = (255.0 * (1.0 - ratio)).floor() as u8;
    let green = (255.0 * ratio).floor() as u8;
    let alpha = 0.15 + ratio * 0.35;
    format!("background-color: rgba({red}, {green}, 0, {alpha:.3});")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_is_better_scales_by_max() {
        assert_eq!(style_for_cell(GradientPolarity::HigherIsBetter, 5.0, 10.0), Some(0.5));
        assert_eq!(style_for_cell(GradientPolarity::HigherIsBetter, 10.0, 10.0), Some(1.0));
        assert_eq!(style_for_cell(GradientPolarity::HigherIsBetter, 20.0, 10.0), Some(1.0));
        assert_eq!(style_for_cell(GradientPolarity::HigherIsBetter, -3.0, 10.0), Some(0.0));
    }

    #[test]
    fn lower_is_better_inverts() {
        assert_eq!(style_for_cell(GradientPolarity::LowerIsBetter, 0.0, 0.2), Some(1.0));
        assert_eq!(style_for_cell(GradientPolarity::LowerIsBetter, 0.2, 0.2), Some(0.0));
    }

    #[test]
    fn zero_max_or_nan_value_is_unstyled() {
        assert_eq!(style_for_cell(GradientPolarity::HigherIsBetter, 1.0, 0.0), None);
        assert_eq!(style_for_cell(GradientPolarity::HigherIsBetter, f64::NAN, 3.0), None);
    }

    #[test]
    fn intensity_stays_in_unit_range_for_any_input() {
        for value in [-100.0, -1.0, 0.0, 0.3, 1.0, 7.0, 1e9] {
            for max in [-5.0, 0.5, 1.0, 10.0] {
                for polarity in [GradientPolarity::HigherIsBetter, GradientPolarity::LowerIsBetter] {
                    if let Some(ratio) = style_for_cell(polarity, value, max) {
                        assert!((0.0..=1.0).contains(&ratio), "{value}/{max} -> {ratio}");
                    }
                }
            }
        }
    }

    #[test]
    fn max_treats_missing_and_unparseable_as_zero() {
        let prs = ColumnSpec::new("PRS").gradient(GradientPolarity::HigherIsBetter);
        let inbreeding = ColumnSpec::new("Inbreeding Coef.").gradient(GradientPolarity::LowerIsBetter);
        let records = vec![
            Record::new().with("PRS", -4.0).with("Inbreeding Coef.", "12%"),
            Record::new().with("PRS", "n/a"),
            Record::new().with("Inbreeding Coef.", 0.08),
        ];

        let scale = compute_gradient(&records, &[&prs, &inbreeding]);

        assert_eq!(scale.max_for("PRS"), Some(0.0));
        assert_eq!(scale.max_for("Inbreeding Coef."), Some(12.0));
        assert_eq!(scale.intensity("PRS", &CellValue::Number(-4.0)), None);
        assert_eq!(scale.intensity("Inbreeding Coef.", &CellValue::from("6%")), Some(0.5));
        assert_eq!(scale.intensity("Other", &CellValue::Number(1.0)), None);
    }

    #[test]
    fn empty_dataset_has_zero_max() {
        let prs = ColumnSpec::new("PRS").gradient(GradientPolarity::HigherIsBetter);
        let scale = compute_gradient(&[], &[&prs]);

        assert_eq!(scale.max_for("PRS"), Some(0.0));
    }

    #[test]
    fn background_runs_from_red_to_green() {
        assert_eq!(
            gradient_background(0.0),
            "background-color: rgba(255, 0, 0, 0.150);"
        );
        assert_eq!(
            gradient_background(1.0),
            "background-color: rgba(0, 255, 0, 0.500);"
        );
    }
}
