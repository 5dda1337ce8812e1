use serde_json::Value;

use crate::domain::entities::record::{records_from_json, CellValue, IngestError, Record};

/// How a column's values compare when sorting. `None` on a column means
/// auto: numeric when both sides parse, otherwise a plain string compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientPolarity {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellDisplay {
    #[default]
    Plain,
    /// Fraction shown as a whole percentage (0.034 -> "3").
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Gray50,
    Gray100,
    Gray200,
    Green50,
    Green100,
    Orange50,
    Yellow50,
    Yellow100,
    Yellow200,
    Red100,
    Blue50,
}

impl Tone {
    pub fn css(self) -> &'static str {
        match self {
            Tone::Plain => "transparent",
            Tone::Gray50 => "#f9fafb",
            Tone::Gray100 => "#f3f4f6",
            Tone::Gray200 => "#e5e7eb",
            Tone::Green50 => "#f0fdf4",
            Tone::Green100 => "#dcfce7",
            Tone::Orange50 => "#fff7ed",
            Tone::Yellow50 => "#fefce8",
            Tone::Yellow100 => "#fef9c3",
            Tone::Yellow200 => "#fef08a",
            Tone::Red100 => "#fee2e2",
            Tone::Blue50 => "#eff6ff",
        }
    }
}

pub const DEFAULT_MIN_WIDTH: u16 = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub key: String,
    pub kind: Option<ColumnKind>,
    pub gradient: Option<GradientPolarity>,
    pub filterable: bool,
    pub filter_label: Option<String>,
    pub display: CellDisplay,
    pub min_width: u16,
    pub tone: Tone,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: None,
            gradient: None,
            filterable: false,
            filter_label: None,
            display: CellDisplay::Plain,
            min_width: DEFAULT_MIN_WIDTH,
            tone: Tone::Plain,
        }
    }

    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn gradient(mut self, polarity: GradientPolarity) -> Self {
        self.gradient = Some(polarity);
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn filter_label(mut self, label: impl Into<String>) -> Self {
        self.filterable = true;
        self.filter_label = Some(label.into());
        self
    }

    pub fn percent(mut self) -> Self {
        self.display = CellDisplay::Percent;
        self
    }

    pub fn min_width(mut self, px: u16) -> Self {
        self.min_width = px;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Name shown on the filter box. Headers always show the key.
    pub fn filter_name(&self) -> &str {
        self.filter_label.as_deref().unwrap_or(&self.key)
    }

    /// Text shown in a body cell; null renders as `-`.
    pub fn display_value(&self, value: &CellValue) -> String {
        match (value, self.display) {
            (CellValue::Null, _) => "-".to_string(),
            (CellValue::Number(number), _) if number.is_nan() => "-".to_string(),
            (CellValue::Text(text), _) if text.is_empty() => "-".to_string(),
            (CellValue::Number(number), CellDisplay::Percent) => format!("{:.0}", number * 100.0),
            (other, _) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub title: String,
    pub span: usize,
    pub tone: Tone,
}

/// Declared shape of a remote dataset: ordered columns plus header groups whose
/// spans always cover the column list exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSchema {
    pub name: String,
    pub version: u32,
    pub page_size: Option<usize>,
    columns: Vec<ColumnSpec>,
    groups: Vec<ColumnGroup>,
}

impl DatasetSchema {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
            page_size: None,
            columns: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn paged(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Appends a header group. Columns left on `Tone::Plain` take the group tone.
    pub fn group(
        mut self,
        title: impl Into<String>,
        tone: Tone,
        columns: impl IntoIterator<Item = ColumnSpec>,
    ) -> Self {
        let before = self.columns.len();
        self.columns.extend(columns.into_iter().map(|column| {
            if column.tone == Tone::Plain {
                column.tone(tone)
            } else {
                column
            }
        }));
        let span = self.columns.len() - before;
        if span > 0 {
            self.groups.push(ColumnGroup {
                title: title.into(),
                span,
                tone,
            });
        }
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn groups(&self) -> &[ColumnGroup] {
        &self.groups
    }

    pub fn column(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn filterable_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|column| column.filterable)
    }

    pub fn filterable_keys(&self) -> Vec<&str> {
        self.filterable_columns()
            .map(|column| column.key.as_str())
            .collect()
    }

    pub fn gradient_columns(&self) -> Vec<&ColumnSpec> {
        self.columns
            .iter()
            .filter(|column| column.gradient.is_some())
            .collect()
    }

    /// Validates a raw payload against this schema and converts it into records.
    pub fn ingest(&self, payload: Value) -> Result<Vec<Record>, IngestError> {
        let records = records_from_json(payload)?;
        let unknown = records
            .iter()
            .filter(|record| {
                !record.is_empty()
                    && !self
                        .columns
                        .iter()
                        .any(|column| record.contains_key(&column.key))
            })
            .count();
        if unknown > 0 {
            tracing::warn!(
                dataset = %self.name,
                version = self.version,
                rows = unknown,
                "rows share no column with the declared schema"
            );
        }
        Ok(records)
    }
}
