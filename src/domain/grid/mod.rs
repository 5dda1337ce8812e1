pub mod filter;
pub mod gradient;
pub mod page;
pub mod sort;

use std::sync::Arc;

use crate::domain::entities::column::DatasetSchema;
use crate::domain::entities::grid::GridState;
use crate::domain::entities::record::Record;

use self::filter::apply_filters;
use self::gradient::{compute_gradient, GradientScale};
use self::page::paginate;
use self::sort::apply_sort;

/// What a grid shows for a given state: filter, then sort, then page.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView<'a> {
    pub rows: Vec<&'a Record>,
    pub matched: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl<'a> GridView<'a> {
    pub fn derive(schema: &DatasetSchema, records: &'a [Record], state: &GridState) -> Self {
        let filtered = apply_filters(records, &state.filters, &schema.filterable_keys());
        let kind = state
            .sort
            .as_ref()
            .and_then(|sort| schema.column(&sort.column))
            .and_then(|column| column.kind);
        let sorted = apply_sort(filtered, state.sort.as_ref(), kind);
        let matched = sorted.len();

        match schema.page_size {
            Some(page_size) => {
                let window = paginate(&sorted, page_size, state.page);
                GridView {
                    rows: window.items,
                    matched,
                    page: window.page,
                    total_pages: window.total_pages,
                }
            }
            None => GridView {
                rows: sorted,
                matched,
                page: 1,
                total_pages: usize::from(matched > 0),
            },
        }
    }
}

/// A loaded dataset with its gradient maxima, computed once on arrival.
/// Cheap to clone into component props; equality is identity.
#[derive(Debug, Clone)]
pub struct GridData {
    pub records: Arc<Vec<Record>>,
    pub gradient: Arc<GradientScale>,
}

impl GridData {
    pub fn new(schema: &DatasetSchema, records: Vec<Record>) -> Self {
        let gradient = compute_gradient(&records, &schema.gradient_columns());
        Self {
            records: Arc::new(records),
            gradient: Arc::new(gradient),
        }
    }
}

impl PartialEq for GridData {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records) && Arc::ptr_eq(&self.gradient, &other.gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::column::{ColumnSpec, Tone};

    fn schema(page_size: Option<usize>) -> DatasetSchema {
        let schema = DatasetSchema::new("demo", 1).group(
            "Basic",
            Tone::Gray100,
            [
                ColumnSpec::new("Name").filterable(),
                ColumnSpec::new("Year").filterable(),
            ],
        );
        match page_size {
            Some(size) => schema.paged(size),
            None => schema,
        }
    }

    fn records() -> Vec<Record> {
        (0..7)
            .map(|i| {
                Record::new()
                    .with("Name", format!("Horse {i}"))
                    .with("Year", if i % 2 == 0 { 2023_i64 } else { 2024_i64 })
            })
            .collect()
    }

    #[test]
    fn derive_filters_sorts_and_pages() {
        let records = records();
        let mut state = GridState::default();
        state.set_filter("Year", "2023".to_string());
        state.toggle_sort("Name");
        state.toggle_sort("Name");

        let view = GridView::derive(&schema(Some(3)), &records, &state);

        assert_eq!(view.matched, 4);
        assert_eq!(view.total_pages, 2);
        let names: Vec<String> = view.rows.iter().map(|r| r.value("Name").to_string()).collect();
        assert_eq!(names, vec!["Horse 6", "Horse 4", "Horse 2"]);
    }

    #[test]
    fn unpaged_schema_returns_everything() {
        let records = records();
        let view = GridView::derive(&schema(None), &records, &GridState::default());

        assert_eq!(view.rows.len(), 7);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn derive_leaves_input_untouched() {
        let records = records();
        let before = records.clone();
        let mut state = GridState::default();
        state.toggle_sort("Year");

        let _ = GridView::derive(&schema(Some(2)), &records, &state);

        assert_eq!(records, before);
    }

    #[test]
    fn grid_data_compares_by_identity() {
        let schema = schema(None);
        let data = GridData::new(&schema, records());
        let same = data.clone();
        let rebuilt = GridData::new(&schema, records());

        assert_eq!(data, same);
        assert_ne!(data, rebuilt);
    }
}
