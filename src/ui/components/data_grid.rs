use dioxus::prelude::*;

use crate::domain::catalog::DatasetKind;
use crate::domain::entities::column::ColumnSpec;
use crate::domain::entities::grid::GridState;
use crate::domain::grid::gradient::GradientScale;
use crate::domain::grid::{GridData, GridView};
use crate::ui::style::{
    body_cell_style, button_style, column_header_style, group_header_style, input_style,
    row_style, table_container_style, table_style,
};

/// Tooltip for a header: the shading scale of gradient columns.
fn header_hint(column: &ColumnSpec, scale: &GradientScale) -> String {
    match scale.max_for(&column.key) {
        Some(max) => format!("{}: shaded against max {max}", column.key),
        None => column.key.clone(),
    }
}

/// One table for every dataset: the schema of `kind` decides columns, header
/// groups, filters, gradient shading and paging.
#[component]
pub fn DataGrid(kind: DatasetKind, data: GridData) -> Element {
    let schema = kind.schema();
    let mut state = use_signal(GridState::default);

    let snapshot = state();
    let view = GridView::derive(schema, &data.records, &snapshot);
    let filterable: Vec<_> = schema.filterable_columns().cloned().collect();
    let page = view.page;
    let total_pages = view.total_pages;
    let matched = view.matched;
    let total = data.records.len();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; min-height: 0;",

            if !filterable.is_empty() {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center;",
                    for column in filterable {
                        input {
                            key: "{column.key}",
                            style: "{input_style()} width: 140px;",
                            placeholder: "Filter by {column.filter_name()}",
                            value: "{snapshot.filter(&column.key)}",
                            oninput: {
                                let key = column.key.clone();
                                move |event: FormEvent| state.write().set_filter(&key, event.value())
                            },
                        }
                    }
                    span { style: "font-size: 12px; color: #9ca3af;", "{matched} of {total} rows" }
                }
            }

            div {
                style: "{table_container_style()}",
                table { style: "{table_style()}",
                    thead {
                        tr {
                            for group in schema.groups() {
                                th {
                                    colspan: "{group.span}",
                                    style: "{group_header_style(group.tone)}",
                                    "{group.title}"
                                }
                            }
                        }
                        tr {
                            for column in schema.columns() {
                                th {
                                    style: "{column_header_style(column)}",
                                    title: "{header_hint(column, &data.gradient)}",
                                    onclick: {
                                        let key = column.key.clone();
                                        move |_| state.write().toggle_sort(&key)
                                    },
                                    "{column.key}{snapshot.sort_arrow(&column.key)}"
                                }
                            }
                        }
                    }
                    tbody {
                        if view.rows.is_empty() {
                            tr {
                                td {
                                    colspan: "{schema.columns().len()}",
                                    style: "padding: 16px; text-align: center; color: #6b7280;",
                                    "No rows match the current filters."
                                }
                            }
                        }
                        for (index, record) in view.rows.iter().enumerate() {
                            tr { style: "{row_style(index)}",
                                for column in schema.columns() {
                                    {
                                        let value = record.value(&column.key);
                                        let intensity = data.gradient.intensity(&column.key, value);
                                        rsx! {
                                            td {
                                                style: "{body_cell_style(column, intensity)}",
                                                "{column.display_value(value)}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if schema.page_size.is_some() && total_pages > 1 {
                div {
                    style: "display: flex; justify-content: center; align-items: center; gap: 12px;",
                    button {
                        style: "{button_style(false)}",
                        disabled: page <= 1,
                        onclick: move |_| state.write().set_page(page.saturating_sub(1)),
                        "Previous"
                    }
                    span { "Page {page} of {total_pages}" }
                    button {
                        style: "{button_style(false)}",
                        disabled: page >= total_pages,
                        onclick: move |_| state.write().set_page(page + 1),
                        "Next"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::column::GradientPolarity;
    use crate::domain::entities::record::Record;
    use crate::domain::grid::gradient::compute_gradient;

    #[test]
    fn gradient_headers_mention_their_scale() {
        let prs = ColumnSpec::new("PRS").gradient(GradientPolarity::HigherIsBetter);
        let name = ColumnSpec::new("Name").filter_label("Horse");
        let records = vec![Record::new().with("PRS", 4.0), Record::new().with("PRS", 9.5)];
        let scale = compute_gradient(&records, &[&prs]);

        assert_eq!(header_hint(&prs, &scale), "PRS: shaded against max 9.5");
        assert_eq!(header_hint(&name, &scale), "Name");
    }
}
