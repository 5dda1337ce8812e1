use std::collections::BTreeMap;

use crate::domain::entities::record::Record;

/// Keeps records whose stringified value contains every active term
/// (case-insensitive). Terms on columns outside `filterable` are ignored.
pub fn apply_filters<'a>(
    records: &'a [Record],
    filters: &BTreeMap<String, String>,
    filterable: &[&str],
) -> Vec<&'a Record> {
    let active: Vec<(&str, String)> = filters
        .iter()
        .filter(|(column, term)| !term.is_empty() && filterable.contains(&column.as_str()))
        .map(|(column, term)| (column.as_str(), term.to_lowercase()))
        .collect();

    records
        .iter()
        .filter(|record| {
            active.iter().all(|(column, needle)| {
                record
                    .value(column)
                    .to_string()
                    .to_lowercase()
                    .contains(needle.as_str())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Record> {
        vec![
            Record::new().with("Sire", "Galileo").with("Haras", "La Pasion"),
            Record::new().with("Sire", "Frankel").with("Haras", "Firmamento"),
            Record::new().with("Haras", "Galvan"),
            Record::new().with("Sire", 1200_i64),
        ]
    }

    fn filters(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_filters_keep_everything_in_order() {
        let rows = rows();
        let kept = apply_filters(&rows, &BTreeMap::new(), &["Sire", "Haras"]);

        assert_eq!(kept.len(), rows.len());
        assert!(kept.iter().zip(rows.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn terms_are_case_insensitive_substrings_combined_with_and() {
        let rows = rows();

        let kept = apply_filters(&rows, &filters(&[("Sire", "GAL")]), &["Sire", "Haras"]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].value("Sire").to_string(), "Galileo");

        let kept = apply_filters(
            &rows,
            &filters(&[("Sire", "gal"), ("Haras", "firm")]),
            &["Sire", "Haras"],
        );
        assert!(kept.is_empty());
    }

    #[test]
    fn absent_values_only_match_empty_terms() {
        let rows = rows();

        let kept = apply_filters(&rows, &filters(&[("Sire", "")]), &["Sire"]);
        assert_eq!(kept.len(), 4);

        let kept = apply_filters(&rows, &filters(&[("Haras", "gal")]), &["Haras"]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn numbers_match_their_string_form() {
        let rows = rows();
        let kept = apply_filters(&rows, &filters(&[("Sire", "20")]), &["Sire"]);

        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn non_filterable_columns_are_ignored() {
        let rows = rows();
        let kept = apply_filters(&rows, &filters(&[("Haras", "zzz")]), &["Sire"]);

        assert_eq!(kept.len(), rows.len());
    }
}
