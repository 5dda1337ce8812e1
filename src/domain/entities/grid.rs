use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// View state of one data grid: sort, per-column filters and the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub sort: Option<SortSpec>,
    pub filters: BTreeMap<String, String>,
    pub page: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            sort: None,
            filters: BTreeMap::new(),
            page: 1,
        }
    }
}

impl GridState {
    /// Clicking the active column flips direction; a new column starts ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.column == column => SortSpec {
                column: current.column,
                direction: current.direction.toggled(),
            },
            _ => SortSpec {
                column: column.to_string(),
                direction: SortDirection::Asc,
            },
        });
    }

    pub fn set_filter(&mut self, column: &str, term: String) {
        if term.is_empty() {
            self.filters.remove(column);
        } else {
            self.filters.insert(column.to_string(), term);
        }
        self.page = 1;
    }

    pub fn filter(&self, column: &str) -> &str {
        self.filters.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn sort_arrow(&self, column: &str) -> &'static str {
        match &self.sort {
            Some(sort) if sort.column == column => sort.direction.arrow(),
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_sort_flips_then_resets_for_new_column() {
        let mut state = GridState::default();

        state.toggle_sort("PRS");
        assert_eq!(state.sort_arrow("PRS"), " ▲");
        state.toggle_sort("PRS");
        assert_eq!(
            state.sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Desc)
        );
        state.toggle_sort("PR");
        assert_eq!(
            state.sort,
            Some(SortSpec {
                column: "PR".to_string(),
                direction: SortDirection::Asc
            })
        );
        assert_eq!(state.sort_arrow("PRS"), "");
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = GridState::default();
        state.set_page(4);

        state.set_filter("Sire", "gal".to_string());
        assert_eq!(state.page, 1);
        assert_eq!(state.filter("Sire"), "gal");

        state.set_filter("Sire", String::new());
        assert_eq!(state.filter("Sire"), "");
        assert!(state.filters.is_empty());

        state.set_page(0);
        assert_eq!(state.page, 1);
    }
}
