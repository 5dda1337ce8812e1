use chrono::NaiveDate;

use crate::domain::entities::report::{Category, Report};

pub const KNOWN_CRIADORES: [&str; 15] = [
    "El Paraiso",
    "Firmamento",
    "La Pasion",
    "Abolengo",
    "Vacacion",
    "Santa Ines",
    "Haras Gran Muñeca",
    "Santa Maria de Araras",
    "El Alfalfar",
    "Triple Alliance S.A.",
    "Juan Antonio",
    "Masama",
    "La Providencia",
    "Carampangue",
    "Pozo de Luna",
];

/// Client-side narrowing of an already loaded report list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportFilter {
    pub search: String,
    /// `None` means every category.
    pub category: Option<Category>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Empty means every breeder.
    pub criadores: Vec<String>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !report.title.to_lowercase().contains(&search) {
            return false;
        }

        if let Some(category) = self.category {
            if report.category != category {
                return false;
            }
        }

        if self.from.is_some() || self.to.is_some() {
            let Some(created) = report.created_at.map(|dt| dt.date_naive()) else {
                return false;
            };
            if self.from.is_some_and(|from| created < from) {
                return false;
            }
            if self.to.is_some_and(|to| created > to) {
                return false;
            }
        }

        if !self.criadores.is_empty() {
            let Some(criador) = report.criador.as_deref() else {
                return false;
            };
            if !self
                .criadores
                .iter()
                .any(|selected| selected.to_lowercase() == criador.to_lowercase())
            {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports.iter().filter(|report| self.matches(report)).collect()
    }

    pub fn toggle_criador(&mut self, criador: &str) {
        if let Some(pos) = self.criadores.iter().position(|c| c == criador) {
            self.criadores.remove(pos);
        } else {
            self.criadores.push(criador.to_string());
        }
    }

    pub fn is_active(&self) -> bool {
        *self != ReportFilter::default()
    }
}

/// Distinct categories present in `reports`, in first-seen order.
pub fn category_options(reports: &[Report]) -> Vec<Category> {
    let mut seen = Vec::new();
    for report in reports {
        if !seen.contains(&report.category) {
            seen.push(report.category);
        }
    }
    seen
}
