use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned identifier. Remote stores hand out integers, the local one
/// uuids; both are kept as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReportId {
    fn from(value: &str) -> Self {
        ReportId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(value) => ReportId(value.to_string()),
            RawId::Text(value) => ReportId(value),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Reports,
    Tables,
    Analysis,
    Proposals,
    Auctions,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Reports,
        Category::Tables,
        Category::Analysis,
        Category::Proposals,
        Category::Auctions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Reports => "reports",
            Category::Tables => "tables",
            Category::Analysis => "analysis",
            Category::Proposals => "proposals",
            Category::Auctions => "auctions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Reports => "Reports",
            Category::Tables => "Tables",
            Category::Analysis => "Analysis",
            Category::Proposals => "Proposals",
            Category::Auctions => "Auctions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownCategory(value.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("nothing to update")]
    EmptyPatch,
}

mod timestamp {
    use super::*;

    /// Accepts RFC 3339 and offset-less timestamps (read as UTC).
    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                    .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) => parse(&text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {text}"))),
        }
    }
}

pub use timestamp::parse as parse_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub url: String,
    pub category: Category,
    pub location: String,
    #[serde(default)]
    pub criador: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated report waiting for the store to assign id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDraft {
    pub title: String,
    pub url: String,
    pub category: Category,
    pub location: String,
    pub criador: Option<String>,
}

/// Partial update. `location` is fixed at creation and cannot be patched;
/// `criador: Some(None)` clears the breeder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criador: Option<Option<String>>,
}

fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    Ok(title.to_string())
}

fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::MissingField("url"));
    }
    let parsed =
        reqwest::Url::parse(url).map_err(|_| ValidationError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl(url.to_string()));
    }
    Ok(url.to_string())
}

fn normalize_criador(criador: Option<String>) -> Option<String> {
    criador
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl ReportDraft {
    pub fn validate(self) -> Result<Self, ValidationError> {
        let location = self.location.trim().to_string();
        if location.is_empty() {
            return Err(ValidationError::MissingField("location"));
        }
        Ok(Self {
            title: validate_title(&self.title)?,
            url: validate_url(&self.url)?,
            category: self.category,
            location,
            criador: normalize_criador(self.criador),
        })
    }
}

impl ReportPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.category.is_none() && self.criador.is_none()
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        Ok(Self {
            title: self.title.as_deref().map(validate_title).transpose()?,
            url: self.url.as_deref().map(validate_url).transpose()?,
            category: self.category,
            criador: self.criador.map(normalize_criador),
        })
    }
}

/// Raw add/edit form contents as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportForm {
    pub title: String,
    pub url: String,
    pub category: String,
    pub criador: String,
}

impl ReportForm {
    pub fn from_report(report: &Report) -> Self {
        Self {
            title: report.title.clone(),
            url: report.url.clone(),
            category: report.category.as_str().to_string(),
            criador: report.criador.clone().unwrap_or_default(),
        }
    }

    fn category(&self) -> Result<Category, ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        self.category.parse()
    }

    /// The board supplies `location`; a breeder-bound board also pins `criador`.
    pub fn to_draft(
        &self,
        location: &str,
        pinned_criador: Option<&str>,
    ) -> Result<ReportDraft, ValidationError> {
        let criador = match pinned_criador {
            Some(criador) => Some(criador.to_string()),
            None => Some(self.criador.clone()),
        };
        ReportDraft {
            title: self.title.clone(),
            url: self.url.clone(),
            category: self.category()?,
            location: location.to_string(),
            criador,
        }
        .validate()
    }

    pub fn to_patch(&self, pinned_criador: Option<&str>) -> Result<ReportPatch, ValidationError> {
        let criador = match pinned_criador {
            Some(criador) => Some(criador.to_string()),
            None => Some(self.criador.clone()),
        };
        ReportPatch {
            title: Some(self.title.clone()),
            url: Some(self.url.clone()),
            category: Some(self.category()?),
            criador: Some(criador),
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form() -> ReportForm {
        ReportForm {
            title: "  Weekly dams  ".to_string(),
            url: "https://example.com/r.pdf".to_string(),
            category: "analysis".to_string(),
            criador: String::new(),
        }
    }

    #[test]
    fn report_deserializes_numeric_ids_and_naive_timestamps() {
        let report: Report = serde_json::from_value(json!({
            "id": 42,
            "title": "T",
            "url": "https://x.io",
            "category": "Tables",
            "location": "dams",
            "criador": null,
            "created_at": "2024-05-01T12:00:00.123456",
            "updated_at": "2024-05-02T08:30:00+00:00"
        }))
        .expect("row should deserialize");

        assert_eq!(report.id, ReportId::from("42"));
        assert_eq!(report.category, Category::Tables);
        assert!(report.criador.is_none());
        assert_eq!(
            report.created_at.map(|dt| dt.to_rfc3339()),
            Some("2024-05-01T12:00:00.123456+00:00".to_string())
        );
        assert!(report.updated_at.is_some());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result: Result<Report, _> = serde_json::from_value(json!({
            "id": "a", "title": "T", "url": "https://x.io",
            "category": "memes", "location": "dams"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn draft_validation_trims_and_requires_fields() {
        let draft = form().to_draft("trainer", None).expect("form is valid");
        assert_eq!(draft.title, "Weekly dams");
        assert_eq!(draft.location, "trainer");
        assert_eq!(draft.criador, None);

        let mut missing = form();
        missing.title = "   ".to_string();
        assert_eq!(
            missing.to_draft("trainer", None),
            Err(ValidationError::MissingField("title"))
        );

        assert_eq!(
            form().to_draft(" ", None),
            Err(ValidationError::MissingField("location"))
        );

        let mut no_category = form();
        no_category.category.clear();
        assert_eq!(
            no_category.to_draft("trainer", None),
            Err(ValidationError::MissingField("category"))
        );
    }

    #[test]
    fn urls_must_be_http() {
        for bad in ["ftp://x.io/file", "not a url", "mailto:a@b.c"] {
            let mut form = form();
            form.url = bad.to_string();
            assert!(matches!(
                form.to_draft("dams", None),
                Err(ValidationError::InvalidUrl(_))
            ));
        }
    }

    #[test]
    fn pinned_criador_overrides_form() {
        let mut form = form();
        form.criador = "Someone else".to_string();

        let draft = form
            .to_draft("criador", Some("Firmamento"))
            .expect("form is valid");
        assert_eq!(draft.criador.as_deref(), Some("Firmamento"));
    }

    #[test]
    fn patch_clears_blank_criador() {
        let patch = form().to_patch(None).expect("form is valid");
        assert_eq!(patch.criador, Some(None));
        assert_eq!(patch.title.as_deref(), Some("Weekly dams"));
        assert_eq!(patch.category, Some(Category::Analysis));
        assert_eq!(ReportPatch::default().validate(), Err(ValidationError::EmptyPatch));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = ReportPatch {
            title: Some("New".to_string()),
            criador: Some(None),
            ..ReportPatch::default()
        };

        assert_eq!(
            serde_json::to_value(&patch).expect("patch serializes"),
            json!({"title": "New", "criador": null})
        );
    }
}
