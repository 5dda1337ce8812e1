use std::sync::Arc;

use crate::domain::entities::report::{Report, ReportDraft, ReportId, ReportPatch, ValidationError};
use crate::usecase::ports::repo::{RepoError, ReportRepository};

pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    pub fn init(&self) -> Result<(), RepoError> {
        self.repo.init()
    }

    pub fn list(&self, location: &str, criador: Option<&str>) -> Result<Vec<Report>, RepoError> {
        if location.trim().is_empty() {
            return Err(ValidationError::MissingField("location").into());
        }
        let reports = self.repo.list(location, criador)?;
        tracing::info!(location, ?criador, count = reports.len(), "loaded reports");
        Ok(reports)
    }

    pub fn create(&self, draft: ReportDraft) -> Result<Report, RepoError> {
        let draft = draft.validate()?;
        let report = self.repo.create(draft)?;
        tracing::info!(id = %report.id, location = %report.location, "created report");
        Ok(report)
    }

    pub fn update(&self, id: &ReportId, patch: ReportPatch) -> Result<Report, RepoError> {
        let patch = patch.validate()?;
        let report = self.repo.update(id, patch)?;
        tracing::info!(%id, "updated report");
        Ok(report)
    }

    pub fn delete(&self, id: &ReportId) -> Result<(), RepoError> {
        self.repo.delete(id)?;
        tracing::info!(%id, "deleted report");
        Ok(())
    }
}

/// What a report board shows: mirrors the store after each successful call,
/// and is left untouched by failed ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReportListState {
    #[default]
    Loading,
    Error(String),
    Ready(Vec<Report>),
}

impl ReportListState {
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<Report>, E>) -> Self {
        match result {
            Ok(reports) => ReportListState::Ready(reports),
            Err(err) => ReportListState::Error(err.to_string()),
        }
    }

    pub fn reports(&self) -> &[Report] {
        match self {
            ReportListState::Ready(reports) => reports,
            _ => &[],
        }
    }

    /// Mutations are only offered once the list they would patch has loaded.
    pub fn accepts_changes(&self) -> bool {
        matches!(self, ReportListState::Ready(_))
    }

    pub fn apply_created(&mut self, report: Report) {
        if let ReportListState::Ready(reports) = self {
            reports.insert(0, report);
        }
    }

    pub fn apply_updated(&mut self, report: Report) {
        if let ReportListState::Ready(reports) = self {
            if let Some(slot) = reports.iter_mut().find(|r| r.id == report.id) {
                *slot = report;
            }
        }
    }

    pub fn apply_deleted(&mut self, id: &ReportId) {
        if let ReportListState::Ready(reports) = self {
            reports.retain(|r| &r.id != id);
        }
    }
}
