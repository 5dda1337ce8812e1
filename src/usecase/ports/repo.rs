use crate::domain::entities::report::{Report, ReportDraft, ReportId, ReportPatch, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// Message passed through unchanged from the backing store.
    #[error("{0}")]
    Store(String),
    #[error("report {0} not found")]
    NotFound(ReportId),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Persistence of reports, partitioned by `location` (and optionally `criador`).
/// Implementations block; callers off the UI thread go through `run_blocking`.
pub trait ReportRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    /// Newest first by `created_at`.
    fn list(&self, location: &str, criador: Option<&str>) -> Result<Vec<Report>, RepoError>;
    fn create(&self, draft: ReportDraft) -> Result<Report, RepoError>;
    fn update(&self, id: &ReportId, patch: ReportPatch) -> Result<Report, RepoError>;
    fn delete(&self, id: &ReportId) -> Result<(), RepoError>;
}
