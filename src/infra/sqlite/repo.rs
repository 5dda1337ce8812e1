use std::path::PathBuf;

use crate::domain::entities::report::{Report, ReportDraft, ReportId, ReportPatch};
use crate::infra::sqlite::queries::{delete_report, insert_report, list_reports, update_report};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{RepoError, ReportRepository};

fn store_error(err: anyhow::Error) -> RepoError {
    RepoError::Store(format!("{err:#}"))
}

/// Local report store; every call opens its own connection.
pub struct SqliteReportRepo {
    pub db_path: PathBuf,
}

impl ReportRepository for SqliteReportRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(store_error)
    }

    fn list(&self, location: &str, criador: Option<&str>) -> Result<Vec<Report>, RepoError> {
        list_reports(&self.db_path, location, criador).map_err(store_error)
    }

    fn create(&self, draft: ReportDraft) -> Result<Report, RepoError> {
        insert_report(&self.db_path, &draft).map_err(store_error)
    }

    fn update(&self, id: &ReportId, patch: ReportPatch) -> Result<Report, RepoError> {
        update_report(&self.db_path, id, &patch)
            .map_err(store_error)?
            .ok_or_else(|| RepoError::NotFound(id.clone()))
    }

    fn delete(&self, id: &ReportId) -> Result<(), RepoError> {
        if delete_report(&self.db_path, id).map_err(store_error)? {
            Ok(())
        } else {
            Err(RepoError::NotFound(id.clone()))
        }
    }
}
