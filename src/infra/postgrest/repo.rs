use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::report::{Report, ReportDraft, ReportId, ReportPatch};
use crate::usecase::ports::repo::{RepoError, ReportRepository};

const TABLE: &str = "Reports";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Reports table behind a PostgREST endpoint (Supabase).
pub struct PostgrestReportRepo {
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
    client: OnceLock<Client>,
}

impl PostgrestReportRepo {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
            client: OnceLock::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    // Built on first use, which is always on a blocking worker thread.
    fn client(&self) -> Result<&Client, RepoError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RepoError::Store(format!("failed to build HTTP client: {err}")))?;
        Ok(self.client.get_or_init(|| client))
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
    }

    fn list_request(&self, client: &Client, location: &str, criador: Option<&str>) -> RequestBuilder {
        let mut query = vec![
            ("select", "*".to_string()),
            ("location", format!("eq.{location}")),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(criador) = criador {
            query.push(("criador", format!("eq.{criador}")));
        }
        self.request(client.get(self.table_url()).query(&query))
    }

    fn create_request(&self, client: &Client, draft: &ReportDraft) -> RequestBuilder {
        self.request(client.post(self.table_url()).json(&[draft]))
    }

    fn update_request(&self, client: &Client, id: &ReportId, patch: &ReportPatch) -> RequestBuilder {
        self.request(
            client
                .patch(self.table_url())
                .query(&[("id", format!("eq.{id}"))])
                .json(patch),
        )
    }

    fn delete_request(&self, client: &Client, id: &ReportId) -> RequestBuilder {
        self.request(
            client
                .delete(self.table_url())
                .query(&[("id", format!("eq.{id}"))]),
        )
    }
}

fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, RepoError> {
    let response = builder
        .send()
        .map_err(|err| RepoError::Store(err.to_string()))?;
    let response = check_status(response)?;
    response
        .json::<T>()
        .map_err(|err| RepoError::Store(format!("unexpected response: {err}")))
}

/// PostgREST answers a PATCH or DELETE matching no row with an empty
/// representation instead of an error status.
fn affected_row(rows: Vec<Report>, id: &ReportId) -> Result<Report, RepoError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| RepoError::NotFound(id.clone()))
}

fn check_status(response: Response) -> Result<Response, RepoError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP {status}: {body}"));
    Err(RepoError::Store(message))
}

impl ReportRepository for PostgrestReportRepo {
    fn init(&self) -> Result<(), RepoError> {
        Ok(())
    }

    fn list(&self, location: &str, criador: Option<&str>) -> Result<Vec<Report>, RepoError> {
        send(self.list_request(self.client()?, location, criador))
    }

    fn create(&self, draft: ReportDraft) -> Result<Report, RepoError> {
        let rows: Vec<Report> = send(self.create_request(self.client()?, &draft))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::Store("insert returned no row".to_string()))
    }

    fn update(&self, id: &ReportId, patch: ReportPatch) -> Result<Report, RepoError> {
        let rows = send(self.update_request(self.client()?, id, &patch))?;
        affected_row(rows, id)
    }

    fn delete(&self, id: &ReportId) -> Result<(), RepoError> {
        let rows = send(self.delete_request(self.client()?, id))?;
        affected_row(rows, id).map(|_| ())
    }
}
