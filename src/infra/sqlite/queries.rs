use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::domain::entities::report::{
    parse_timestamp, Category, Report, ReportDraft, ReportId, ReportPatch,
};
use crate::infra::sqlite::schema::open_connection;

const REPORT_COLUMNS: &str =
    "id, title, url, category, location, criador, created_at, updated_at";

struct ReportRow {
    id: String,
    title: String,
    url: String,
    category: String,
    location: String,
    criador: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ReportRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            category: row.get(3)?,
            location: row.get(4)?,
            criador: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn into_report(self) -> Result<Report> {
        let category: Category = self
            .category
            .parse()
            .with_context(|| format!("report {} has an unreadable category", self.id))?;
        Ok(Report {
            created_at: Some(
                parse_timestamp(&self.created_at)
                    .ok_or_else(|| anyhow!("report {} has a bad created_at", self.id))?,
            ),
            updated_at: parse_timestamp(&self.updated_at),
            id: ReportId(self.id),
            title: self.title,
            url: self.url,
            category,
            location: self.location,
            criador: self.criador,
        })
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn load_report(conn: &Connection, id: &str) -> Result<Option<Report>> {
    let row = conn
        .query_row(
            &format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?1"),
            [id],
            ReportRow::read,
        )
        .optional()
        .context("failed to load report")?;
    row.map(ReportRow::into_report).transpose()
}

pub fn list_reports(db_path: &Path, location: &str, criador: Option<&str>) -> Result<Vec<Report>> {
    let conn = open_connection(db_path)?;
    let mut sql = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE location = ?1");
    let mut args = vec![Value::Text(location.to_string())];
    if let Some(criador) = criador {
        sql.push_str(" AND criador = ?2");
        args.push(Value::Text(criador.to_string()));
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    let mut stmt = conn.prepare(&sql).context("failed to prepare report list query")?;
    let rows = stmt
        .query_map(params_from_iter(args), ReportRow::read)
        .context("failed to query reports")?;

    let mut reports = Vec::new();
    for row in rows {
        let row = row.context("failed to read report row")?;
        reports.push(row.into_report()?);
    }
    Ok(reports)
}

pub fn insert_report(db_path: &Path, draft: &ReportDraft) -> Result<Report> {
    let conn = open_connection(db_path)?;
    let id = uuid::Uuid::new_v4().to_string();
    let now = now_timestamp();

    conn.execute(
        "INSERT INTO reports(id, title, url, category, location, criador, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            id,
            draft.title,
            draft.url,
            draft.category.as_str(),
            draft.location,
            draft.criador,
            now
        ],
    )
    .context("failed to insert report")?;

    load_report(&conn, &id)?.ok_or_else(|| anyhow!("inserted report {id} vanished"))
}

/// Returns `None` when no report has this id.
pub fn update_report(db_path: &Path, id: &ReportId, patch: &ReportPatch) -> Result<Option<Report>> {
    let conn = open_connection(db_path)?;

    let mut assignments = vec!["updated_at = ?1".to_string()];
    let mut args = vec![Value::Text(now_timestamp())];
    let mut push = |column: &str, value: Value| {
        args.push(value);
        assignments.push(format!("{column} = ?{}", args.len()));
    };
    if let Some(title) = &patch.title {
        push("title", Value::Text(title.clone()));
    }
    if let Some(url) = &patch.url {
        push("url", Value::Text(url.clone()));
    }
    if let Some(category) = patch.category {
        push("category", Value::Text(category.as_str().to_string()));
    }
    if let Some(criador) = &patch.criador {
        push(
            "criador",
            criador.clone().map(Value::Text).unwrap_or(Value::Null),
        );
    }
    args.push(Value::Text(id.0.clone()));
    let sql = format!(
        "UPDATE reports SET {} WHERE id = ?{}",
        assignments.join(", "),
        args.len()
    );

    let changed = conn
        .execute(&sql, params_from_iter(args))
        .context("failed to update report")?;
    if changed == 0 {
        return Ok(None);
    }
    load_report(&conn, &id.0)
}

/// Returns whether a row was removed.
pub fn delete_report(db_path: &Path, id: &ReportId) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let removed = conn
        .execute("DELETE FROM reports WHERE id = ?1", [&id.0])
        .context("failed to delete report")?;
    Ok(removed > 0)
}
