use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::Connection;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::domain::catalog::{DatasetKind, Section};
use crate::domain::entities::column::{ColumnSpec, GradientPolarity};
use crate::domain::entities::jockey::JockeyData;
use crate::domain::entities::plot::PlotSpec;
use crate::domain::entities::record::CellValue;
use crate::domain::entities::report::{Category, ReportDraft, ReportId, ReportPatch, ValidationError};
use crate::infra::import::csv::LocalDataDir;
use crate::infra::sqlite::repo::SqliteReportRepo;
use crate::infra::sqlite::schema::init_db;
use crate::ui::style::{body_cell_style, table_container_style};
use crate::usecase::ports::datasource::{DatasetSource, FetchError, PlotSource};
use crate::usecase::ports::repo::RepoError;
use crate::usecase::services::dataset_service::DatasetService;
use crate::usecase::services::report_service::{ReportListState, ReportService};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("move37-{prefix}-{nanos}"))
}

fn sqlite_service(prefix: &str) -> (ReportService, PathBuf) {
    let temp_dir = unique_test_dir(prefix);
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let repo = SqliteReportRepo {
        db_path: temp_dir.join("reports.sqlite"),
    };
    let service = ReportService::new(Arc::new(repo));
    service.init().expect("init should succeed");
    (service, temp_dir)
}

fn draft(title: &str, location: &str) -> ReportDraft {
    ReportDraft {
        title: title.to_string(),
        url: format!("https://example.com/{}", title.to_lowercase()),
        category: Category::Reports,
        location: location.to_string(),
        criador: None,
    }
}

#[test]
fn init_db_creates_reports_table() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("reports.sqlite");

    let result = init_db(&db_path);
    assert!(result.is_ok(), "init_db should succeed: {result:?}");
    assert!(init_db(&db_path).is_ok(), "init_db should be idempotent");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'reports'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1, "reports table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn create_list_update_delete_round_trip() {
    let (service, temp_dir) = sqlite_service("crud");

    let created = service
        .create(ReportDraft {
            title: "X".to_string(),
            url: "https://x".to_string(),
            category: Category::Reports,
            location: "jockey".to_string(),
            criador: None,
        })
        .expect("create should succeed");
    assert!(created.created_at.is_some());

    let listed = service.list("jockey", None).expect("list should succeed");
    assert_eq!(listed.iter().filter(|r| r.title == "X").count(), 1);

    let updated = service
        .update(
            &created.id,
            ReportPatch {
                title: Some("X v2".to_string()),
                category: Some(Category::Analysis),
                ..ReportPatch::default()
            },
        )
        .expect("update should succeed");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "X v2");
    assert_eq!(updated.category, Category::Analysis);
    assert_eq!(updated.url, "https://x");
    assert_eq!(updated.location, "jockey");

    service.delete(&created.id).expect("delete should succeed");
    let listed = service.list("jockey", None).expect("list should succeed");
    assert!(listed.iter().all(|r| r.id != created.id));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn missing_ids_are_reported_as_not_found() {
    let (service, temp_dir) = sqlite_service("not-found");
    let ghost = ReportId::from("does-not-exist");

    let patch = ReportPatch {
        title: Some("anything".to_string()),
        ..ReportPatch::default()
    };
    assert_eq!(
        service.update(&ghost, patch),
        Err(RepoError::NotFound(ghost.clone()))
    );
    assert_eq!(service.delete(&ghost), Err(RepoError::NotFound(ghost)));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn list_is_newest_first() {
    let (service, temp_dir) = sqlite_service("ordering");

    for title in ["First", "Second", "Third"] {
        service.create(draft(title, "dams")).expect("create should succeed");
    }

    let titles: Vec<String> = service
        .list("dams", None)
        .expect("list should succeed")
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn locations_and_breeders_are_isolated() {
    let (service, temp_dir) = sqlite_service("partitions");

    service.create(draft("Jockey note", "jockey")).expect("create should succeed");
    service
        .create(ReportDraft {
            criador: Some("Firmamento".to_string()),
            ..draft("Firmamento note", "firmamento")
        })
        .expect("create should succeed");
    service
        .create(ReportDraft {
            criador: Some("Abolengo".to_string()),
            ..draft("Abolengo note", "firmamento")
        })
        .expect("create should succeed");

    assert!(service.list("trainer", None).expect("list").is_empty());
    assert_eq!(service.list("jockey", None).expect("list").len(), 1);
    assert_eq!(service.list("firmamento", None).expect("list").len(), 2);

    let pinned = service
        .list("firmamento", Some("Firmamento"))
        .expect("list should succeed");
    assert_eq!(pinned.len(), 1);
    assert_eq!(pinned[0].title, "Firmamento note");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn invalid_input_never_reaches_the_store() {
    let (service, temp_dir) = sqlite_service("validation");

    let no_title = service.create(draft("", "jockey"));
    assert_eq!(
        no_title,
        Err(RepoError::Invalid(ValidationError::MissingField("title")))
    );

    let bad_url = service.create(ReportDraft {
        url: "ftp://files.example.com".to_string(),
        ..draft("Report", "jockey")
    });
    assert!(matches!(
        bad_url,
        Err(RepoError::Invalid(ValidationError::InvalidUrl(_)))
    ));

    assert!(matches!(
        service.list("  ", None),
        Err(RepoError::Invalid(_))
    ));
    assert!(service.list("jockey", None).expect("list").is_empty());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn list_state_mirrors_successful_mutations() {
    let (service, temp_dir) = sqlite_service("list-state");
    let existing = service.create(draft("Existing", "sires")).expect("create");

    let mut state = ReportListState::from_result(service.list("sires", None));
    assert_eq!(state.reports().len(), 1);

    let added = service.create(draft("Added", "sires")).expect("create");
    state.apply_created(added.clone());
    assert_eq!(state.reports()[0].id, added.id);

    let renamed = service
        .update(
            &existing.id,
            ReportPatch {
                title: Some("Renamed".to_string()),
                ..ReportPatch::default()
            },
        )
        .expect("update");
    state.apply_updated(renamed);
    service.delete(&added.id).expect("delete");
    state.apply_deleted(&added.id);

    let stored = service.list("sires", None).expect("list");
    assert_eq!(state, ReportListState::Ready(stored));

    let failed: Result<Vec<_>, RepoError> = Err(RepoError::Store("database is locked".to_string()));
    assert_eq!(
        ReportListState::from_result(failed),
        ReportListState::Error("database is locked".to_string())
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn reports_cannot_be_added_before_the_list_loads() {
    let (service, temp_dir) = sqlite_service("add-while-loading");
    let mut state = ReportListState::default();
    assert!(!state.accepts_changes());

    let saved = service.create(draft("Early", "sires")).expect("create");
    state.apply_created(saved);
    assert_eq!(state, ReportListState::Loading);

    let failed: Result<Vec<_>, RepoError> = Err(RepoError::Store("offline".to_string()));
    assert!(!ReportListState::from_result(failed).accepts_changes());

    let state = ReportListState::from_result(service.list("sires", None));
    assert!(state.accepts_changes());
    assert_eq!(state.reports().len(), 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

struct FakeSource {
    failing: Option<DatasetKind>,
}

#[async_trait]
impl DatasetSource for FakeSource {
    async fn fetch_dataset(&self, kind: DatasetKind) -> Result<Value, FetchError> {
        if self.failing == Some(kind) {
            return Err(FetchError::Status {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(json!([
            { "Name": format!("{}-1", kind.slug()), "Year": 2023 },
            { "Name": format!("{}-2", kind.slug()), "Year": 2024 },
        ]))
    }

    async fn fetch_jockey_analytics(&self) -> Result<JockeyData, FetchError> {
        Ok(JockeyData::default())
    }
}

#[derive(Default)]
struct FakePlots {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl PlotSource for FakePlots {
    async fn generate_plot(&self, prompt: &str) -> Result<PlotSpec, FetchError> {
        self.prompts
            .lock()
            .expect("prompt log should not be poisoned")
            .push(prompt.to_string());
        PlotSpec::from_encoded(r#"{"data":[{"type":"bar"}],"layout":{}}"#).map_err(FetchError::from)
    }
}

#[tokio::test]
async fn auctions_load_all_three_tables() {
    let service = DatasetService::new(
        Arc::new(FakeSource { failing: None }),
        Arc::new(FakePlots::default()),
    );

    let bundle = service.load_auctions().await.expect("bundle should load");

    for kind in DatasetKind::ALL {
        assert_eq!(bundle.records(kind).len(), 2, "{}", kind.slug());
    }
    assert_eq!(
        bundle.records(DatasetKind::Horses)[0].value("Name"),
        &CellValue::from("horses-1")
    );
}

#[tokio::test]
async fn auctions_fail_together_when_one_table_fails() {
    let service = DatasetService::new(
        Arc::new(FakeSource {
            failing: Some(DatasetKind::Horses),
        }),
        Arc::new(FakePlots::default()),
    );

    let err = service
        .load_auctions()
        .await
        .expect_err("one failing table should fail the bundle");

    assert_eq!(
        err,
        FetchError::Status {
            status: 503,
            message: "unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn plot_prompts_are_trimmed_before_sending() {
    let plots = Arc::new(FakePlots::default());
    let service = DatasetService::new(Arc::new(FakeSource { failing: None }), plots.clone());

    let spec = service
        .generate_plot("  price by sire \n")
        .await
        .expect("plot should generate");

    assert_eq!(spec.data, json!([{ "type": "bar" }]));
    assert_eq!(
        *plots.prompts.lock().expect("prompt log should not be poisoned"),
        vec!["price by sire".to_string()]
    );
}

#[tokio::test]
async fn local_directory_serves_csv_and_json_exports() {
    let temp_dir = unique_test_dir("local-data");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    fs::write(
        temp_dir.join("dams.csv"),
        "Name,PRS,Inbreeding Coef.\nLuna,1.5,0.12\nSol,,0.08\n",
    )
    .expect("should write csv");
    fs::write(
        temp_dir.join("horses.json"),
        r#"[{"Name": "Trueno", "Year": "2023"}]"#,
    )
    .expect("should write json");
    fs::write(
        temp_dir.join("jockeys.json"),
        r#"{"metadata": {"exportDate": "2024-05-01", "numJockeys": 1}, "jockeys": [{"id": 7, "name": "A. Perez"}]}"#,
    )
    .expect("should write jockeys");

    let source = Arc::new(LocalDataDir::new(temp_dir.clone()));
    let service = DatasetService::new(source, Arc::new(FakePlots::default()));

    let dams = service.load(DatasetKind::Dams).await.expect("dams should load");
    assert_eq!(dams.len(), 2);
    assert_eq!(dams[0].value("PRS"), &CellValue::Number(1.5));
    assert_eq!(dams[1].value("PRS"), &CellValue::Null);

    let horses = service.load(DatasetKind::Horses).await.expect("horses should load");
    assert_eq!(horses[0].value("Name"), &CellValue::from("Trueno"));

    let jockeys = service
        .load_jockey_analytics()
        .await
        .expect("jockeys should load");
    assert_eq!(jockeys.metadata.export_date, "2024-05-01");
    assert_eq!(jockeys.find(7).map(|j| j.name.as_str()), Some("A. Perez"));

    let missing = service.load(DatasetKind::PastAuctions).await;
    assert!(matches!(missing, Err(FetchError::Local(_))), "{missing:?}");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[tokio::test]
async fn non_array_payloads_are_rejected_at_ingestion() {
    struct ObjectSource;

    #[async_trait]
    impl DatasetSource for ObjectSource {
        async fn fetch_dataset(&self, _kind: DatasetKind) -> Result<Value, FetchError> {
            Ok(json!({ "error": "rate limited" }))
        }

        async fn fetch_jockey_analytics(&self) -> Result<JockeyData, FetchError> {
            Err(FetchError::Network("offline".to_string()))
        }
    }

    let service = DatasetService::new(Arc::new(ObjectSource), Arc::new(FakePlots::default()));

    assert!(matches!(
        service.load(DatasetKind::Dams).await,
        Err(FetchError::Deserialize(_))
    ));
    assert_eq!(
        service.load_jockey_analytics().await,
        Err(FetchError::Network("offline".to_string()))
    );
}

#[test]
fn config_file_then_environment() {
    let temp_dir = unique_test_dir("config");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("config.toml");
    fs::write(
        &path,
        "api_base_url = \"http://localhost:8000\"\nhttp_timeout_secs = 5\n",
    )
    .expect("should write config");

    let mut config = AppConfig::from_file(&path).expect("config should parse");
    assert_eq!(config.api_base_url, "http://localhost:8000");
    assert_eq!(config.jockey_url(), "http://localhost:8000/data/jockeys.json");
    assert_eq!(config.http_timeout(), Some(std::time::Duration::from_secs(5)));

    config.apply_env(|key| match key {
        "MOVE37_SUPABASE_URL" => Some("https://project.supabase.co".to_string()),
        "MOVE37_SUPABASE_KEY" => Some("anon".to_string()),
        "MOVE37_DATA_DIR" => Some("/srv/exports".to_string()),
        "MOVE37_HTTP_TIMEOUT_SECS" => Some("soon".to_string()),
        _ => None,
    });
    assert_eq!(
        config.supabase.as_ref().map(|s| s.url.as_str()),
        Some("https://project.supabase.co")
    );
    assert_eq!(config.data_dir, Some(PathBuf::from("/srv/exports")));
    assert_eq!(config.http_timeout_secs, 5, "invalid override is ignored");

    let defaults = AppConfig::from_file(&temp_dir.join("absent.toml")).expect("defaults");
    assert_eq!(defaults, AppConfig::default());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn start_path_selects_the_first_section() {
    let mut config = AppConfig::default();
    assert_eq!(config.start_section(), Section::Home);

    config.apply_env(|key| (key == "MOVE37_START_PATH").then(|| "/auctions".to_string()));
    assert_eq!(config.start_section(), Section::Auctions);

    config.start_path = Some("/criador/nowhere".to_string());
    assert_eq!(config.start_section(), Section::Home);
}

#[test]
fn supabase_needs_both_url_and_key() {
    let mut config = AppConfig::default();
    config.apply_env(|key| (key == "MOVE37_SUPABASE_URL").then(|| "https://x.supabase.co".to_string()));
    assert_eq!(config.supabase, None);
}

#[test]
fn table_container_scrolls() {
    let style = table_container_style();
    assert!(style.contains("overflow: auto"));
    assert!(style.contains("min-height: 0"));
}

#[test]
fn gradient_cells_carry_their_shade() {
    let column = ColumnSpec::new("PRS").gradient(GradientPolarity::HigherIsBetter);
    assert!(body_cell_style(&column, Some(1.0)).contains("rgba(0, 255, 0, 0.500)"));
    assert!(!body_cell_style(&column, None).contains("rgba"));
}
