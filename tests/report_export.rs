use pnl_dashboard::cli::commands::ReportArgs;
use pnl_dashboard::cli::report::handle_report;
use pnl_dashboard::db::Database;
use pnl_dashboard::errors::DashboardError;
use pnl_dashboard::models::ProjectStatus;
use tempfile::TempDir;

fn seeded_db(dir: &TempDir) -> String {
    let path = dir.path().join("pnl.db");
    let db = Database::new(path.to_str().unwrap()).unwrap();
    db.upsert_project("p1", "Website", Some("Globex"), ProjectStatus::Active).unwrap();
    db.upsert_project("p2", "Mobile App", None, ProjectStatus::Completed).unwrap();
    db.upsert_financials("p1", "2024-01", 1000.0, 600.0).unwrap();
    db.upsert_financials("p1", "2024-02", 500.0, 100.0).unwrap();
    db.upsert_financials("p2", "2024-03", 2000.0, 2500.0).unwrap();
    path.to_string_lossy().into_owned()
}

fn args(db: &str, format: &str, output: Option<String>) -> ReportArgs {
    ReportArgs {
        db: Some(db.to_string()),
        config: None,
        from: None,
        to: None,
        format: format.to_string(),
        output,
    }
}

#[tokio::test]
async fn test_report_writes_csv_file() {
    let dir = TempDir::new().unwrap();
    let db = seeded_db(&dir);
    let out = dir.path().join("out").join("report.csv");

    let written = handle_report(args(&db, "csv", Some(out.to_string_lossy().into_owned())))
        .await
        .unwrap();
    assert_eq!(written.as_deref(), Some(out.as_path()));

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "project_id,project_name,revenue,costs,profit,profit_margin_pct");
    assert_eq!(lines[1], "p1,Website,1500,700,800,53.33");
    assert_eq!(lines[2], "p2,Mobile App,2000,2500,-500,-25");
    assert_eq!(lines[3], ",TOTAL,3500,3200,300,8.57");
}

#[tokio::test]
async fn test_report_window_limits_rows() {
    let dir = TempDir::new().unwrap();
    let db = seeded_db(&dir);
    let out = dir.path().join("jan.md");

    let mut report_args = args(&db, "markdown", Some(out.to_string_lossy().into_owned()));
    report_args.from = Some("2024-01".to_string());
    report_args.to = Some("2024-01-31".to_string());
    handle_report(report_args).await.unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("**Period:** Jan 2024 to Jan 2024"));
    assert!(content.contains("| Revenue | £1,000.00 |"));
    assert!(content.contains("| Website |"));
    assert!(!content.contains("Mobile App"));
}

#[tokio::test]
async fn test_report_missing_database() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.db");
    let err = handle_report(args(missing.to_str().unwrap(), "csv", None)).await.unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
    assert!(!missing.exists());
}

#[tokio::test]
async fn test_report_unknown_format() {
    let dir = TempDir::new().unwrap();
    let db = seeded_db(&dir);
    let err = handle_report(args(&db, "pdf", None)).await.unwrap_err();
    assert!(matches!(err, DashboardError::InvalidInput(_)));
}
