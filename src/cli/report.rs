use std::path::{Path, PathBuf};
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::info;
use crate::cli::commands::ReportArgs;
use crate::config::load_config;
use crate::db::Database;
use crate::errors::DashboardError;
use crate::models::ReportWindow;
use crate::reporting::{assemble_report, render_report, ReportFormat};

/// Export a report straight from the database file. Writes to `--output`
/// when given, otherwise to stdout.
pub async fn handle_report(args: ReportArgs) -> Result<Option<PathBuf>, DashboardError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;
    let db_path = args.db.clone().unwrap_or_else(|| config.database_path().to_string());
    if !Path::new(&db_path).exists() {
        return Err(DashboardError::NotFound(format!("Database {}", db_path)));
    }

    let format: ReportFormat = args.format.parse().map_err(DashboardError::InvalidInput)?;
    let window = ReportWindow::parse(args.from.as_deref(), args.to.as_deref())?;

    let db = Database::new(&db_path)?;
    let report = assemble_report(&db, config.company_name(), &window, Utc::now().date_naive())?;
    let doc = render_report(&report, format)?;

    match args.output {
        Some(output) => {
            let path = PathBuf::from(output);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &doc.body).await?;
            info!(format = %format, path = %path.display(), projects = report.projects.len(), "Report written");
            Ok(Some(path))
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&doc.body).await?;
            stdout.flush().await?;
            Ok(None)
        }
    }
}
