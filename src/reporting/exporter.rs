use std::fmt;
use std::str::FromStr;
use crate::errors::DashboardError;
use crate::models::PnlReport;
use super::formatter::{format_currency, format_month, format_percent, round2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Spreadsheet-friendly, plain numbers.
    #[default]
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "excel" | "xlsx" => Ok(Self::Csv),
            "md" | "markdown" => Ok(Self::Markdown),
            other => Err(format!("unsupported export format '{}'", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Markdown => f.write_str("markdown"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

pub fn render_report(report: &PnlReport, format: ReportFormat) -> Result<ReportDocument, DashboardError> {
    let body = match format {
        ReportFormat::Csv => render_csv(report)?,
        ReportFormat::Markdown => render_markdown(report).into_bytes(),
    };
    let stamp = report.stats.date_to.as_deref().unwrap_or("all-time");
    Ok(ReportDocument {
        filename: format!("pnl-report-{}.{}", stamp, format.extension()),
        content_type: format.content_type(),
        body,
    })
}

fn render_csv(report: &PnlReport) -> Result<Vec<u8>, DashboardError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["project_id", "project_name", "revenue", "costs", "profit", "profit_margin_pct"])?;

    for p in &report.projects {
        wtr.write_record([
            spreadsheet_safe(&p.project_id),
            spreadsheet_safe(&p.project_name),
            round2(p.actual_revenue).to_string(),
            round2(p.actual_costs).to_string(),
            round2(p.profit).to_string(),
            round2(p.profit_margin).to_string(),
        ])?;
    }

    let stats = &report.stats;
    wtr.write_record([
        String::new(),
        "TOTAL".to_string(),
        round2(stats.total_revenue).to_string(),
        round2(stats.total_costs).to_string(),
        round2(stats.total_profit).to_string(),
        round2(stats.profit_margin).to_string(),
    ])?;

    wtr.into_inner()
        .map_err(|e| DashboardError::Export(format!("Failed to flush CSV: {}", e)))
}

/// Prefix text that a spreadsheet would evaluate as a formula with `'`.
fn spreadsheet_safe(text: &str) -> String {
    match text.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{}", text),
        _ => text.to_string(),
    }
}

fn render_markdown(report: &PnlReport) -> String {
    let stats = &report.stats;
    let period = match (&stats.date_from, &stats.date_to) {
        (Some(from), Some(to)) => format!("{} to {}", format_month(from), format_month(to)),
        (Some(from), None) => format!("From {}", format_month(from)),
        (None, Some(to)) => format!("Up to {}", format_month(to)),
        (None, None) => "All time".to_string(),
    };

    let mut out = String::new();
    out.push_str(&format!("# Profit & Loss Report: {}\n\n", stats.company_name));
    out.push_str(&format!("**Period:** {}\n\n", period));
    out.push_str("## Summary\n\n| Metric | Value |\n|---|---|\n");
    out.push_str(&format!("| Revenue | {} |\n", format_currency(stats.total_revenue)));
    out.push_str(&format!("| Costs | {} |\n", format_currency(stats.total_costs)));
    out.push_str(&format!("| Profit | {} |\n", format_currency(stats.total_profit)));
    out.push_str(&format!("| Margin | {} |\n", format_percent(stats.profit_margin)));
    out.push_str(&format!("| Active projects | {} |\n", stats.active_projects));
    out.push_str(&format!("| Pending invoices | {} |\n", stats.pending_invoices));
    out.push_str(&format!("| Overdue invoices | {} |\n", stats.overdue_invoices));

    out.push_str("\n## Projects\n\n");
    if report.projects.is_empty() {
        out.push_str("No project activity in this period.\n");
        return out;
    }

    out.push_str("| Project | Revenue | Costs | Profit | Margin |\n|---|---:|---:|---:|---:|\n");
    for p in &report.projects {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            p.project_name.replace('|', "\\|"),
            format_currency(p.actual_revenue),
            format_currency(p.actual_costs),
            format_currency(p.profit),
            format_percent(p.profit_margin),
        ));
    }
    out
}
