pub mod assembler;
pub mod exporter;
pub mod formatter;

pub use assembler::assemble_report;
pub use exporter::{render_report, ReportDocument, ReportFormat};
