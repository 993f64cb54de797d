use super::types::DashboardError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Caused by the caller's input rather than by the service itself.
    pub client_fault: bool,
    pub exit_code: i32,
}

impl DashboardError {
    /// Classify this error for logging, HTTP mapping and CLI exit codes.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, client_fault, exit_code) = match self {
            DashboardError::Config(_) => ("ConfigError", true, 2),
            DashboardError::Authentication(_) => ("AuthenticationError", true, 4),
            DashboardError::NotFound(_) => ("NotFoundError", true, 1),
            DashboardError::Conflict(_) => ("ConflictError", true, 1),
            DashboardError::InvalidInput(_) => ("InvalidInputError", true, 5),
            DashboardError::Yaml(_) => ("YamlError", true, 2),
            DashboardError::Database(_) => ("DatabaseError", false, 3),
            DashboardError::Export(_) => ("ExportError", false, 1),
            DashboardError::Network(_) => ("NetworkError", false, 1),
            DashboardError::Io(_) => ("IoError", false, 1),
            DashboardError::Csv(_) => ("CsvError", false, 1),
            DashboardError::Internal(_) => ("InternalError", false, 1),
        };
        ErrorClassification { error_type, client_fault, exit_code }
    }
}
