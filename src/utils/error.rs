use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumnError {
        column: String,
        available: Vec<String>,
    },

    #[error("Scoring error: {message}")]
    ScoringError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Scoring,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::MissingColumnError { .. } => ErrorCategory::Configuration,
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => ErrorCategory::Input,
            EtlError::ScoringError { .. } => ErrorCategory::Scoring,
            EtlError::ZipError(_) | EtlError::SerializationError(_) => ErrorCategory::Output,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Scoring => ErrorSeverity::Low,
            // 換一個檔案或欄位即可重試
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::MissingColumnError { available, .. } => {
                format!("Pick one of the available columns: {}", available.join(", "))
            }
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => {
                "Check that the input is a well-formed CSV file with a header row".to_string()
            }
            EtlError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            EtlError::InvalidConfigValueError { field, .. }
            | EtlError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            EtlError::ScoringError { .. } => {
                "The affected text was marked Unknown; shorten or clean the input".to_string()
            }
            EtlError::ZipError(_) | EtlError::SerializationError(_) => {
                "Check the output formats and free disk space".to_string()
            }
            EtlError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MissingColumnError { column, .. } => {
                format!("找不到欄位 '{}'", column)
            }
            EtlError::CsvError(e) => format!("無法讀取 CSV 檔案: {}", e),
            EtlError::IoError(e) => format!("檔案存取失敗: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
