use thiserror::Error;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid dimension: {field} must be a positive integer, got {value}")]
    InvalidDimension { field: String, value: String },

    #[error("Invalid maze: {reason}")]
    InvalidMaze { reason: String },

    #[error("Maze too large: {cells} cells requested, limit is {max_cells}")]
    ResourceLimitExceeded { cells: u128, max_cells: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Resource,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MazeError {
    pub fn invalid_dimension(field: &str, value: impl ToString) -> Self {
        MazeError::InvalidDimension {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_maze(reason: impl Into<String>) -> Self {
        MazeError::InvalidMaze {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MazeError::InvalidDimension { .. } | MazeError::InvalidMaze { .. } => {
                ErrorCategory::Input
            }
            MazeError::ResourceLimitExceeded { .. } => ErrorCategory::Resource,
            MazeError::ConfigValidationError { .. }
            | MazeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MazeError::IoError(_) | MazeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Resource => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for printing to a terminal or an API client.
    pub fn user_friendly_message(&self) -> String {
        match self {
            MazeError::InvalidDimension { field, value } => {
                format!("Maze {} must be at least 1 (got {})", field, value)
            }
            MazeError::InvalidMaze { reason } => format!("Maze data is not valid: {}", reason),
            MazeError::ResourceLimitExceeded { cells, max_cells } => format!(
                "Requested maze has {} cells, which is more than the allowed {}",
                cells, max_cells
            ),
            MazeError::IoError(e) => format!("Could not read or write a file: {}", e),
            MazeError::SerializationError(e) => format!("Could not encode the maze: {}", e),
            MazeError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            MazeError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MazeError::InvalidDimension { .. } => "Pass a width and height of 1 or more",
            MazeError::InvalidMaze { .. } => "Load a maze file written by maze-forge",
            MazeError::ResourceLimitExceeded { .. } => {
                "Request a smaller maze or raise max_cells in the configuration"
            }
            MazeError::IoError(_) => "Check that the output directory exists and is writable",
            MazeError::SerializationError(_) => "This is a bug; please report it",
            MazeError::ConfigValidationError { .. } | MazeError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
