use crate::utils::error::{MazeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MazeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MazeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(MazeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Output file names are plain names with one of the allowed extensions,
/// no directory components.
pub fn validate_file_name(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let invalid = |reason: String| MazeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: file.to_string(),
        reason,
    };

    if file.contains('/') || file.contains('\\') {
        return Err(invalid("File name must not contain path separators".to_string()));
    }

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(invalid(format!(
            "Unsupported file extension: {}. Allowed extensions: {}",
            extension,
            allowed_extensions.join(", ")
        ))),
        None => Err(invalid("File has no extension or invalid filename".to_string())),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MazeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./mazes").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("maze.width", 5, 1).is_ok());
        assert!(validate_positive_number("maze.width", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("output.file_name", "maze.json", &["json"]).is_ok());
        assert!(validate_file_name("output.file_name", "maze.txt", &["json"]).is_err());
        assert!(validate_file_name("output.file_name", "maze", &["json"]).is_err());
        assert!(validate_file_name("output.file_name", "../maze.json", &["json"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("maze.count", 3, 1, 100).is_ok());
        assert!(validate_range("maze.count", 0, 1, 100).is_err());
        assert!(validate_range("maze.count", 101, 1, 100).is_err());
    }
}
