use crate::core::generator::MazeGenerator;
use crate::domain::model::Maze;
use crate::utils::error::{MazeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Side length used when a request leaves a dimension out.
pub const DEFAULT_DIMENSION: i64 = 15;

/// The `{ "width": .., "height": .. }` body accepted at the service boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRequest {
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

impl MazeRequest {
    pub fn new(width: Option<i64>, height: Option<i64>) -> Self {
        Self { width, height }
    }

    /// Reads a request from an arbitrary JSON body. A `null` body or missing /
    /// `null` fields fall back to the defaults; anything that is not an integer
    /// is rejected as an invalid dimension.
    pub fn from_json_value(body: &Value) -> Result<Self> {
        match body {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => Ok(Self {
                width: dimension_field("width", fields.get("width"))?,
                height: dimension_field("height", fields.get("height"))?,
            }),
            other => Err(MazeError::invalid_dimension("request", other)),
        }
    }

    pub fn from_json_str(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_json_value(&value)
    }

    /// Resolves defaults and checks both sides are positive.
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        let width = resolve("width", self.width)?;
        let height = resolve("height", self.height)?;
        Ok((width, height))
    }
}

fn dimension_field(name: &str, value: Option<&Value>) -> Result<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| MazeError::invalid_dimension(name, v)),
    }
}

fn resolve(name: &str, value: Option<i64>) -> Result<usize> {
    let value = value.unwrap_or(DEFAULT_DIMENSION);
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(MazeError::invalid_dimension(name, value)),
    }
}

/// Validates the request and carves a maze with `generator`.
pub fn handle_request(request: &MazeRequest, generator: &MazeGenerator) -> Result<Maze> {
    let (width, height) = request.dimensions()?;
    tracing::info!("Generating {}x{} maze", width, height);
    generator.generate(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_fields_default_to_fifteen() {
        let request = MazeRequest::from_json_value(&json!({})).unwrap();
        assert_eq!(request.dimensions().unwrap(), (15, 15));

        let request = MazeRequest::from_json_value(&json!({"width": null, "height": 4})).unwrap();
        assert_eq!(request.dimensions().unwrap(), (15, 4));

        let request = MazeRequest::from_json_value(&Value::Null).unwrap();
        assert_eq!(request, MazeRequest::default());
    }

    #[test]
    fn test_non_positive_dimensions_are_rejected() {
        for (w, h) in [(0, 5), (5, 0), (-3, 5), (5, -1)] {
            let request = MazeRequest::new(Some(w), Some(h));
            assert!(matches!(
                request.dimensions(),
                Err(MazeError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn test_non_integer_fields_are_rejected() {
        for body in [json!({"width": "ten"}), json!({"height": 2.5}), json!({"width": true})] {
            assert!(matches!(
                MazeRequest::from_json_value(&body),
                Err(MazeError::InvalidDimension { .. })
            ));
        }
        assert!(matches!(
            MazeRequest::from_json_value(&json!([1, 2])),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_from_json_str() {
        let request = MazeRequest::from_json_str(r#"{"width": 8, "height": 6}"#).unwrap();
        assert_eq!(request, MazeRequest::new(Some(8), Some(6)));
        assert!(matches!(
            MazeRequest::from_json_str("{not json"),
            Err(MazeError::SerializationError(_))
        ));
    }

    #[test]
    fn test_handle_request_uses_generator() {
        let generator = MazeGenerator::default().with_seed(9);
        let maze = handle_request(&MazeRequest::new(Some(3), None), &generator).unwrap();
        assert_eq!((maze.width(), maze.height()), (3, 15));
        assert_eq!(maze, generator.generate(3, 15).unwrap());
    }
}
