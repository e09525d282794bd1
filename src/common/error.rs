//! Error types for prm_planner

use thiserror::Error;

/// Main error type for roadmap planning
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Malformed bounds, obstacles, configuration or query points
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rejection sampling gave up before finding a free point
    #[error("Sampling exhausted: no collision-free point after {attempts} attempts")]
    SamplingExhausted { attempts: usize },

    /// Search frontier emptied before the goal was reached
    #[error("No path found")]
    NoPathFound,

    /// Geometry with zero length or zero area where a proper shape is required
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Search expanded more vertices than its budget allows
    #[error("Search budget exceeded after {expansions} expansions")]
    SearchBudgetExceeded { expansions: usize },

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for PlannerError {
    fn from(e: toml::de::Error) -> Self {
        PlannerError::Config(e.to_string())
    }
}

/// Result type alias for planning operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::NoPathFound;
        assert_eq!(format!("{}", err), "No path found");

        let err = PlannerError::SamplingExhausted { attempts: 42 };
        assert_eq!(
            format!("{}", err),
            "Sampling exhausted: no collision-free point after 42 attempts"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlannerError = io_err.into();
        assert!(matches!(err, PlannerError::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: PlannerError = toml_err.into();
        assert!(matches!(err, PlannerError::Config(_)));
    }
}
