/// Errors produced by objective functions, the experiment driver and the chart/export writers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when an objective function receives input with the wrong number of columns
    /// (or a point with the wrong number of coordinates).
    #[error("shape mismatch: expected {expected}-dimensional input but got {got} columns")]
    Shape {
        /// The number of columns the function requires.
        expected: usize,
        /// The number of columns that were supplied.
        got: usize,
    },

    /// Returned when a contour animation is requested for a run that did not record particle
    /// positions.
    #[error("run \"{0}\" has no recorded particle positions")]
    MissingHistory(String),

    /// Returned when an experiment configuration holds values no run can use, such as zero
    /// iterations or a negative coefficient.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when a chart or history file cannot be written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a history cannot be serialized to a pickle file.
    #[error("pickle error: {0}")]
    Pickle(#[from] serde_pickle::Error),
}

impl From<std::convert::Infallible> for Error {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}

/// A convenience alias for `Result<T, goldswarm::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = Error::Shape {
            expected: 2,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch: expected 2-dimensional input but got 3 columns"
        );
    }

    #[test]
    fn test_invalid_config_message() {
        let err = Error::InvalidConfig("c1 must be non-negative (got -0.5)".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: c1 must be non-negative (got -0.5)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
