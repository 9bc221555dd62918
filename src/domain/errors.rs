use thiserror::Error;

/// Errors raised while constructing a vehicle record from user input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("{field} must be one of {allowed:?}, got {value}")]
    NotAllowed {
        field: &'static str,
        allowed: &'static [u8],
        value: u8,
    },

    #[error("Unknown {field} value: '{value}'")]
    UnknownVariant { field: &'static str, value: String },
}

/// Errors related to reading and shaping the training dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {path}")]
    NotFound { path: String },

    #[error("Target column '{column}' is missing from the dataset")]
    MissingTarget { column: String },

    #[error("No schema feature is present in the dataset columns")]
    NoFeatures,

    #[error("No labelled rows left after dropping rows with missing {column}")]
    NoLabelledRows { column: String },

    #[error("Invalid value '{value}' in numeric column '{column}' (row {row})")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while fitting the preprocessing + regression pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Cannot fit {stage} on empty data")]
    EmptyData { stage: &'static str },

    #[error("Feature list is empty")]
    NoFeatures,

    #[error("Invalid training value: {0}")]
    InvalidValue(#[from] PredictionError),

    #[error("Regressor error: {0}")]
    Regressor(String),
}

/// Anything that stops a training run
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Test size must be in [0, 1), got {0}")]
    InvalidTestSize(f64),
}

/// Per-request inference failures, surfaced to the user
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Column '{column}' expects a number, got '{value}'")]
    NotNumeric { column: String, value: String },

    #[error("Feature vector has {got} values, model expects {expected}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("Model inference failed: {0}")]
    Inference(String),

    #[error("Model returned no prediction")]
    EmptyOutput,

    #[error("Model returned a non-finite price: {0}")]
    NonFinite(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_formatting() {
        let err = ValidationError::OutOfRange {
            field: "year",
            min: 1990,
            max: 2025,
            value: 1989,
        };

        let msg = err.to_string();
        assert!(msg.contains("year"));
        assert!(msg.contains("1990"));
        assert!(msg.contains("1989"));
    }

    #[test]
    fn test_prediction_error_formatting() {
        let err = PredictionError::NotNumeric {
            column: "mileage".to_string(),
            value: "lots".to_string(),
        };

        assert_eq!(err.to_string(), "Column 'mileage' expects a number, got 'lots'");
    }
}
