use thiserror::Error;

#[derive(Error, Debug)]
pub enum NNError {
    // Model related errors
    #[error("Invalid layer configuration: {0}")]
    InvalidLayerConfiguration(String),

    #[error("Invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    // Training related errors
    #[error("Invalid input shape: expected {expected} values, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },

    #[error("Invalid target shape: expected {expected} values, got {actual}")]
    InvalidTargetShape { expected: usize, actual: usize },

    #[error("Training set has no examples")]
    EmptyTrainingSet,

    // File operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Plot error: {0}")]
    PlotError(String),
}

pub type Result<T> = std::result::Result<T, NNError>;
