pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod prelude;
pub mod trainer;
pub mod utils;

// Re-export types
pub use config::NetworkConfig;
pub use crate::core::{Connection, Layer, MomentumSgd, Neuron};
pub use error::{NNError, Result};
pub use models::{Network, NetworkBuilder};
pub use trainer::{Logging, StopCondition, Trainer, TrainingReport};

pub mod plot {
    pub mod plot_errors_over_epochs;
    pub use plot_errors_over_epochs::plot_errors_over_epochs;
}
