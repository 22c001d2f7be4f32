pub use serde::{Serialize, Deserialize};

pub use ndarray::{Array2, ArrayView1};
pub use ndarray_rand::RandomExt;
pub use ndarray_rand::rand_distr::Uniform;

pub use crate::config::NetworkConfig;
pub use crate::models::{Network, NetworkBuilder};
pub use crate::trainer::{ErrorSample, Logging, StopCondition, Trainer, TrainingReport};
pub use crate::error::*;

// Internal re-exports
pub use crate::core::{
    Connection,
    Connections,
    Layer,
    MomentumSgd,
    Neuron,
    RecentAverage,
};
