// src/core.rs
pub mod activations;
pub mod connections;
pub mod layers;
pub mod losses;
pub mod neurons;
pub mod optimizers;

// Re-export commonly used items
pub use activations::{transfer, transfer_derivative};
pub use connections::{Connection, Connections};
pub use layers::Layer;
pub use losses::{rms_error, RecentAverage};
pub use neurons::Neuron;
pub use optimizers::MomentumSgd;
