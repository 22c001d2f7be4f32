//! Online training loop.
//!
//! ```
//! # use bpnet::prelude::*;
//! let examples = [([0.0, 0.0], [0.0]),
//!                 ([0.0, 1.0], [1.0]),
//!                 ([1.0, 0.0], [1.0]),
//!                 ([1.0, 1.0], [0.0])];
//!
//! let mut network = Network::builder().topology(&[2, 3, 1]).seed(1).build().unwrap();
//! let report = Trainer::new()
//!     .stop_condition(StopCondition::Iterations(200))
//!     .logging(Logging::Silent)
//!     .train(&mut network, &examples[..])
//!     .unwrap();
//!
//! assert_eq!(report.iterations, 200);
//! assert_eq!(report.history.len(), 200);
//! ```

use crate::prelude::*;
use log::{info, warn};

/// When to stop training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StopCondition {
    /// Stops after the provided number of training iterations
    Iterations(usize),
    /// Stops once the recent average error drops below the threshold.
    ///
    /// The running average starts at zero, so it is only consulted after
    /// `ceil(k)` iterations, `k` being the network's smoothing window.
    ErrorThreshold(f64),
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// Nothing is logged
    Silent,
    /// A summary is logged at completion
    Completion,
    /// A line is logged every `n` iterations, plus the summary
    Iterations(usize),
}

impl Logging {
    fn iteration(&self, sample: &ErrorSample) {
        if let Logging::Iterations(freq) = *self {
            if freq > 0 && sample.iteration % freq == 0 {
                info!(
                    "Iteration {}:\terror={:.6}\trecent average={:.6}",
                    sample.iteration, sample.current_error, sample.recent_average_error
                );
            }
        }
    }

    fn completion(&self, report: &TrainingReport) {
        if let Logging::Silent = self {
            return;
        }
        info!(
            "Training completed after {} iterations, recent average error {:.6}",
            report.iterations, report.final_recent_average_error
        );
    }
}

/// Errors observed after one training step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ErrorSample {
    pub iteration: usize,
    pub current_error: f64,
    pub recent_average_error: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub iterations: usize,
    pub final_error: f64,
    pub final_recent_average_error: f64,
    /// False when an error threshold was set and the iteration cap hit first.
    pub converged: bool,
    pub history: Vec<ErrorSample>,
}

/// Trains a [`Network`] on a fixed set of examples.
#[derive(Debug, Clone)]
pub struct Trainer {
    stop_condition: StopCondition,
    logging: Logging,
    max_iterations: usize,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Trainer {
    /// Defaults: 1000 iterations, completion logging, a cap of 100 000
    /// iterations for threshold-based stopping.
    pub fn new() -> Self {
        Self {
            stop_condition: StopCondition::Iterations(1000),
            logging: Logging::Completion,
            max_iterations: 100_000,
        }
    }

    pub fn stop_condition(mut self, stop_condition: StopCondition) -> Self {
        self.stop_condition = stop_condition;
        self
    }

    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Upper bound on iterations when stopping on an error threshold.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn train<I, T>(&self, network: &mut Network, examples: &[(I, T)]) -> Result<TrainingReport>
    where
        I: AsRef<[f64]>,
        T: AsRef<[f64]>,
    {
        if examples.is_empty() {
            return Err(NNError::EmptyTrainingSet);
        }
        let warmup = network.config().error_smoothing_window.ceil() as usize;
        let mut history = Vec::new();
        let mut converged = true;

        for (n, (input, target)) in examples.iter().cycle().enumerate() {
            match self.stop_condition {
                StopCondition::Iterations(limit) if n >= limit => break,
                StopCondition::ErrorThreshold(threshold) => {
                    if n >= warmup.max(1) && network.recent_average_error() < threshold {
                        break;
                    }
                    if n >= self.max_iterations {
                        warn!(
                            "stopping after {} iterations without reaching error threshold {}",
                            n, threshold
                        );
                        converged = false;
                        break;
                    }
                }
                _ => {}
            }

            let current_error = network.train_sample(input.as_ref(), target.as_ref())?;
            let sample = ErrorSample {
                iteration: n + 1,
                current_error,
                recent_average_error: network.recent_average_error(),
            };
            self.logging.iteration(&sample);
            history.push(sample);
        }

        let report = TrainingReport {
            iterations: history.len(),
            final_error: network.current_error(),
            final_recent_average_error: network.recent_average_error(),
            converged,
            history,
        };
        self.logging.completion(&report);
        Ok(report)
    }
}
