use crate::prelude::*;

/// Online gradient step with momentum.
///
/// Every update of a weight is `eta * source_output * gradient + alpha *
/// previous_update`, applied immediately after each training example.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MomentumSgd {
    /// `eta`
    pub learning_rate: f64,
    /// `alpha`
    pub momentum: f64,
}

impl Default for MomentumSgd {
    fn default() -> Self {
        Self {
            learning_rate: 0.15,
            momentum: 0.5,
        }
    }
}

impl MomentumSgd {
    pub fn new(learning_rate: f64, momentum: f64) -> Result<Self> {
        let opt = Self {
            learning_rate,
            momentum,
        };
        opt.validate()?;
        Ok(opt)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(NNError::InvalidHyperparameter(format!(
                "learning rate must be finite and non-negative, got {}",
                self.learning_rate
            )));
        }
        if !self.momentum.is_finite() || self.momentum < 0.0 {
            return Err(NNError::InvalidHyperparameter(format!(
                "momentum must be finite and non-negative, got {}",
                self.momentum
            )));
        }
        Ok(())
    }

    /// Size of the next update for an edge.
    pub fn delta(&self, source_output: f64, gradient: f64, previous_delta: f64) -> f64 {
        self.learning_rate * source_output * gradient + self.momentum * previous_delta
    }

    /// Applies one update to `connection` in place.
    pub fn step(&self, connection: &mut Connection, source_output: f64, gradient: f64) {
        let delta = self.delta(source_output, gradient, connection.momentum);
        connection.momentum = delta;
        connection.weight += delta;
    }
}
