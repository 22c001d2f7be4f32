use crate::prelude::*;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Neurons per layer, bias excluded. First entry is the input width, last
    /// entry the output width.
    pub topology: Vec<usize>,
    /// Builds only the first `layer_count` sizes of `topology` when set.
    pub layer_count: Option<usize>,
    /// `eta`
    pub learning_rate: f64,
    /// `alpha`
    pub momentum: f64,
    /// `k` of the recent average error.
    pub error_smoothing_window: f64,
    /// Seed for weight initialisation when the network creates its own
    /// generator.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let optimizer = MomentumSgd::default();
        Self {
            topology: vec![9, 5, 3, 3, 1],
            layer_count: None,
            learning_rate: optimizer.learning_rate,
            momentum: optimizer.momentum,
            error_smoothing_window: 100.0,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn new(topology: &[usize]) -> Self {
        Self {
            topology: topology.to_vec(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Layer sizes the network is actually built from.
    pub fn layer_sizes(&self) -> &[usize] {
        match self.layer_count {
            Some(n) if n <= self.topology.len() => &self.topology[..n],
            _ => &self.topology,
        }
    }

    pub fn optimizer(&self) -> MomentumSgd {
        MomentumSgd {
            learning_rate: self.learning_rate,
            momentum: self.momentum,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.topology.len() < 2 {
            return Err(NNError::InvalidLayerConfiguration(format!(
                "need at least an input and an output layer, got {} layer(s)",
                self.topology.len()
            )));
        }
        if let Some(n) = self.layer_count {
            if n < 2 || n > self.topology.len() {
                return Err(NNError::InvalidLayerConfiguration(format!(
                    "layer count {} outside 2..={}",
                    n,
                    self.topology.len()
                )));
            }
        }
        if let Some(i) = self.layer_sizes().iter().position(|&s| s == 0) {
            return Err(NNError::InvalidLayerConfiguration(format!(
                "layer {} has no neurons",
                i
            )));
        }
        self.optimizer().validate()?;
        RecentAverage::new(self.error_smoothing_window)?;
        Ok(())
    }
}
