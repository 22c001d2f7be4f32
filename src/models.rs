use crate::core::losses::rms_error;
use crate::prelude::*;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fully connected feedforward network trained online with momentum.
///
/// `connections[i]` holds the weights from `layers[i]` into `layers[i + 1]`,
/// so the output layer owns no table.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    connections: Vec<Connections>,
    optimizer: MomentumSgd,
    current_error: f64,
    recent_average: RecentAverage,
    config: NetworkConfig,
}

impl Network {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    /// Builds a network whose weights are drawn uniformly from `[0, 1)` using
    /// `rng`.
    pub fn new<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Self> {
        Self::assemble(config, |_, sources, destinations| {
            Connections::random(sources, destinations, &mut *rng)
        })
    }

    /// Builds a network seeded from `config.seed`, or from OS entropy when no
    /// seed is set.
    pub fn from_config(config: NetworkConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, &mut rng)
    }

    /// Builds a network whose weights come from `init(layer, source,
    /// destination)`.
    pub fn from_weights<F>(config: NetworkConfig, mut init: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        Self::assemble(config, |layer, sources, destinations| {
            Connections::from_fn(sources, destinations, |s, d| init(layer, s, d))
        })
    }

    fn assemble<F>(config: NetworkConfig, mut table: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> Connections,
    {
        config.validate()?;
        let sizes = config.layer_sizes().to_vec();
        let layers: Vec<Layer> = sizes.iter().map(|&size| Layer::new(size)).collect();
        let connections: Vec<Connections> = sizes
            .windows(2)
            .enumerate()
            .map(|(i, pair)| table(i, pair[0] + 1, pair[1]))
            .collect();
        if sizes.len() < config.topology.len() {
            debug!(
                "building {} of {} declared layers",
                sizes.len(),
                config.topology.len()
            );
        }
        debug!("network topology {:?}", sizes);

        Ok(Self {
            layers,
            connections,
            optimizer: config.optimizer(),
            current_error: 0.0,
            recent_average: RecentAverage::new(config.error_smoothing_window)?,
            config,
        })
    }

    /// Feeds `input` through the network. Read the result with
    /// [`results`](Self::results).
    pub fn forward(&mut self, input: &[f64]) -> Result<()> {
        let expected = self.input_len();
        if input.len() != expected {
            return Err(NNError::InvalidInputShape {
                expected,
                actual: input.len(),
            });
        }
        self.layers[0].set_outputs(input);
        for l in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(l);
            after[0].feed_forward(&before[l - 1], &self.connections[l - 1]);
        }
        Ok(())
    }

    /// Trains on `target` against the outputs of the last
    /// [`forward`](Self::forward) call.
    pub fn backpropagate(&mut self, target: &[f64]) -> Result<()> {
        let expected = self.output_len();
        if target.len() != expected {
            return Err(NNError::InvalidTargetShape {
                expected,
                actual: target.len(),
            });
        }

        self.current_error = rms_error(target, &self.results());
        self.recent_average.update(self.current_error);

        let last = self.layers.len() - 1;
        self.layers[last].calc_output_gradients(target);

        for l in (1..last).rev() {
            let (before, after) = self.layers.split_at_mut(l + 1);
            before[l].calc_hidden_gradients(&after[0], &self.connections[l]);
        }

        for l in (1..=last).rev() {
            let (before, after) = self.layers.split_at(l);
            after[0].update_incoming_weights(
                &before[l - 1],
                &mut self.connections[l - 1],
                &self.optimizer,
            );
        }
        Ok(())
    }

    /// One online training step; returns the RMS error of this example.
    pub fn train_sample(&mut self, input: &[f64], target: &[f64]) -> Result<f64> {
        if target.len() != self.output_len() {
            return Err(NNError::InvalidTargetShape {
                expected: self.output_len(),
                actual: target.len(),
            });
        }
        self.forward(input)?;
        self.backpropagate(target)?;
        Ok(self.current_error)
    }

    /// Runs `forward` and returns the outputs.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.forward(input)?;
        Ok(self.results())
    }

    /// Output-layer values, bias excluded.
    pub fn results(&self) -> Vec<f64> {
        self.output_layer().outputs()
    }

    pub fn current_error(&self) -> f64 {
        self.current_error
    }

    pub fn recent_average_error(&self) -> f64 {
        self.recent_average.value()
    }

    pub fn input_len(&self) -> usize {
        self.layers[0].size()
    }

    pub fn output_len(&self) -> usize {
        self.output_layer().size()
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Sizes of the constructed layers, bias excluded.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Weight table from `layers[layer]` into `layers[layer + 1]`.
    pub fn connections(&self, layer: usize) -> Option<&Connections> {
        self.connections.get(layer)
    }

    pub fn connection(&self, layer: usize, source: usize, destination: usize) -> Option<Connection> {
        self.connections.get(layer)?.get(source, destination)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn optimizer(&self) -> &MomentumSgd {
        &self.optimizer
    }

    pub fn count_parameters(&self) -> usize {
        self.connections.iter().map(Connections::len).sum()
    }

    pub fn summary(&self) {
        println!("{}", self.describe());
    }

    fn describe(&self) -> String {
        let mut res = "\nModel Network\n".to_string();
        res.push_str("-------------------------------------------------------------\n");
        res.push_str("Layer (Type)\t\t Neurons (+bias)\t No.of params\n");
        for (i, layer) in self.layers.iter().enumerate() {
            let typ = if i == 0 {
                "Input"
            } else if i == self.layers.len() - 1 {
                "Output"
            } else {
                "Hidden"
            };
            let params = if i == 0 { 0 } else { self.connections[i - 1].len() };
            res.push_str(&format!("{}\t\t\t  {} (+1)\t\t  {}\n", typ, layer.size(), params));
        }
        res.push_str("-------------------------------------------------------------\n");
        res.push_str(&format!("Total params: {}\n", self.count_parameters()));
        res.push_str(&format!(
            "eta: {}  alpha: {}  smoothing: {}\n",
            self.optimizer.learning_rate,
            self.optimizer.momentum,
            self.recent_average.window()
        ));
        res
    }
}

/// Fluent construction of a [`Network`].
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    config: NetworkConfig,
}

impl NetworkBuilder {
    pub fn config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn topology(mut self, topology: &[usize]) -> Self {
        self.config.topology = topology.to_vec();
        self
    }

    pub fn layer_count(mut self, n: usize) -> Self {
        self.config.layer_count = Some(n);
        self
    }

    pub fn learning_rate(mut self, eta: f64) -> Self {
        self.config.learning_rate = eta;
        self
    }

    pub fn momentum(mut self, alpha: f64) -> Self {
        self.config.momentum = alpha;
        self
    }

    pub fn error_smoothing_window(mut self, k: f64) -> Self {
        self.config.error_smoothing_window = k;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Network> {
        Network::from_config(self.config)
    }

    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Network> {
        Network::new(self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::activations::transfer;

    fn half_weights(topology: &[usize]) -> Network {
        Network::from_weights(NetworkConfig::new(topology), |_, _, _| 0.5).unwrap()
    }

    #[test]
    fn forward_pass_with_half_weights() {
        let mut net = half_weights(&[2, 2, 1]);
        net.forward(&[1.0, 0.0]).unwrap();

        let hidden = net.layer(1).unwrap().outputs();
        assert_eq!(hidden.len(), 2);
        for h in &hidden {
            assert!((h - 0.2689414213699951).abs() < 1e-6);
        }

        let out = net.results();
        assert_eq!(out.len(), 1);
        assert!((out[0] - transfer(2.0 * 0.5 * hidden[0] + 0.5)).abs() < 1e-12);
        assert!((out[0] - 0.3167081425530559).abs() < 1e-6);
    }

    #[test]
    fn forward_is_deterministic() {
        let mut net = Network::builder().topology(&[3, 4, 2]).seed(5).build().unwrap();
        let a = net.predict(&[0.2, -1.0, 3.5]).unwrap();
        let b = net.predict(&[0.2, -1.0, 3.5]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn same_seed_same_network() {
        let a = Network::builder().topology(&[3, 4, 2]).seed(9).build().unwrap();
        let b = Network::builder().topology(&[3, 4, 2]).seed(9).build().unwrap();
        for l in 0..2 {
            assert_eq!(a.connections(l).unwrap().w, b.connections(l).unwrap().w);
        }
    }

    #[test]
    fn connection_tables_follow_topology() {
        let net = Network::builder().topology(&[9, 5, 3, 3, 1]).seed(1).build().unwrap();
        assert_eq!(net.layer_count(), 5);
        assert_eq!(net.topology(), vec![9, 5, 3, 3, 1]);
        let shapes: Vec<(usize, usize)> = (0..4)
            .map(|l| {
                let t = net.connections(l).unwrap();
                (t.sources(), t.destinations())
            })
            .collect();
        assert_eq!(shapes, vec![(10, 5), (6, 3), (4, 3), (4, 1)]);
        assert!(net.connections(4).is_none());
        assert_eq!(net.count_parameters(), 50 + 18 + 12 + 4);
        assert!(net.describe().contains("Total params: 84"));
    }

    #[test]
    fn layer_count_override_truncates() {
        let mut net = Network::builder()
            .topology(&[9, 5, 3, 3, 1])
            .layer_count(3)
            .seed(1)
            .build()
            .unwrap();
        assert_eq!(net.topology(), vec![9, 5, 3]);
        assert_eq!(net.output_len(), 3);
        assert_eq!(net.predict(&[0.0; 9]).unwrap().len(), 3);
    }

    #[test]
    fn rejects_wrong_input_length() {
        let mut net = half_weights(&[2, 2, 1]);
        let err = net.forward(&[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            NNError::InvalidInputShape {
                expected: 2,
                actual: 3
            }
        ));
        assert!(net.forward(&[1.0]).is_err());
    }

    #[test]
    fn rejects_wrong_target_length_without_mutating() {
        let mut net = half_weights(&[2, 2, 1]);
        net.forward(&[1.0, 0.0]).unwrap();
        let err = net.backpropagate(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            NNError::InvalidTargetShape {
                expected: 1,
                actual: 2
            }
        ));
        assert_eq!(net.recent_average_error(), 0.0);
        assert!(net.connections(1).unwrap().w.iter().all(|&w| w == 0.5));
        assert!(net.train_sample(&[1.0, 0.0], &[]).is_err());
    }

    #[test]
    fn bias_stays_at_one() {
        let mut net = Network::builder().topology(&[2, 3, 3, 1]).seed(3).build().unwrap();
        for i in 0..50 {
            let x = i as f64 / 10.0;
            net.train_sample(&[x, 1.0 - x], &[0.5]).unwrap();
            for l in 0..net.layer_count() {
                assert_eq!(net.layer(l).unwrap().bias().output(), 1.0);
            }
        }
    }

    #[test]
    fn backpropagate_tracks_errors() {
        let mut net = half_weights(&[2, 2, 1]);
        net.forward(&[1.0, 0.0]).unwrap();
        let out = net.results()[0];
        net.backpropagate(&[1.0]).unwrap();
        assert!((net.current_error() - (1.0 - out)).abs() < 1e-12);
        assert!((net.recent_average_error() - (1.0 - out) / 101.0).abs() < 1e-12);
    }

    #[test]
    fn backpropagate_updates_every_layer() {
        let mut net = half_weights(&[2, 2, 1]);
        net.forward(&[1.0, 0.0]).unwrap();
        net.backpropagate(&[1.0]).unwrap();

        // Output layer: gradient * source output, no momentum yet.
        let out = net.results()[0];
        let h = net.layer(1).unwrap().outputs()[0];
        let g_out = (1.0 - out) * crate::core::transfer_derivative(out);
        let expected = 0.5 + 0.15 * h * g_out;
        let c = net.connection(1, 0, 0).unwrap();
        assert!((c.weight - expected).abs() < 1e-12);
        assert!((c.momentum - 0.15 * h * g_out).abs() < 1e-12);

        // Hidden gradient uses the pre-update outgoing weight 0.5.
        let g_hidden = 0.5 * g_out * crate::core::transfer_derivative(h);
        let c = net.connection(0, 0, 0).unwrap();
        assert!((c.weight - (0.5 + 0.15 * 1.0 * g_hidden)).abs() < 1e-12);
        assert!((net.connection(0, 2, 1).unwrap().weight - (0.5 + 0.15 * g_hidden)).abs() < 1e-12);
        // Input 0.0 leaves its edges untouched.
        assert_eq!(net.connection(0, 1, 0).unwrap().weight, 0.5);
    }

    #[test]
    fn backpropagate_through_two_hidden_layers() {
        use crate::core::transfer_derivative as d;

        let mut net = half_weights(&[2, 2, 2, 1]);
        net.forward(&[1.0, 0.0]).unwrap();
        let a = net.layer(1).unwrap().outputs()[0];
        let b = net.layer(2).unwrap().outputs()[0];
        let o = net.results()[0];
        assert!((a - transfer(1.0)).abs() < 1e-12);
        assert!((b - transfer(a + 0.5)).abs() < 1e-12);
        assert!((o - transfer(b + 0.5)).abs() < 1e-12);

        net.backpropagate(&[1.0]).unwrap();

        let g_out = (1.0 - o) * d(o);
        let g2 = 0.5 * g_out * d(b);
        // Two next-layer neurons, each reached with weight 0.5.
        let g1 = (0.5 * g2 + 0.5 * g2) * d(a);

        let close = |layer, s, expected: f64| {
            let w = net.connection(layer, s, 0).unwrap().weight;
            assert!((w - expected).abs() < 1e-12, "w({}, {}, 0) = {}, want {}", layer, s, w, expected);
        };
        close(2, 0, 0.5 + 0.15 * b * g_out);
        close(2, 2, 0.5 + 0.15 * g_out);
        close(1, 0, 0.5 + 0.15 * a * g2);
        close(1, 2, 0.5 + 0.15 * g2);
        close(0, 0, 0.5 + 0.15 * g1);
        close(0, 1, 0.5);
        close(0, 2, 0.5 + 0.15 * g1);
    }

    #[test]
    fn builder_carries_hyperparameters() {
        let net = Network::builder()
            .topology(&[2, 1])
            .learning_rate(0.3)
            .momentum(0.9)
            .error_smoothing_window(10.0)
            .build_with_rng(&mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(net.optimizer(), &MomentumSgd::new(0.3, 0.9).unwrap());
        assert_eq!(net.config().error_smoothing_window, 10.0);
        assert!(Network::builder().learning_rate(-1.0).build().is_err());
    }
}
