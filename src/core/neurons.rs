use crate::core::activations::{transfer, transfer_derivative};
use crate::prelude::*;

/// A single unit of a layer.
///
/// `output` and `gradient` are scratch values rewritten by every forward and
/// backward pass. The weights feeding the neuron live in the network's
/// [`Connections`] tables and are addressed through `index`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Neuron {
    output: f64,
    gradient: f64,
    index: usize,
}

impl Neuron {
    pub fn new(index: usize) -> Self {
        Self {
            output: 0.0,
            gradient: 0.0,
            index,
        }
    }

    /// Constant-output unit appended to every layer.
    pub fn bias(index: usize) -> Self {
        Self {
            output: 1.0,
            gradient: 0.0,
            index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn set_output(&mut self, value: f64) {
        self.output = value;
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    /// Weighted sum over every neuron of `prev` (bias included), squashed by
    /// the transfer function.
    pub fn feed_forward(&mut self, prev: &Layer, incoming: &Connections) {
        let sum: f64 = prev
            .neurons()
            .iter()
            .zip(incoming.incoming(self.index))
            .map(|(n, w)| n.output * w)
            .sum();
        self.output = transfer(sum);
    }

    pub fn calc_output_gradient(&mut self, target: f64) {
        let delta = target - self.output;
        self.gradient = delta * transfer_derivative(self.output);
    }

    pub fn calc_hidden_gradient(&mut self, next: &Layer, outgoing: &Connections) {
        let dow = self.sum_dow(next, outgoing);
        self.gradient = dow * transfer_derivative(self.output);
    }

    /// Sum of this neuron's contributions to the next layer's gradients.
    fn sum_dow(&self, next: &Layer, outgoing: &Connections) -> f64 {
        next.units()
            .iter()
            .zip(outgoing.outgoing(self.index))
            .map(|(n, w)| w * n.gradient)
            .sum()
    }

    /// Moves every edge arriving from `prev` by the momentum step, driven by
    /// this neuron's gradient.
    pub fn update_incoming_weights(
        &self,
        prev: &Layer,
        incoming: &mut Connections,
        optimizer: &MomentumSgd,
    ) {
        for source in prev.neurons() {
            let mut connection = incoming.at(source.index, self.index);
            optimizer.step(&mut connection, source.output, self.gradient);
            incoming.set(source.index, self.index, connection);
        }
    }
}
