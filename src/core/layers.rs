use crate::prelude::*;

/// Ordered neurons of one layer. The last neuron is always the bias unit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Builds `size` regular neurons followed by a bias neuron.
    pub fn new(size: usize) -> Self {
        let mut neurons: Vec<Neuron> = (0..size).map(Neuron::new).collect();
        neurons.push(Neuron::bias(size));
        Self { neurons }
    }

    /// Every neuron, bias included.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Regular neurons, bias excluded.
    pub fn units(&self) -> &[Neuron] {
        &self.neurons[..self.neurons.len() - 1]
    }

    pub(crate) fn units_mut(&mut self) -> &mut [Neuron] {
        let n = self.neurons.len() - 1;
        &mut self.neurons[..n]
    }

    pub fn bias(&self) -> &Neuron {
        &self.neurons[self.neurons.len() - 1]
    }

    /// Neuron count including the bias neuron.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Neuron count excluding the bias neuron.
    pub fn size(&self) -> usize {
        self.neurons.len() - 1
    }

    /// Seeds the regular neurons with `values`. The caller checks the length.
    pub(crate) fn set_outputs(&mut self, values: &[f64]) {
        for (neuron, &v) in self.units_mut().iter_mut().zip(values) {
            neuron.set_output(v);
        }
    }

    /// Outputs of the regular neurons, in index order.
    pub fn outputs(&self) -> Vec<f64> {
        self.units().iter().map(Neuron::output).collect()
    }

    pub(crate) fn feed_forward(&mut self, prev: &Layer, incoming: &Connections) {
        for neuron in self.units_mut() {
            neuron.feed_forward(prev, incoming);
        }
    }

    pub(crate) fn calc_output_gradients(&mut self, targets: &[f64]) {
        for (neuron, &t) in self.units_mut().iter_mut().zip(targets) {
            neuron.calc_output_gradient(t);
        }
    }

    pub(crate) fn calc_hidden_gradients(&mut self, next: &Layer, outgoing: &Connections) {
        for neuron in self.units_mut() {
            neuron.calc_hidden_gradient(next, outgoing);
        }
    }

    pub(crate) fn update_incoming_weights(
        &self,
        prev: &Layer,
        incoming: &mut Connections,
        optimizer: &MomentumSgd,
    ) {
        for neuron in self.units() {
            neuron.update_incoming_weights(prev, incoming, optimizer);
        }
    }
}
