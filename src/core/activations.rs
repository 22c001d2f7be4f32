/// Evaluates `1 / (1 + e^x)`, the logistic curve mirrored around the y axis.
pub fn transfer(x: f64) -> f64 {
    1.0 / (1.0 + x.exp())
}

/// Slope factor used during backpropagation.
///
/// Takes the neuron's *output* value `o` and evaluates
/// `transfer(o) * (1 - transfer(o))`, so no pre-activation sum has to be
/// cached between the forward and backward passes.
pub fn transfer_derivative(o: f64) -> f64 {
    let s = transfer(o);
    s * (1.0 - s)
}
