use crate::prelude::*;
use rand::Rng;

/// One directed edge between two neighbouring layers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub weight: f64,
    /// Size of the last update applied to `weight`.
    pub momentum: f64,
}

/// Weight table between layer `i` and layer `i + 1`.
///
/// Rows are source neurons (bias of layer `i` included, as the last row),
/// columns are destination neurons (bias of layer `i + 1` excluded). The
/// network owns one table per adjacent layer pair, so a weight is addressed by
/// `(layer, source, destination)`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Connections {
    pub w: Array2<f64>,
    pub dw: Array2<f64>,
}

impl Connections {
    /// Table with weights drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(sources: usize, destinations: usize, rng: &mut R) -> Self {
        let w = Array2::random_using((sources, destinations), Uniform::new(0.0, 1.0), rng);
        Self::from_weights(w)
    }

    /// Table with weights taken from `f(source, destination)`.
    pub fn from_fn<F>(sources: usize, destinations: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self::from_weights(Array2::from_shape_fn((sources, destinations), |(s, d)| f(s, d)))
    }

    fn from_weights(w: Array2<f64>) -> Self {
        let dw = Array2::zeros(w.raw_dim());
        Self { w, dw }
    }

    /// Number of source neurons, bias included.
    pub fn sources(&self) -> usize {
        self.w.nrows()
    }

    /// Number of destination neurons, bias excluded.
    pub fn destinations(&self) -> usize {
        self.w.ncols()
    }

    pub fn weight(&self, source: usize, destination: usize) -> f64 {
        self.w[[source, destination]]
    }

    /// Edge `source -> destination`. Panics when either index is out of range.
    pub fn at(&self, source: usize, destination: usize) -> Connection {
        Connection {
            weight: self.w[[source, destination]],
            momentum: self.dw[[source, destination]],
        }
    }

    pub fn get(&self, source: usize, destination: usize) -> Option<Connection> {
        let weight = *self.w.get((source, destination))?;
        let momentum = self.dw[[source, destination]];
        Some(Connection { weight, momentum })
    }

    /// Incoming weights of one destination neuron, one per source.
    pub fn incoming(&self, destination: usize) -> ArrayView1<'_, f64> {
        self.w.column(destination)
    }

    /// Outgoing weights of one source neuron, one per destination.
    pub fn outgoing(&self, source: usize) -> ArrayView1<'_, f64> {
        self.w.row(source)
    }

    /// Overwrites one edge. Only the weight-update step calls this.
    pub(crate) fn set(&mut self, source: usize, destination: usize, connection: Connection) {
        self.w[[source, destination]] = connection.weight;
        self.dw[[source, destination]] = connection.momentum;
    }

    pub fn len(&self) -> usize {
        self.w.len()
    }

    pub fn is_empty(&self) -> bool {
        self.w.is_empty()
    }
}
