use serde::{Serialize, Deserialize};

/// Fixed learning rate for the online update step.
pub const LEARNING_RATE: f64 = 1.0;

/// One incoming connection: a scalar multiplier plus a descriptive label of
/// the unit it connects from ("i0", "h1", ...). The label is metadata for
/// snapshots only; all lookups are positional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    pub source: String,
}

impl Weight {
    pub fn new(value: f64, source: impl Into<String>) -> Weight {
        Weight { value, source: source.into() }
    }
}

/// A single neuron (hidden or output).
///
/// `weights`, `bias`, and `position` are fixed at construction; `last_inputs`,
/// `output`, and `error_gradient` mutate on every forward/backward pass and
/// are cleared by `clear_training_data()`.
///
/// Invariant: `last_inputs.len() == weights.len()` whenever `last_inputs`
/// is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Position label within the network ("h0", "o0", ...).
    pub position: String,
    pub weights: Vec<Weight>,
    pub bias: f64,
    pub last_inputs: Vec<f64>,
    pub output: f64,
    pub error_gradient: f64,
}

impl Unit {
    pub fn new(position: impl Into<String>, weights: Vec<Weight>, bias: f64) -> Unit {
        Unit {
            position: position.into(),
            weights,
            bias,
            last_inputs: Vec::new(),
            output: 0.0,
            error_gradient: 0.0,
        }
    }

    /// Computes this unit's activation: `σ(Σ inputs·weights − bias)` with the
    /// logistic sigmoid. Stores `inputs` as `last_inputs` for the later
    /// weight update.
    ///
    /// Fails without mutating the unit when the input length does not match
    /// the weight count.
    pub fn activate(&mut self, inputs: &[f64]) -> Result<(), SizeMismatch> {
        if inputs.len() != self.weights.len() {
            return Err(SizeMismatch {
                expected: self.weights.len(),
                got: inputs.len(),
            });
        }
        let total: f64 = inputs.iter()
            .zip(self.weights.iter())
            .map(|(input, weight)| input * weight.value)
            .sum::<f64>() - self.bias;
        self.output = sigmoid(total);
        self.last_inputs = inputs.to_vec();
        Ok(())
    }

    /// Applies one online gradient step from the stored `last_inputs` and
    /// `error_gradient`. The bias moves opposite to the weights because it
    /// enters the activation negated.
    pub fn apply_gradient(&mut self) {
        for (weight, input) in self.weights.iter_mut().zip(self.last_inputs.iter()) {
            weight.value += LEARNING_RATE * input * self.error_gradient;
        }
        self.bias -= LEARNING_RATE * self.error_gradient;
    }

    /// Clears the per-sample state; weights and bias are untouched.
    pub fn clear_training_data(&mut self) {
        self.last_inputs.clear();
        self.output = 0.0;
        self.error_gradient = 0.0;
    }
}

/// Logistic sigmoid: `1 / (1 + e^(-x))`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// The one core-level error kind: an input vector whose length differs from
/// a unit's weight count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeMismatch {
    pub expected: usize,
    pub got: usize,
}

impl std::fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected {} input(s), got {}", self.expected, self.got)
    }
}

impl std::error::Error for SizeMismatch {}
