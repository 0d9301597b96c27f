use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::network::unit::{SizeMismatch, Unit, Weight};

/// A fully-connected network with one hidden layer and sigmoid units.
///
/// `iteration`, `inputs`, and `expected_outputs` are training-session
/// metadata stamped onto per-iteration snapshots; they are zero/empty on a
/// network that is not tied to a specific training example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub iteration: usize,
    pub inputs: Vec<f64>,
    pub expected_outputs: Vec<f64>,
    pub hidden_units: Vec<Unit>,
    pub output_units: Vec<Unit>,
}

impl Network {
    /// Builds a network with `hidden_count` hidden units of `input_count`
    /// weights each and `output_count` output units of `hidden_count` weights
    /// each. Weights and biases are independent uniform draws from [0, 1).
    ///
    /// The RNG is injected so callers (and tests) control determinism; zero
    /// counts produce empty layers.
    pub fn build<R: Rng>(
        input_count: usize,
        hidden_count: usize,
        output_count: usize,
        rng: &mut R,
    ) -> Network {
        let hidden_units: Vec<Unit> = (0..hidden_count)
            .map(|h| {
                let weights = (0..input_count)
                    .map(|i| Weight::new(rng.gen::<f64>(), format!("i{}", i)))
                    .collect();
                Unit::new(format!("h{}", h), weights, rng.gen::<f64>())
            })
            .collect();

        let output_units = (0..output_count)
            .map(|o| {
                // Output weights line up positionally with the hidden units;
                // the source label carries the hidden unit's position.
                let weights = hidden_units.iter()
                    .map(|hidden| Weight::new(rng.gen::<f64>(), hidden.position.clone()))
                    .collect();
                Unit::new(format!("o{}", o), weights, rng.gen::<f64>())
            })
            .collect();

        Network {
            iteration: 0,
            inputs: Vec::new(),
            expected_outputs: Vec::new(),
            hidden_units,
            output_units,
        }
    }

    /// Forward pass: activates the hidden layer from `inputs`, then the
    /// output layer from the hidden outputs. Results are read back from the
    /// units' `output` fields.
    ///
    /// Shapes are not pre-validated here; a mismatch surfaces from the unit
    /// that rejects its input vector, leaving that unit unmodified.
    pub fn calculate_outputs(&mut self, inputs: &[f64]) -> Result<(), SizeMismatch> {
        let mut hidden_results = Vec::with_capacity(self.hidden_units.len());
        for unit in &mut self.hidden_units {
            unit.activate(inputs)?;
            hidden_results.push(unit.output);
        }
        for unit in &mut self.output_units {
            unit.activate(&hidden_results)?;
        }
        Ok(())
    }

    /// Error computation via the sigmoid-derivative delta rule. Must run
    /// after `calculate_outputs` for the same sample, since it reads the
    /// units' stored outputs.
    ///
    /// The inputs parameter mirrors the forward-pass call site; the gradient
    /// math does not use it.
    pub fn calculate_error(&mut self, _inputs: &[f64], expected_outputs: &[f64]) {
        let mut output_deltas = Vec::with_capacity(self.output_units.len());
        for (unit, expected) in self.output_units.iter_mut().zip(expected_outputs.iter()) {
            let delta = unit.output * (1.0 - unit.output) * (expected - unit.output);
            unit.error_gradient = delta;
            output_deltas.push(delta);
        }

        for (hidden_index, hidden) in self.hidden_units.iter_mut().enumerate() {
            let weighted_error: f64 = output_deltas.iter()
                .zip(self.output_units.iter())
                .map(|(delta, output_unit)| delta * output_unit.weights[hidden_index].value)
                .sum();
            hidden.error_gradient = hidden.output * (1.0 - hidden.output) * weighted_error;
        }
    }

    /// Applies the stored gradients to every unit, output layer first. Must
    /// run after `calculate_error`; the order across layers does not matter
    /// since all gradients were computed from the same snapshot.
    pub fn update_weights_based_on_error(&mut self) {
        for unit in &mut self.output_units {
            unit.apply_gradient();
        }
        for unit in &mut self.hidden_units {
            unit.apply_gradient();
        }
    }

    /// Resets the per-sample training metadata and every unit's transient
    /// state. Weights and biases are untouched, leaving a structure-only
    /// view of the network.
    pub fn clear_training_data(&mut self) {
        self.iteration = 0;
        self.inputs.clear();
        self.expected_outputs.clear();
        for unit in &mut self.hidden_units {
            unit.clear_training_data();
        }
        for unit in &mut self.output_units {
            unit.clear_training_data();
        }
    }

    /// Outputs of the output layer, in unit order.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_units.iter().map(|unit| unit.output).collect()
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
