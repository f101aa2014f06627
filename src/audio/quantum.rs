use serde::Serialize;

use super::params::SynthesisParams;

/// Normalized probability distribution over the 2^n basis states.
///
/// States are stored in numeric order; `label(i)` yields the zero-padded
/// binary string for display and serialization.
#[derive(Debug, Clone, Serialize)]
pub struct ProbabilityDistribution {
    pub qubits: u32,
    pub probs: Vec<f64>,
}

impl ProbabilityDistribution {
    pub fn state_count(&self) -> usize {
        self.probs.len()
    }

    pub fn label(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.qubits as usize)
    }

    /// (label, probability) pairs in basis-state order.
    pub fn entries(&self) -> Vec<(String, f64)> {
        self.probs
            .iter()
            .enumerate()
            .map(|(i, &p)| (self.label(i), p))
            .collect()
    }

    /// Expected basis-state index — the scalar "quantum seed" that drives
    /// pixel field generation.
    pub fn quantum_seed(&self) -> f64 {
        self.probs
            .iter()
            .enumerate()
            .map(|(i, &p)| i as f64 * p)
            .sum()
    }
}

/// Simulate a probability distribution from the quantum parameters.
///
/// `entanglement` and `superposition` are normalized to [0,1]. This is a
/// closed-form sketch of quantum behavior, not unitary evolution: a uniform
/// base, a middle-favoring blend controlled by superposition, and a
/// first/last-bit correlation controlled by entanglement, renormalized at
/// the end.
pub fn simulate_probabilities(
    qubits: u32,
    entanglement: f64,
    superposition: f64,
) -> ProbabilityDistribution {
    let state_count = 1usize << qubits;
    let mut probs = Vec::with_capacity(state_count);
    let half = state_count as f64 / 2.0;

    for i in 0..state_count {
        let base = 1.0 / state_count as f64;
        let mut prob = base;

        // Lower superposition pulls weight toward the middle states.
        if superposition < 1.0 {
            let favor_middle = (i as f64 - half).abs() / half;
            prob = prob * (1.0 - superposition) + base * superposition * (1.0 - favor_middle);
        }

        // Entanglement correlates the first and last bits of the label.
        if entanglement > 0.0 && qubits >= 2 {
            let first_bit = (i >> (qubits - 1)) & 1;
            let last_bit = i & 1;
            if first_bit == last_bit {
                prob *= 1.0 + entanglement * 0.5;
            } else {
                prob *= 1.0 - entanglement * 0.5;
            }
        }

        probs.push(prob);
    }

    let sum: f64 = probs.iter().sum();
    for p in probs.iter_mut() {
        *p /= sum;
    }

    ProbabilityDistribution { qubits, probs }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Gate {
    H { position: u32, qubit: u32 },
    #[serde(rename = "CNOT")]
    Cnot { position: u32, control: u32, target: u32 },
    #[serde(rename = "RY")]
    Ry { position: u32, qubit: u32, angle: f64 },
}

/// Sketch of the circuit that would produce the simulated distribution,
/// for the circuit visualization panel.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitSummary {
    pub qubits: u32,
    pub depth: u32,
    pub gates: Vec<Gate>,
}

pub fn circuit_summary(params: &SynthesisParams) -> CircuitSummary {
    let qubits = params.qubits;
    let mut gates = Vec::new();

    for q in 0..qubits {
        gates.push(Gate::H {
            position: 0,
            qubit: q,
        });
        if params.entanglement > 0.0 && q + 1 < qubits {
            gates.push(Gate::Cnot {
                position: 1,
                control: q,
                target: q + 1,
            });
        }
        if params.superposition > 0.0 {
            gates.push(Gate::Ry {
                position: 2,
                qubit: q,
                angle: params.superposition as f64 / 100.0 * std::f64::consts::PI,
            });
        }
    }

    CircuitSummary {
        qubits,
        depth: 3,
        gates,
    }
}
