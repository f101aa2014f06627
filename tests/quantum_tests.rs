use qubitone::simulate_probabilities;

#[test]
fn distribution_normalizes_over_full_parameter_grid() {
    for qubits in 2..=8u32 {
        for ent in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for sup in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let dist = simulate_probabilities(qubits, ent, sup);
                assert_eq!(
                    dist.state_count(),
                    1 << qubits,
                    "wrong state count for {} qubits",
                    qubits
                );
                let sum: f64 = dist.probs.iter().sum();
                assert!(
                    (sum - 1.0).abs() < 1e-9,
                    "sum {} for qubits={} ent={} sup={}",
                    sum,
                    qubits,
                    ent,
                    sup
                );
                for &p in &dist.probs {
                    assert!(p >= 0.0, "negative probability {}", p);
                }
            }
        }
    }
}

#[test]
fn two_qubits_full_superposition_no_entanglement_is_uniform() {
    let dist = simulate_probabilities(2, 0.0, 1.0);
    assert_eq!(dist.state_count(), 4);
    for &p in &dist.probs {
        assert!((p - 0.25).abs() < 1e-9, "expected 0.25, got {}", p);
    }
}

#[test]
fn labels_are_zero_padded_binary() {
    let dist = simulate_probabilities(3, 0.5, 0.5);
    assert_eq!(dist.label(0), "000");
    assert_eq!(dist.label(5), "101");
    assert_eq!(dist.entries().len(), 8);
}

#[test]
fn entanglement_favors_matching_edge_bits() {
    let dist = simulate_probabilities(3, 1.0, 1.0);
    // 000 has matching first/last bits, 001 does not.
    assert!(
        dist.probs[0] > dist.probs[1],
        "matching-bit state should outweigh mismatched: {} vs {}",
        dist.probs[0],
        dist.probs[1]
    );
}

#[test]
fn simulation_is_deterministic() {
    let a = simulate_probabilities(6, 0.37, 0.62);
    let b = simulate_probabilities(6, 0.37, 0.62);
    assert_eq!(a.probs, b.probs);
}

#[test]
fn quantum_seed_is_expected_index() {
    // Uniform distribution over 4 states: seed = (0+1+2+3)/4 = 1.5.
    let dist = simulate_probabilities(2, 0.0, 1.0);
    assert!((dist.quantum_seed() - 1.5).abs() < 1e-9);
}
