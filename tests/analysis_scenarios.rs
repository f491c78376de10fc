use approx::assert_abs_diff_eq;
use qentangle::analysis::{PAIRS, validate_spectrum, von_neumann_entropy};
use qentangle::basis::ket;
use qentangle::config::AnalysisConfig;
use qentangle::errors::{AnalysisError, StateError};
use qentangle::utils::{hermitian_eigenvalues, kronecker_product};
use qentangle::{
    Classification, QuantumState, StateFamily, StateVector, analyze, analyze_family,
    build_g_abcd, build_l_abc2,
};

fn sample_states() -> Vec<StateVector> {
    vec![
        build_g_abcd(1.0, 0.0, 0.0, 0.0).unwrap(),
        build_g_abcd(0.3, -1.2, 2.5, 0.7).unwrap(),
        build_g_abcd(1.0, 2.0, 3.0, 4.0).unwrap(),
        build_l_abc2(0.0, 0.0, 0.0).unwrap(),
        build_l_abc2(1.0, 1.0, 1.0).unwrap(),
        build_l_abc2(-0.5, 2.0, 0.25).unwrap(),
    ]
}

fn all_subsets() -> Vec<Vec<usize>> {
    (1..16usize)
        .map(|mask| (0..4).filter(|q| mask & (1 << q) != 0).collect())
        .collect()
}

fn w_state() -> StateVector {
    StateVector::from_kets(&[
        (1.0, ket("0001").unwrap()),
        (1.0, ket("0010").unwrap()),
        (1.0, ket("0100").unwrap()),
        (1.0, ket("1000").unwrap()),
    ])
    .unwrap()
}

#[test]
fn density_matrices_have_unit_trace() {
    for psi in sample_states() {
        assert_abs_diff_eq!(psi.norm(), 1.0, epsilon = 1e-9);
        let rho = QuantumState::from_state_vector(&psi).unwrap();
        assert_abs_diff_eq!(rho.trace().re, 1.0, epsilon = 1e-9);
        assert!(rho.is_valid().is_ok());
    }
}

#[test]
fn partial_trace_preserves_trace_for_every_subset() {
    for psi in sample_states() {
        let rho = psi.density_matrix();
        for keep in all_subsets() {
            let reduced = rho.partial_trace(&keep).unwrap();
            assert_eq!(reduced.dim(), 1 << keep.len());
            assert_abs_diff_eq!(reduced.trace().re, rho.trace().re, epsilon = 1e-12);
        }
    }
}

#[test]
fn partial_trace_keeping_everything_is_identity() {
    for psi in sample_states() {
        let rho = psi.density_matrix();
        assert_eq!(rho.partial_trace(&[0, 1, 2, 3]).unwrap(), rho);
    }
}

#[test]
fn reduced_spectra_are_distributions_with_bounded_entropy() {
    for psi in sample_states() {
        let rho = psi.density_matrix();
        for keep in all_subsets().into_iter().filter(|k| k.len() <= 2) {
            let spectrum = rho.partial_trace(&keep).unwrap().eigenvalues();
            assert_abs_diff_eq!(spectrum.iter().sum::<f64>(), 1.0, epsilon = 1e-6);
            assert!(spectrum.iter().all(|&ev| ev >= -1e-9));
            assert!(validate_spectrum(&spectrum, 1e-6).is_valid());

            let s = von_neumann_entropy(&spectrum);
            assert!(s >= -1e-9);
            assert!(s <= keep.len() as f64 + 1e-9);
        }
    }
}

#[test]
fn g_abcd_a_only_is_two_bell_pairs() {
    let family = StateFamily::Gabcd {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
    };
    let report = analyze_family(&family, &AnalysisConfig::default()).unwrap();

    for s in report.single_qubit_entropies {
        assert_abs_diff_eq!(s, 1.0, epsilon = 1e-9);
    }
    assert!(!report.is_fully_separable);

    let pairs = report.pairwise_results.as_ref().unwrap();
    let entangled: Vec<&str> = pairs
        .iter()
        .filter(|(_, p)| p.entangled)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(entangled, vec!["AB", "CD"]);
    assert_abs_diff_eq!(pairs["AB"].negative_eigenvalues[0], -0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(pairs["AB"].entropy, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pairs["AC"].entropy, 2.0, epsilon = 1e-9);

    assert_eq!(report.entangled_pair_count, Some(2));
    assert_eq!(
        report.classification,
        Classification::GhzType {
            entangled_pairs: 2,
            total_pairs: 6
        }
    );
}

#[test]
fn l_abc2_zero_is_fully_separable() {
    let family = StateFamily::Labc2 {
        a: 0.0,
        b: 0.0,
        c: 0.0,
    };
    let report = analyze_family(&family, &AnalysisConfig::default()).unwrap();

    for s in report.single_qubit_entropies {
        assert_abs_diff_eq!(s, 0.0, epsilon = 1e-12);
    }
    assert!(report.is_fully_separable);
    assert!(report.pairwise_results.is_none());
    assert_eq!(report.entangled_pair_count, None);
    assert_eq!(report.classification, Classification::FullySeparable);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["classification"], "fully_separable");
    assert!(json.get("pairwiseResults").is_none());
    assert!(json.get("entangledPairCount").is_none());
}

#[test]
fn superposed_product_state_passes_the_gate() {
    // (|0> + |1>)/sqrt2 on A, |011> on BCD
    let psi = StateVector::from_kets(&[
        (1.0, ket("0011").unwrap()),
        (1.0, ket("1011").unwrap()),
    ])
    .unwrap();
    let report = analyze(&psi, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.classification, Classification::FullySeparable);
}

#[test]
fn computational_product_pairs_are_ppt() {
    for label in ["00", "01", "10", "11"] {
        let psi = StateVector::normalized(ket(label).unwrap()).unwrap();
        let pt = psi.density_matrix().transpose_second().unwrap();
        assert!(hermitian_eigenvalues(&pt).iter().all(|&ev| ev >= 0.0));
    }

    // product of two single-qubit density matrices
    let a = StateVector::normalized(ket("1").unwrap())
        .unwrap()
        .density_matrix();
    let b = StateVector::normalized(ket("0").unwrap())
        .unwrap()
        .density_matrix();
    let pair = QuantumState::from_density_matrix(kronecker_product(
        &a.density_matrix,
        &b.density_matrix,
    ))
    .unwrap();
    let pt = pair.transpose_second().unwrap();
    assert!(hermitian_eigenvalues(&pt).iter().all(|&ev| ev >= 0.0));
}

#[test]
fn w_state_is_w_type() {
    let report = analyze(&w_state(), &AnalysisConfig::default()).unwrap();
    assert_eq!(report.classification, Classification::WType);
    assert_eq!(report.entangled_pair_count, Some(PAIRS.len()));

    let pairs = report.pairwise_results.unwrap();
    assert_eq!(pairs.len(), 6);
    for pair in pairs.values() {
        assert!(pair.entangled);
        assert_eq!(pair.negative_eigenvalues.len(), 1);
        assert!(pair.negative_eigenvalues[0] < -0.1);
    }
}

#[test]
fn ghz_state_with_no_entangled_pairs_is_still_ghz_type() {
    let family = StateFamily::Gabcd {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };
    let report = analyze_family(&family, &AnalysisConfig::default()).unwrap();
    for s in report.single_qubit_entropies {
        assert_abs_diff_eq!(s, 1.0, epsilon = 1e-9);
    }
    assert_eq!(
        report.classification,
        Classification::GhzType {
            entangled_pairs: 0,
            total_pairs: 6
        }
    );
    assert_eq!(report.entangled_pair_count, Some(0));
}

#[test]
fn report_json_uses_result_field_names() {
    let family = StateFamily::Gabcd {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
    };
    let report = analyze_family(&family, &AnalysisConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["stateVector"].as_array().unwrap().len(), 16);
    assert_eq!(json["singleQubitEntropies"].as_array().unwrap().len(), 4);
    assert_eq!(json["isFullySeparable"], false);
    assert_eq!(json["classification"], "GHZ-type");
    assert_eq!(json["entangledPairCount"], 2);

    let pairs = json["pairwiseResults"].as_object().unwrap();
    let names: Vec<&String> = pairs.keys().collect();
    assert_eq!(names, vec!["AB", "AC", "AD", "BC", "BD", "CD"]);
    assert_eq!(pairs["CD"]["entangled"], true);
    assert_eq!(pairs["AC"]["negativeEigenvalues"].as_array().unwrap().len(), 0);
}

#[test]
fn fatal_errors_produce_no_report() {
    let degenerate = StateFamily::Gabcd {
        a: 0.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
    };
    assert!(matches!(
        analyze_family(&degenerate, &AnalysisConfig::default()),
        Err(AnalysisError::State(StateError::DegenerateState(_)))
    ));

    let infinite = StateFamily::Labc2 {
        a: f64::NEG_INFINITY,
        b: 0.0,
        c: 0.0,
    };
    assert!(matches!(
        analyze_family(&infinite, &AnalysisConfig::default()),
        Err(AnalysisError::InvalidParameter { name: "a", .. })
    ));
}

#[test]
fn family_states_do_not_depend_on_parameter_scale() {
    let unit = build_g_abcd(1.0, 0.0, 0.0, 0.0).unwrap();
    for scale in [1e-13, 1e200] {
        let scaled = build_g_abcd(scale, 0.0, 0.0, 0.0).unwrap();
        assert_abs_diff_eq!(scaled.norm(), 1.0, epsilon = 1e-12);
        for (a, b) in scaled.amplitudes().iter().zip(unit.amplitudes().iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}

#[test]
fn tiny_and_huge_parameters_classify_like_unit_ones() {
    let config = AnalysisConfig::default();
    let expected = Classification::GhzType {
        entangled_pairs: 2,
        total_pairs: 6,
    };
    for a in [1e-13, 1.0, 1e200] {
        let family = StateFamily::Gabcd {
            a,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        };
        let report = analyze_family(&family, &config).unwrap();
        assert_eq!(report.classification, expected);
    }
}

#[test]
fn overflowing_amplitudes_are_rejected() {
    let family = StateFamily::Gabcd {
        a: f64::MAX,
        b: 0.0,
        c: 0.0,
        d: f64::MAX,
    };
    assert!(matches!(
        analyze_family(&family, &AnalysisConfig::default()),
        Err(AnalysisError::State(StateError::NonFiniteAmplitude(_)))
    ));
}

#[test]
fn spectrum_warnings_are_advisory() {
    let family = StateFamily::Gabcd {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
    };
    let strict = AnalysisConfig {
        spectrum_tolerance: -1.0,
        ..AnalysisConfig::default()
    };
    let baseline = analyze_family(&family, &AnalysisConfig::default()).unwrap();
    assert!(baseline.diagnostics.is_empty());

    let report = analyze_family(&family, &strict).unwrap();
    assert_eq!(report.classification, baseline.classification);
    assert_eq!(report.entangled_pair_count, Some(2));
    // four single qubits plus six pairs
    assert_eq!(report.diagnostics.len(), 10);
    assert_eq!(report.diagnostics[0].subsystem, "A");

    let json = serde_json::to_value(&report).unwrap();
    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 10);
    assert_eq!(diagnostics[0]["check"]["kind"], "negative_eigenvalue");
    assert!(serde_json::to_value(&baseline).unwrap().get("diagnostics").is_none());
}
