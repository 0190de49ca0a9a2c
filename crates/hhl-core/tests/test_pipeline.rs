//! End-to-end tests of the HHL pipeline on the reference scenarios.

use hhl_core::{
    Event, HhlCircuit, HhlError, NullReporter, PipelineConfig, RecordingReporter, Scenario, Stage,
    rotation_angles, run_batch, run_scenario,
};
use hhl_state::{Operator, Statevector};

fn config() -> PipelineConfig {
    PipelineConfig::default()
}

fn post_select_probability(rec: &RecordingReporter) -> f64 {
    rec.events
        .iter()
        .find_map(|e| match e {
            Event::PostSelected { probability } => Some(*probability),
            _ => None,
        })
        .unwrap()
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_one_matches_classical_ratio() {
    let s = &Scenario::defaults()[0];
    let mut rec = RecordingReporter::new();
    let out = run_scenario(s, &config(), &mut rec).unwrap();

    assert!((out.eigenvalues[0] - 2.0 / 3.0).abs() < 1e-12);
    assert!((out.eigenvalues[1] - 4.0 / 3.0).abs() < 1e-12);
    assert!((out.parameters.ratio - 2.0).abs() < 1e-9);
    assert!((out.parameters.lam[0] - 1.0).abs() < 1e-9);
    assert!((out.parameters.lam[1] - 2.0).abs() < 1e-9);
    assert!(!out.rotation.corrected);
    assert_eq!(out.verified, Some(true));
    assert!((out.classical[0] - 9.0).abs() < 1e-9);
    assert!((out.quantum[0] - 9.0).abs() < 1e-4);
    assert!((post_select_probability(&rec) - 0.625).abs() < 1e-9);
}

#[test]
fn scenario_two_applies_overlap_correction() {
    let s = &Scenario::defaults()[1];
    let out = run_scenario(s, &config(), &mut NullReporter).unwrap();
    assert_eq!(out.parameters.rounded_lam(), [1, 3]);
    assert!(out.rotation.corrected);
    assert_eq!(out.verified, None);
}

#[test]
fn every_reference_scenario_verifies_when_asked() {
    let expected = [9.0, 4.0, 1.0 / 9.0, 0.25];
    for (mut s, ratio) in Scenario::defaults().into_iter().zip(expected) {
        s.verify = true;
        let out = run_scenario(&s, &config(), &mut NullReporter).unwrap();
        assert!(
            (out.quantum[0] - ratio).abs() < 1e-4,
            "{}: quantum ratio {}",
            s.name,
            out.quantum[0]
        );
    }
}

#[test]
fn final_state_has_clean_clock_and_set_ancilla() {
    let s = &Scenario::defaults()[0];
    let out = run_scenario(s, &config(), &mut NullReporter).unwrap();
    // qubit 0 = breg, qubits 1-2 = clock, qubit 3 = anc
    assert_eq!(out.final_state.significant(1e-3), vec![0b1000, 0b1001]);
    assert!((out.final_state.norm() - 1.0).abs() < 1e-9);
    assert_eq!(out.state_lines.len(), 2);
}

#[test]
fn repeated_runs_are_identical() {
    let s = &Scenario::defaults()[1];
    let a = run_scenario(s, &config(), &mut NullReporter).unwrap();
    let b = run_scenario(s, &config(), &mut NullReporter).unwrap();
    assert_eq!(a.final_state, b.final_state);
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

#[test]
fn stage_by_stage_equals_full_run() {
    let s = &Scenario::defaults()[0];
    let out = run_scenario(s, &config(), &mut NullReporter).unwrap();

    let a = s.matrix().unwrap();
    let eig = hhl_core::compute_eigen(&a, 1e-9, 1e-9).unwrap();
    let p = hhl_core::plan_parameters(&eig.w).unwrap();
    let u = hhl_core::build_unitary(&eig.w, &eig.v, p.t, 1e-9).unwrap();
    let qc = HhlCircuit::build(s.b, p.lam, &u, p.c, 2).unwrap();

    let mut state = qc.initial_state();
    for stage in Stage::ALL {
        state = qc.run_stage(stage, &state).unwrap();
    }
    assert_eq!(state, out.final_state);
}

#[test]
fn inverse_qft_reads_out_scaled_eigenvalues() {
    // b = |1> is not an eigenvector, so both lam = 1 and lam = 2 appear in
    // the clock register after the inverse QFT.
    let s = &Scenario::defaults()[0];
    let a = s.matrix().unwrap();
    let eig = hhl_core::compute_eigen(&a, 1e-9, 1e-9).unwrap();
    let p = hhl_core::plan_parameters(&eig.w).unwrap();
    let u = hhl_core::build_unitary(&eig.w, &eig.v, p.t, 1e-9).unwrap();
    let qc = HhlCircuit::build(s.b, p.lam, &u, p.c, 2).unwrap();

    let mut state = qc.initial_state();
    for stage in &Stage::ALL[..4] {
        state = qc.run_stage(*stage, &state).unwrap();
    }
    let clock = qc.clock();
    let mut values: Vec<u64> = state
        .significant(1e-9)
        .into_iter()
        .map(|i| clock.value_of(i))
        .collect();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn post_select_on_empty_subspace_fails() {
    let qc = HhlCircuit::build([0.0, 1.0], [1.0, 2.0], &Operator::identity(2), 1.0, 2).unwrap();
    let err = qc.run(&mut NullReporter).unwrap_err();
    assert!(matches!(err, HhlError::ZeroAmplitudeOutcome { outcome: 1, .. }));
}

#[test]
fn post_select_stage_leaves_input_untouched_on_failure() {
    let qc = HhlCircuit::build([0.0, 1.0], [1.0, 2.0], &Operator::identity(2), 1.0, 2).unwrap();
    let before: Statevector = qc.initial_state();
    assert!(qc.run_stage(Stage::PostSelect, &before).is_err());
    assert_eq!(before, qc.initial_state());
}

#[test]
fn rotation_correction_follows_parity() {
    let plain = rotation_angles([1.0, 2.0], 1.0).unwrap();
    let raw = rotation_angles([1.0, 3.0], 1.0).unwrap();
    assert!(!plain.corrected);
    assert!(raw.corrected);
    assert!((plain.angles[1] - 2.0 * 0.5_f64.asin()).abs() < 1e-12);
    assert!((raw.angles[1] - (2.0 * (1.0_f64 / 3.0).asin() - raw.angles[0])).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn non_hermitian_scenario_is_invalid() {
    let s = Scenario::new("skew", [[1.0, 2.0], [0.0, 1.0]], [0.0, 1.0], true);
    let err = run_scenario(&s, &config(), &mut NullReporter).unwrap_err();
    assert!(matches!(err, HhlError::InvalidInput(_)));
}

#[test]
fn half_integer_lam_skips_overlap_correction() {
    // lam = [1, 2.5]; ties round to even, so the clock value is 2
    let s = Scenario::new("diag-2-5", [[2.0, 0.0], [0.0, 5.0]], [0.0, 1.0], false);
    let out = run_scenario(&s, &config(), &mut NullReporter).unwrap();
    assert!((out.parameters.lam[1] - 2.5).abs() < 1e-12);
    assert_eq!(out.parameters.rounded_lam(), [1, 2]);
    assert!(!out.rotation.corrected);
}

#[test]
fn nan_entry_scenario_is_invalid() {
    let s = Scenario::new("nan", [[f64::NAN, 0.0], [0.0, 1.0]], [0.0, 1.0], true);
    let err = run_scenario(&s, &config(), &mut NullReporter).unwrap_err();
    assert!(matches!(err, HhlError::InvalidInput(_)));
}

#[test]
fn zero_eigenvalue_is_degenerate() {
    let s = Scenario::new("rank-1", [[1.0, 1.0], [1.0, 1.0]], [0.0, 1.0], false);
    let err = run_scenario(&s, &config(), &mut NullReporter).unwrap_err();
    assert!(matches!(err, HhlError::DegenerateSpectrum { .. }));
}

#[test]
fn wide_clock_warns_and_still_runs() {
    let mut s = Scenario::defaults()[0].clone();
    s.verify = false;
    s.clock_bits = Some(3);
    let mut rec = RecordingReporter::new();
    let out = run_scenario(&s, &config(), &mut rec).unwrap();
    assert_eq!(out.final_state.num_qubits(), 5);
    assert_eq!(rec.warnings().len(), 1);
}

#[test]
fn failed_scenario_is_reported_as_not_passed() {
    let s = Scenario::new("skew", [[1.0, 2.0], [0.0, 1.0]], [0.0, 1.0], false);
    let mut rec = RecordingReporter::new();
    let _ = run_scenario(&s, &config(), &mut rec);
    assert!(matches!(
        rec.events.last(),
        Some(Event::ScenarioFinished {
            passed: Some(false),
            ..
        })
    ));
}

#[test]
fn default_batch_passes() {
    let report = run_batch(&Scenario::defaults(), &config(), &mut NullReporter);
    assert_eq!(report.entries.len(), 4);
    assert!(report.all_passed());
}
