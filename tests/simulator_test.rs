//! Simulator Tests
//!
//! These tests replay the classic textbook reference strings and check the
//! step-by-step traces and totals of every policy.

use pagesim::{
    Comparison, Error, PageId, PolicyKind, ReferenceSequence, Simulator, Statistics, StepOutcome,
    Trace,
};

/// Classic textbook reference string.
const BASELINE: [u32; 13] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];

/// Reference string exhibiting Belady's anomaly under FIFO.
const BELADY: [u32; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn simulate(pages: &[u32], frames: usize, kind: PolicyKind) -> (Trace, Statistics) {
    init_tracing();
    let seq = ReferenceSequence::from(pages);
    Simulator::new(frames).unwrap().run(&seq, kind)
}

fn snapshot(ids: &[Option<u32>]) -> Vec<Option<PageId>> {
    ids.iter().map(|id| id.map(PageId::new)).collect()
}

fn outcomes(trace: &Trace) -> String {
    trace
        .iter()
        .map(|step| if step.outcome.is_hit() { 'H' } else { 'F' })
        .collect()
}

// ============================================================================
// Baseline: 7 0 1 2 0 3 0 4 2 3 0 3 2, three frames
// ============================================================================

#[test]
fn test_baseline_fifo() {
    let (trace, stats) = simulate(&BASELINE, 3, PolicyKind::Fifo);

    assert_eq!(outcomes(&trace), "FFFFHFFFFFFHH");
    assert_eq!(stats.faults(), 10);
    assert_eq!(stats.hits(), 3);
    assert_eq!(stats.evictions(), 7);

    assert_eq!(trace.steps()[3].frames, snapshot(&[Some(0), Some(1), Some(2)]));
    assert_eq!(trace.steps()[12].frames, snapshot(&[Some(2), Some(3), Some(0)]));
}

#[test]
fn test_baseline_lru() {
    let (trace, stats) = simulate(&BASELINE, 3, PolicyKind::Lru);

    assert_eq!(outcomes(&trace), "FFFFHFHFFFFHH");
    assert_eq!(stats.faults(), 9);
    assert_eq!(stats.hits(), 4);

    // Least recently used first
    assert_eq!(trace.steps()[4].frames, snapshot(&[Some(1), Some(2), Some(0)]));
    assert_eq!(trace.steps()[12].frames, snapshot(&[Some(0), Some(3), Some(2)]));
}

#[test]
fn test_baseline_optimal() {
    let (trace, stats) = simulate(&BASELINE, 3, PolicyKind::Optimal);

    assert_eq!(outcomes(&trace), "FFFFHFHFHHFHH");
    assert_eq!(stats.faults(), 7);
    assert_eq!(stats.hits(), 6);

    // 7 and 1 are both never used again; 7 sits in the first slot
    assert_eq!(
        trace.steps()[3].outcome,
        StepOutcome::Fault {
            evicted: Some(PageId::new(7))
        }
    );
    assert_eq!(trace.steps()[12].frames, snapshot(&[Some(2), Some(0), Some(3)]));
}

#[test]
fn test_baseline_clock() {
    let (trace, stats) = simulate(&BASELINE, 3, PolicyKind::Clock);

    assert_eq!(outcomes(&trace), "FFFFHFHFFHFFH");
    assert_eq!(stats.faults(), 9);
    assert_eq!(stats.hits(), 4);

    assert_eq!(trace.steps()[0].frames, snapshot(&[Some(7), None, None]));
    assert_eq!(trace.steps()[7].frames, snapshot(&[Some(4), Some(0), Some(3)]));
    assert_eq!(trace.steps()[12].frames, snapshot(&[Some(3), Some(2), Some(0)]));
}

#[test]
fn test_baseline_optimal_is_global_minimum() {
    init_tracing();
    let seq = ReferenceSequence::from(&BASELINE[..]);
    let comparison = Simulator::new(3).unwrap().compare(&seq);

    let optimal = comparison.stats(PolicyKind::Optimal).unwrap().faults();
    for run in &comparison {
        assert!(optimal <= run.stats.faults(), "{} beat Optimal", run.kind);
    }
    assert_eq!(comparison.best().unwrap().kind, PolicyKind::Optimal);

    let clock = comparison.stats(PolicyKind::Clock).unwrap().faults();
    let fifo = comparison.stats(PolicyKind::Fifo).unwrap().faults();
    let lru = comparison.stats(PolicyKind::Lru).unwrap().faults();
    assert!(clock <= fifo);
    assert!(clock.abs_diff(lru) <= 1);
}

// ============================================================================
// Belady's anomaly
// ============================================================================

#[test]
fn test_belady_anomaly_fifo() {
    let seq = ReferenceSequence::from(&BELADY[..]);
    let sweep = Simulator::sweep(&seq, PolicyKind::Fifo, [3, 4]).unwrap();

    assert_eq!(sweep[0].1.faults(), 9);
    assert_eq!(sweep[1].1.faults(), 10);
    assert!(sweep[1].1.faults() > sweep[0].1.faults());
}

#[test]
fn test_belady_anomaly_absent_for_stack_policies() {
    let seq = ReferenceSequence::from(&BELADY[..]);

    let lru = Simulator::sweep(&seq, PolicyKind::Lru, [3, 4]).unwrap();
    assert_eq!((lru[0].1.faults(), lru[1].1.faults()), (10, 8));

    let optimal = Simulator::sweep(&seq, PolicyKind::Optimal, [3, 4]).unwrap();
    assert_eq!((optimal[0].1.faults(), optimal[1].1.faults()), (7, 6));
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn test_zero_capacity_is_invalid() {
    let seq = ReferenceSequence::from(&BASELINE[..]);
    for kind in PolicyKind::ALL {
        assert_eq!(pagesim::run(&seq, 0, kind).unwrap_err(), Error::InvalidCapacity(0));
    }
}

#[test]
fn test_empty_sequence_has_zero_hit_rate() {
    for kind in PolicyKind::ALL {
        let (trace, stats) = simulate(&[], 4, kind);
        assert!(trace.is_empty());
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats, Statistics::default());
    }
}

#[test]
fn test_large_capacity_faults_once_per_page() {
    let distinct = ReferenceSequence::from(&BASELINE[..]).distinct_pages();
    for kind in PolicyKind::ALL {
        let (trace, stats) = simulate(&BASELINE, distinct, kind);
        assert_eq!(stats.faults() as usize, distinct, "{}", kind);
        assert_eq!(stats.evictions(), 0, "{}", kind);
        assert_eq!(stats.hits() as usize, BASELINE.len() - distinct, "{}", kind);
        assert!(trace.last().unwrap().occupied() == distinct);
    }
}

#[test]
fn test_single_frame_hits_only_on_repeats() {
    for kind in PolicyKind::ALL {
        let (trace, _) = simulate(&[1, 1, 2, 2, 1], 1, kind);
        assert_eq!(outcomes(&trace), "FHFHF", "{}", kind);
    }
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_rerun_is_byte_identical() {
    let seq = ReferenceSequence::from(&BASELINE[..]);
    let sim = Simulator::new(3).unwrap();

    for kind in PolicyKind::ALL {
        let (first, first_stats) = sim.run(&seq, kind);
        let (second, second_stats) = sim.run(&seq, kind);

        assert_eq!(first, second);
        assert_eq!(first_stats, second_stats);
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_different_policies_have_different_fingerprints() {
    let (fifo, _) = simulate(&BASELINE, 3, PolicyKind::Fifo);
    let (lru, _) = simulate(&BASELINE, 3, PolicyKind::Lru);
    assert_ne!(fifo.fingerprint(), lru.fingerprint());
}

#[test]
fn test_trace_rows_render_fixed_width() {
    let (trace, _) = simulate(&BASELINE, 3, PolicyKind::Fifo);
    assert_eq!(
        trace.steps()[1].to_string(),
        "Step 2 | 0 | 7 0 - | faults: 2 | hits: 0 | 0.00% | Fault"
    );
    assert_eq!(
        trace.steps()[4].to_string(),
        "Step 5 | 0 | 0 1 2 | faults: 4 | hits: 1 | 20.00% | Hit"
    );
}

#[test]
fn test_json_output_carries_hit_rate() {
    let (trace, stats) = simulate(&[], 3, PolicyKind::Lru);
    assert!(trace.is_empty());
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["hit_rate"], 0.0);

    let (trace, stats) = simulate(&[1, 1], 1, PolicyKind::Lru);
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["faults"], 1);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["hit_rate"], 0.5);

    let json = serde_json::to_value(&trace).unwrap();
    assert_eq!(json["steps"][0]["hit_rate"], 0.0);
    assert_eq!(json["steps"][1]["hit_rate"], 0.5);
}

#[test]
fn test_comparison_json_roundtrip_and_rejection() {
    init_tracing();
    let seq = ReferenceSequence::from(&BASELINE[..]);
    let comparison = Simulator::new(3).unwrap().compare(&seq);

    let json = serde_json::to_string(&comparison).unwrap();
    let back: Comparison = serde_json::from_str(&json).unwrap();
    assert_eq!(back, comparison);

    let empty = serde_json::from_str::<Comparison>(r#"{"capacity":3,"runs":[]}"#);
    assert!(empty.is_err());
}

#[test]
fn test_trace_json_rejects_foreign_shape() {
    let (trace, _) = simulate(&BASELINE, 3, PolicyKind::Clock);
    let mut json = serde_json::to_value(&trace).unwrap();
    json["steps"][0]["ordinal"] = serde_json::json!(7);
    assert!(serde_json::from_value::<Trace>(json).is_err());

    let mut json = serde_json::to_value(&trace).unwrap();
    json["steps"][0]["frames"] = serde_json::json!([7]);
    assert!(serde_json::from_value::<Trace>(json).is_err());
}
