// src/health/aggregate.rs
use crate::probe::ProbeResult;
use serde::{Deserialize, Serialize};

/// The single verdict over a probe run. `ok` holds only when at least one
/// probe ran and every one of them passed. An empty run is a failing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    pub ok: bool,
    pub results: Vec<ProbeResult>,
    pub ts: i64,
}

/// Pure reduction. The caller stamps `ts` (unix seconds) so the same input
/// always yields the same output.
pub fn aggregate(results: Vec<ProbeResult>, ts: i64) -> AggregateReport {
    let ok = !results.is_empty() && results.iter().all(|r| r.ok);
    AggregateReport { ok, results, ts }
}

/// One-line alert text naming only the failing targets, in report order.
pub fn failure_summary(report: &AggregateReport) -> String {
    let failing: Vec<&str> = report
        .results
        .iter()
        .filter(|r| !r.ok)
        .map(|r| r.name.as_str())
        .collect();

    format!("Health FAILED: {}", failing.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn passing(name: &str) -> ProbeResult {
        ProbeResult::up(
            name.into(),
            format!("http://{}/health", name).parse().unwrap(),
            200,
        )
    }

    fn failing(name: &str) -> ProbeResult {
        ProbeResult::wrong_status(
            name.into(),
            format!("http://{}/health", name).parse().unwrap(),
            500,
        )
    }

    #[test]
    fn empty_results_fail() {
        let report = aggregate(Vec::new(), 0);
        assert!(!report.ok);
        assert!(report.results.is_empty());
    }

    #[test]
    fn all_passing_is_ok() {
        let report = aggregate(vec![passing("a"), passing("b")], 1700000000);
        assert!(report.ok);
        assert_eq!(report.ts, 1700000000);
    }

    #[test]
    fn single_failure_flips_verdict() {
        let report = aggregate(vec![passing("a"), failing("b"), passing("c")], 0);
        assert!(!report.ok);
    }

    #[test]
    fn summary_names_only_failing_targets() {
        let report = aggregate(vec![passing("healthy"), failing("docling")], 0);
        assert_eq!(failure_summary(&report), "Health FAILED: docling");
    }

    #[test]
    fn summary_joins_multiple_failures_in_order() {
        let report = aggregate(vec![failing("docling"), passing("ok"), failing("qdrant")], 0);
        assert_eq!(failure_summary(&report), "Health FAILED: docling, qdrant");
    }

    proptest! {
        // Flipping any single result to failing must flip the verdict.
        #[test]
        fn any_single_failure_fails_the_aggregate(len in 1usize..8, flip in 0usize..8) {
            let flip = flip % len;
            let results: Vec<ProbeResult> = (0..len)
                .map(|i| if i == flip { failing("x") } else { passing("x") })
                .collect();

            prop_assert!(!aggregate(results, 0).ok);
        }

        #[test]
        fn verdict_is_deterministic(len in 0usize..8, ts in 0i64..2_000_000_000) {
            let results: Vec<ProbeResult> = (0..len).map(|_| passing("x")).collect();
            let a = aggregate(results.clone(), ts);
            let b = aggregate(results, ts);
            prop_assert_eq!(a.ok, b.ok);
            prop_assert_eq!(a.ts, b.ts);
        }
    }
}
