//! Sweep report types: severity levels and result aggregation.

use serde::Serialize;

use crate::cover::CoverResult;

/// Outcome class of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Covered within the cap.
    Pass,
    /// Exceeded the cap.
    Failure,
}

/// Aggregated results of a run over many boards.
///
/// Passing boards are folded into counters; only failures are kept in
/// full, so a sweep over millions of boards stays small.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Display form of the generator used.
    pub strategy: String,
    /// Boards simulated.
    pub checked: u64,
    /// Every failing board, ordered by board.
    pub failures: Vec<CoverResult>,
    /// The result with the largest `steps / S`.
    pub worst: Option<CoverResult>,
    /// Mean of `steps / S` over all boards.
    pub mean_ratio: f64,
    #[serde(skip)]
    ratio_sum: f64,
}

impl SweepReport {
    /// Creates an empty report.
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            checked: 0,
            failures: Vec::new(),
            worst: None,
            mean_ratio: 0.0,
            ratio_sum: 0.0,
        }
    }

    /// Folds one board's result in.
    pub fn push(&mut self, result: CoverResult) {
        self.checked += 1;
        self.ratio_sum += result.ratio();
        self.mean_ratio = self.ratio_sum / self.checked as f64;
        if !result.ok {
            self.failures.push(result);
        }
        if self.worst.map_or(true, |w| worse(&result, &w)) {
            self.worst = Some(result);
        }
    }

    /// Combines two partial reports over disjoint board sets.
    pub fn merge(mut self, other: SweepReport) -> Self {
        self.checked += other.checked;
        self.ratio_sum += other.ratio_sum;
        self.mean_ratio = if self.checked == 0 {
            0.0
        } else {
            self.ratio_sum / self.checked as f64
        };
        self.failures.extend(other.failures);
        self.failures.sort_by_key(CoverResult::board);
        self.worst = match (self.worst, other.worst) {
            (Some(a), Some(b)) => Some(if worse(&b, &a) { b } else { a }),
            (a, b) => a.or(b),
        };
        self
    }

    /// Returns the count of failed boards.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if no board failed.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Higher ratio wins; ties go to the smaller board so merges are
/// order-independent.
fn worse(a: &CoverResult, b: &CoverResult) -> bool {
    // a.steps / a.area > b.steps / b.area, exactly
    let lhs = u128::from(a.steps) * u128::from(b.area);
    let rhs = u128::from(b.steps) * u128::from(a.area);
    lhs > rhs || (lhs == rhs && a.board() < b.board())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(width: u64, height: u64, steps: u64, ok: bool) -> CoverResult {
        CoverResult {
            width,
            height,
            area: width * height,
            steps,
            ok,
            cap: Some(35 * width * height),
        }
    }

    #[test]
    fn test_push_tracks_failures_and_worst() {
        let mut report = SweepReport::new("sturmian");
        report.push(result(3, 3, 13, true));
        report.push(result(2, 2, 200, false));
        report.push(result(4, 1, 3, true));
        assert_eq!(report.checked, 3);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.all_passed());
        assert_eq!(report.worst.unwrap().steps, 200);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let rs = [
            result(3, 3, 18, true),
            result(2, 3, 12, true),
            result(5, 5, 2000, false),
            result(1, 7, 900, false),
        ];
        let mut a = SweepReport::new("x");
        let mut b = SweepReport::new("x");
        for r in &rs[..2] {
            a.push(*r);
        }
        for r in &rs[2..] {
            b.push(*r);
        }
        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab.checked, 4);
        assert_eq!(ab.failures, ba.failures);
        assert_eq!(ab.worst, ba.worst);
        assert_eq!(ab.worst.unwrap().board().to_string(), "1x7");
        assert!((ab.mean_ratio - ba.mean_ratio).abs() < 1e-12);
    }

    #[test]
    fn test_empty_merge() {
        let report = SweepReport::new("x").merge(SweepReport::new("x"));
        assert_eq!(report.checked, 0);
        assert!(report.all_passed());
        assert!(report.worst.is_none());
        assert_eq!(report.mean_ratio, 0.0);
    }

    #[test]
    fn test_json_shape() {
        let mut report = SweepReport::new("reference");
        report.push(result(2, 2, 9, false));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["strategy"], "reference");
        assert_eq!(json["checked"], 1);
        assert_eq!(json["failures"][0]["width"], 2);
        assert_eq!(json["failures"][0]["ok"], false);
        assert!(json.get("ratio_sum").is_none());
        assert_eq!(serde_json::to_value(Severity::Failure).unwrap(), "failure");
    }
}
