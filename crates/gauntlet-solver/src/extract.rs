//! Answer extraction from free-text model replies.
//!
//! Vision models restate their reasoning before answering, so numeric
//! answers favor the last digit run in the text. The sum task is the
//! exception: the model enumerates the individual labeled values and the
//! extractor, not the model, computes the total.

use gauntlet_core::{ExtractedValue, TaskKind};
use regex::Regex;
use std::sync::OnceLock;

/// Outcome of extracting a typed answer from model text.
///
/// `Failed` is a recoverable condition: the controller advances to the
/// next attempt rather than aborting the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A typed answer was found
    Value(ExtractedValue),
    /// No pattern matched the model text
    Failed,
}

impl Extraction {
    /// String form for the run log; empty on failure.
    #[must_use]
    pub fn log_field(&self) -> String {
        match self {
            Self::Value(v) => v.to_string(),
            Self::Failed => String::new(),
        }
    }
}

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

fn seat_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z]-\d{1,2}").expect("valid regex"))
}

/// Extract a typed answer from model text for the given task kind.
///
/// - Length/Quantity: the **last** run of decimal digits wins.
/// - Sum: the arithmetic sum of **all** digit runs.
/// - `SeatLabel`: the **first** `letter-dash-number` match, kept verbatim.
///
/// Pure and deterministic over its inputs. Digit runs that overflow `i64`
/// are ignored rather than truncated.
#[must_use]
pub fn extract(kind: TaskKind, model_text: &str) -> Extraction {
    match kind {
        TaskKind::Length | TaskKind::Quantity => {
            let last = digit_runs()
                .find_iter(model_text)
                .filter_map(|m| m.as_str().parse::<i64>().ok())
                .last();
            match last {
                Some(n) => Extraction::Value(ExtractedValue::Number(n)),
                None => Extraction::Failed,
            }
        }
        TaskKind::Sum => {
            let runs: Vec<i64> = digit_runs()
                .find_iter(model_text)
                .filter_map(|m| m.as_str().parse::<i64>().ok())
                .collect();
            if runs.is_empty() {
                return Extraction::Failed;
            }
            // The aggregate can overflow even when every run fits in i64.
            let total = runs
                .iter()
                .try_fold(0i64, |acc, &n| acc.checked_add(n));
            match total {
                Some(total) => Extraction::Value(ExtractedValue::Number(total)),
                None => Extraction::Failed,
            }
        }
        TaskKind::SeatLabel => match seat_label().find(model_text) {
            Some(m) => Extraction::Value(ExtractedValue::Label(m.as_str().to_string())),
            None => Extraction::Failed,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_match_wins_for_length() {
        let result = extract(TaskKind::Length, "first I thought 3, then corrected to 7");
        assert_eq!(result, Extraction::Value(ExtractedValue::Number(7)));
    }

    #[test]
    fn test_last_match_wins_for_quantity() {
        let result = extract(
            TaskKind::Quantity,
            "I count 4 pins in one group and 5 in another, so 9",
        );
        assert_eq!(result, Extraction::Value(ExtractedValue::Number(9)));
    }

    #[test]
    fn test_sum_aggregates_all_runs() {
        let result = extract(TaskKind::Sum, "labels read 3, 5, and 10");
        assert_eq!(result, Extraction::Value(ExtractedValue::Number(18)));
    }

    #[test]
    fn test_sum_single_run() {
        let result = extract(TaskKind::Sum, "the total is 42");
        assert_eq!(result, Extraction::Value(ExtractedValue::Number(42)));
    }

    #[test]
    fn test_seat_label_first_match() {
        let result = extract(TaskKind::SeatLabel, "the occupied seat is B-12, confirmed");
        assert_eq!(
            result,
            Extraction::Value(ExtractedValue::Label("B-12".to_string()))
        );
    }

    #[test]
    fn test_seat_label_two_digit_bound() {
        let result = extract(TaskKind::SeatLabel, "I see A-1 near the aisle");
        assert_eq!(
            result,
            Extraction::Value(ExtractedValue::Label("A-1".to_string()))
        );
    }

    #[test]
    fn test_seat_label_no_match_fails() {
        assert_eq!(extract(TaskKind::SeatLabel, "no seat visible"), Extraction::Failed);
    }

    #[test]
    fn test_no_digits_fails() {
        assert_eq!(extract(TaskKind::Length, "I cannot tell"), Extraction::Failed);
        assert_eq!(extract(TaskKind::Sum, ""), Extraction::Failed);
    }

    #[test]
    fn test_determinism() {
        let text = "the scale reads 12, definitely 12";
        let first = extract(TaskKind::Length, text);
        for _ in 0..10 {
            assert_eq!(extract(TaskKind::Length, text), first);
        }
    }

    #[test]
    fn test_overflowing_runs_ignored() {
        let result = extract(TaskKind::Length, "id 99999999999999999999999 but length 8");
        assert_eq!(result, Extraction::Value(ExtractedValue::Number(8)));
    }

    #[test]
    fn test_sum_overflow_fails() {
        let text = format!("totals {} and 5", i64::MAX);
        assert_eq!(extract(TaskKind::Sum, &text), Extraction::Failed);
    }

    #[test]
    fn test_log_field() {
        assert_eq!(
            extract(TaskKind::Length, "answer: 7").log_field(),
            "7"
        );
        assert_eq!(extract(TaskKind::Length, "unclear").log_field(), "");
    }
}
