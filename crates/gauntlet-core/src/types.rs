//! Shared types used across the Gauntlet workspace.
//!
//! The challenge widget presents one of four task kinds per session; the
//! solver compares a per-round reference value against per-attempt candidate
//! values. Both sides of that comparison are modeled here.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of visual task a challenge session presents.
///
/// Determined once per session by the classifier and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Read a measurement off a scale and match it to a number.
    Length,
    /// Count objects and match the count to a number.
    Quantity,
    /// Add up numbers printed on objects and match the total.
    Sum,
    /// Identify an occupied seat label such as `B-12`.
    #[serde(rename = "seats")]
    SeatLabel,
}

impl TaskKind {
    /// Wire name of the kind, as the classifier prompt enumerates them.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Quantity => "quantity",
            Self::Sum => "sum",
            Self::SeatLabel => "seats",
        }
    }

    /// Match free-text classifier output against the known kind names.
    ///
    /// Matching is case-insensitive containment; returns `None` when no
    /// kind name appears in the text. Checked most-specific first so that
    /// a response mentioning several keywords resolves deterministically.
    #[must_use]
    pub fn from_response(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("quantity") {
            Some(Self::Quantity)
        } else if lower.contains("seats") {
            Some(Self::SeatLabel)
        } else if lower.contains("sum") {
            Some(Self::Sum)
        } else if lower.contains("length") {
            Some(Self::Length)
        } else {
            None
        }
    }

    /// All known kinds, in classifier enumeration order.
    #[must_use]
    pub fn all() -> [Self; 4] {
        [Self::Length, Self::Quantity, Self::Sum, Self::SeatLabel]
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed value extracted from free-text model output.
///
/// Numeric kinds (length, quantity, sum) extract integers; the seat task
/// extracts a letter-dash-number label. Equality is exact: integer equality
/// for numbers, case-sensitive string equality for labels. The challenge is
/// a discrete comparison, so no tolerance is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractedValue {
    /// An integer answer (length, quantity, sum tasks).
    Number(i64),
    /// A seat label such as `A-1` or `B-12`.
    Label(String),
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Label(s) => write!(f, "{s}"),
        }
    }
}

/// Produce a filesystem-safe key for naming run artifacts.
///
/// Format is `YYYYMMDD_HHMMSS` in UTC, matching the naming of persisted
/// screenshot files and the run timestamp column of the attempt log.
#[must_use]
pub fn run_key() -> String {
    Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kind_wire_names() {
        assert_eq!(TaskKind::Length.as_str(), "length");
        assert_eq!(TaskKind::Quantity.as_str(), "quantity");
        assert_eq!(TaskKind::Sum.as_str(), "sum");
        assert_eq!(TaskKind::SeatLabel.as_str(), "seats");
    }

    #[test]
    fn test_from_response_case_insensitive() {
        assert_eq!(
            TaskKind::from_response("The task type is QUANTITY."),
            Some(TaskKind::Quantity)
        );
        assert_eq!(TaskKind::from_response("seats"), Some(TaskKind::SeatLabel));
        assert_eq!(TaskKind::from_response("Sum"), Some(TaskKind::Sum));
        assert_eq!(TaskKind::from_response("length"), Some(TaskKind::Length));
    }

    #[test]
    fn test_from_response_unmatched() {
        assert_eq!(TaskKind::from_response("I'm not sure"), None);
        assert_eq!(TaskKind::from_response(""), None);
    }

    #[test]
    fn test_serde_round_trip() {
        for kind in TaskKind::all() {
            let json = serde_json::to_string(&kind).expect("serialize kind");
            let back: TaskKind = serde_json::from_str(&json).expect("deserialize kind");
            assert_eq!(kind, back);
        }
        assert_eq!(
            serde_json::to_string(&TaskKind::SeatLabel).expect("serialize"),
            "\"seats\""
        );
    }

    #[test]
    fn test_extracted_value_equality() {
        assert_eq!(ExtractedValue::Number(7), ExtractedValue::Number(7));
        assert_ne!(ExtractedValue::Number(7), ExtractedValue::Number(8));
        assert_eq!(
            ExtractedValue::Label("B-12".to_string()),
            ExtractedValue::Label("B-12".to_string())
        );
        // Labels compare case-sensitively
        assert_ne!(
            ExtractedValue::Label("b-12".to_string()),
            ExtractedValue::Label("B-12".to_string())
        );
        // A number never equals a label
        assert_ne!(
            ExtractedValue::Number(12),
            ExtractedValue::Label("12".to_string())
        );
    }

    #[test]
    fn test_extracted_value_display() {
        assert_eq!(ExtractedValue::Number(42).to_string(), "42");
        assert_eq!(ExtractedValue::Label("A-1".to_string()).to_string(), "A-1");
    }

    #[test]
    fn test_run_key_shape() {
        let key = run_key();
        assert_eq!(key.len(), 15);
        assert_eq!(key.as_bytes()[8], b'_');
        assert!(key
            .chars()
            .all(|c| c.is_ascii_digit() || c == '_'));
    }
}
