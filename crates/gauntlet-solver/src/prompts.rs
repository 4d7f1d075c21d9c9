//! Prompt pairs per task kind.
//!
//! The pair is selected once when the session's kind is classified and
//! held fixed afterwards. Reference prompts read the stated value on the
//! left half; candidate prompts interpret the image on the right half.

use gauntlet_core::TaskKind;

/// Classification prompt sent with the cropped instructions region.
pub const CLASSIFY_PROMPT: &str = "Determine the captcha task type from the screenshot. \
The possible task types are: 'length', 'quantity', 'sum' or 'seats'. \
'length' is usually a task to get a measurement of an object on a scale. \
'quantity' is usually a task to count a number of objects (like pins). \
'sum' is a task to add up numbers displayed on objects and compare to a given total. \
'seats' is usually a task to identify a seat label composed of a letter and a 1 or 2 digit \
number (e.g., 'A-1' or 'B-12'). Output only the task type word.";

/// The reference/candidate prompt pair for one task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSet {
    /// Prompt for the reference (left) image, read once per round
    pub reference: &'static str,
    /// Prompt for candidate (right) images, sent every attempt
    pub candidate: &'static str,
}

impl PromptSet {
    /// Look up the fixed prompt pair for a task kind.
    #[must_use]
    pub fn for_kind(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Length => Self {
                reference: "What is the number on the picture? Output only the number.",
                candidate: "Look at the attached image. The image shows a simple measuring \
                    scale with numerical markings. An object's edge is aligned with one of \
                    these marks. Your task is to identify the numerical value on the scale \
                    where the object ends and output that measured length as a number (in \
                    the same units indicated on the scale). Provide the measurement as a \
                    round integer number in your answer.",
            },
            TaskKind::Quantity => Self {
                reference: "What is the number on the picture? Output only the number \
                    representing the count of objects.",
                candidate: "Examine the attached image. The image displays a collection of \
                    objects. Your task is to count the number of objects and output that \
                    number.",
            },
            TaskKind::Sum => Self {
                reference: "What is the number displayed on the left image? Output only the \
                    number.",
                candidate: "Look at the attached image. The image shows several objects, \
                    each with a number on it. Your task is to extract all numbers from the \
                    image, add them up, and output only the total sum as a number.",
            },
            TaskKind::SeatLabel => Self {
                reference: "What is the combination of a letter and a 1 or 2 digit number \
                    displayed on the left image? Provide them concatenated with a dash \
                    (e.g., 'A-1' or 'A-12').",
                candidate: "Look at the attached image. The image shows seats arranged in \
                    rows and columns, with each seat labeled by a letter and a 1 or 2 digit \
                    number. Only one seat is occupied by a person, which is the target \
                    seat. Identify the label corresponding to the occupied seat and output \
                    it exactly as shown (e.g., 'A-1' or 'A-12').",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_prompts() {
        for kind in TaskKind::all() {
            let set = PromptSet::for_kind(kind);
            assert!(!set.reference.is_empty());
            assert!(!set.candidate.is_empty());
        }
    }

    #[test]
    fn test_pairs_differ_per_kind() {
        let length = PromptSet::for_kind(TaskKind::Length);
        let seats = PromptSet::for_kind(TaskKind::SeatLabel);
        assert_ne!(length, seats);
    }

    #[test]
    fn test_classify_prompt_enumerates_kinds() {
        for kind in TaskKind::all() {
            assert!(CLASSIFY_PROMPT.contains(kind.as_str()));
        }
    }
}
