//! Per-position response classification.
//!
//! Serial recall labels every response position; free recall only asks
//! whether each presented item shows up among the responses.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::interval::proportion;
use crate::types::Item;

/// Outcome of one serial-recall response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseLabel {
    /// The response matches the item presented at the same position.
    Correct,
    /// No response was given.
    Omission,
    /// The response was presented, but at another position.
    Transposition,
    /// The response matches no presented item.
    Intrusion,
}

impl ResponseLabel {
    /// Every label, in report column order.
    pub const ALL: [ResponseLabel; 4] = [
        Self::Correct,
        Self::Omission,
        Self::Transposition,
        Self::Intrusion,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Omission => "omission",
            Self::Transposition => "transposition",
            Self::Intrusion => "intrusion",
        }
    }
}

/// A label attached to a 1-based response position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedResponse {
    pub position: usize,
    pub label: ResponseLabel,
}

/// Classify the response at one position.
///
/// Checks run in a fixed order: emptiness, then equality with the item at
/// the same position, then membership anywhere in `presented`.
#[must_use]
pub fn classify_response(presented_here: &Item, recalled: &Item, presented: &[Item]) -> ResponseLabel {
    if recalled.is_empty() {
        ResponseLabel::Omission
    } else if recalled == presented_here {
        ResponseLabel::Correct
    } else if presented.contains(recalled) {
        ResponseLabel::Transposition
    } else {
        ResponseLabel::Intrusion
    }
}

/// Classify every position of a serial-recall trial.
///
/// Sequences are expected to be the same length; extra items on either side
/// are ignored.
#[must_use]
pub fn classify_serial(presented: &[Item], recalled: &[Item]) -> Vec<ClassifiedResponse> {
    presented
        .iter()
        .zip(recalled)
        .enumerate()
        .map(|(i, (shown, response))| ClassifiedResponse {
            position: i + 1,
            label: classify_response(shown, response, presented),
        })
        .collect()
}

/// Free-recall correctness of each presented item: was it recalled at all?
#[must_use]
pub fn score_free(presented: &[Item], recalled: &[Item]) -> Vec<bool> {
    let recalled: HashSet<&Item> = recalled.iter().collect();
    presented.iter().map(|item| recalled.contains(item)).collect()
}

/// Count of each label within one trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub correct: u64,
    pub omission: u64,
    pub transposition: u64,
    pub intrusion: u64,
}

impl LabelCounts {
    /// Tally a sequence of classified responses.
    #[must_use]
    pub fn from_responses(responses: &[ClassifiedResponse]) -> Self {
        let mut counts = Self::default();
        for response in responses {
            counts.increment(response.label);
        }
        counts
    }

    pub fn increment(&mut self, label: ResponseLabel) {
        *self.slot(label) += 1;
    }

    #[must_use]
    pub fn get(&self, label: ResponseLabel) -> u64 {
        match label {
            ResponseLabel::Correct => self.correct,
            ResponseLabel::Omission => self.omission,
            ResponseLabel::Transposition => self.transposition,
            ResponseLabel::Intrusion => self.intrusion,
        }
    }

    /// Total across all labels.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.correct + self.omission + self.transposition + self.intrusion
    }

    /// Share of `label` among all responses, `None` for an empty trial.
    #[must_use]
    pub fn proportion(&self, label: ResponseLabel) -> Option<f64> {
        proportion(self.get(label), self.total())
    }

    fn slot(&mut self, label: ResponseLabel) -> &mut u64 {
        match label {
            ResponseLabel::Correct => &mut self.correct,
            ResponseLabel::Omission => &mut self.omission,
            ResponseLabel::Transposition => &mut self.transposition,
            ResponseLabel::Intrusion => &mut self.intrusion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<Item> {
        values.iter().map(|v| Item::new(v)).collect()
    }

    fn labels(presented: &[&str], recalled: &[&str]) -> Vec<ResponseLabel> {
        classify_serial(&items(presented), &items(recalled))
            .into_iter()
            .map(|r| r.label)
            .collect()
    }

    #[test]
    fn mixed_trial_is_labelled_per_position() {
        assert_eq!(
            labels(&["A", "B", "C"], &["A", "C", ""]),
            vec![
                ResponseLabel::Correct,
                ResponseLabel::Transposition,
                ResponseLabel::Omission
            ]
        );
    }

    #[test]
    fn unknown_response_is_intrusion() {
        assert_eq!(
            labels(&["1", "2", "3"], &["1", "9", "3"]),
            vec![
                ResponseLabel::Correct,
                ResponseLabel::Intrusion,
                ResponseLabel::Correct
            ]
        );
    }

    #[test]
    fn empty_response_is_omission_even_when_presented_is_empty() {
        assert_eq!(labels(&[""], &[""]), vec![ResponseLabel::Omission]);
    }

    #[test]
    fn match_at_own_position_beats_duplicate_elsewhere() {
        // "A" also appears at position 3, but position 1 matches exactly.
        assert_eq!(
            labels(&["A", "B", "A"], &["A", "A", "B"]),
            vec![
                ResponseLabel::Correct,
                ResponseLabel::Transposition,
                ResponseLabel::Transposition
            ]
        );
    }

    #[test]
    fn any_duplicate_position_is_enough_for_transposition() {
        assert_eq!(
            labels(&["7", "7", "2"], &["2", "9", "7"]),
            vec![
                ResponseLabel::Transposition,
                ResponseLabel::Intrusion,
                ResponseLabel::Transposition
            ]
        );
    }

    #[test]
    fn positions_are_one_based() {
        let classified = classify_serial(&items(&["A", "B"]), &items(&["A", "B"]));

        assert_eq!(classified[0].position, 1);
        assert_eq!(classified[1].position, 2);
    }

    #[test]
    fn free_scoring_ignores_order_and_duplicates() {
        let correct = score_free(&items(&["A", "B", "C"]), &items(&["C", "A", "C"]));

        assert_eq!(correct, vec![true, false, true]);
    }

    #[test]
    fn free_scoring_with_no_responses_is_all_false() {
        let correct = score_free(&items(&["A", "B"]), &[]);

        assert_eq!(correct, vec![false, false]);
    }

    #[test]
    fn label_counts_sum_to_responses() {
        let classified = classify_serial(
            &items(&["A", "B", "C", "D"]),
            &items(&["A", "D", "", "X"]),
        );

        let counts = LabelCounts::from_responses(&classified);

        assert_eq!(counts.correct, 1);
        assert_eq!(counts.transposition, 1);
        assert_eq!(counts.omission, 1);
        assert_eq!(counts.intrusion, 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.proportion(ResponseLabel::Correct), Some(0.25));
    }

    #[test]
    fn empty_counts_have_no_proportions() {
        let counts = LabelCounts::default();

        for label in ResponseLabel::ALL {
            assert_eq!(counts.proportion(label), None);
        }
    }

    #[test]
    fn label_names_are_snake_case() {
        let names: Vec<_> = ResponseLabel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(names, vec!["correct", "omission", "transposition", "intrusion"]);
        assert_eq!(
            serde_json::to_string(&ResponseLabel::Transposition).unwrap(),
            "\"transposition\""
        );
    }
}
