//! Answer normalization and checking.
//!
//! Answers and expected fields are compared as sets of comma-separated
//! tokens, so "TCP,UDP" and "udp, tcp" are the same transport answer. Tokens
//! are not trimmed individually: only the transport loses inner whitespace.
//! There is no partial credit: both the primary answer and the transport
//! must match.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{Direction, QuestionRecord};

/// Whether a submitted answer was fully right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        self == Outcome::Correct
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Correct => write!(f, "Correct"),
            Outcome::Incorrect => write!(f, "Incorrect"),
        }
    }
}

/// Per-field breakdown of a checked answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerCheck {
    pub primary_correct: bool,
    pub transport_correct: bool,
}

impl AnswerCheck {
    pub fn outcome(self) -> Outcome {
        if self.primary_correct && self.transport_correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Uppercase and trim a primary answer.
pub fn normalize_primary(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Uppercase a transport answer and drop all whitespace.
pub fn normalize_transport(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Split a normalized string on commas into a set of tokens.
///
/// An empty string yields the set `{""}`, so an empty answer only matches an
/// empty field.
pub fn token_set(normalized: &str) -> BTreeSet<String> {
    normalized
        .split(',')
        .map(str::to_string)
        .collect()
}

/// Check both answer fields against `record` for the given direction.
pub fn check_answer(
    record: &QuestionRecord,
    direction: Direction,
    primary_answer: &str,
    transport_answer: &str,
) -> AnswerCheck {
    // The port spec is compared as stored; only the acronym is case-folded.
    let expected = direction.expected_primary(record);
    let expected_primary = match direction {
        Direction::PortToProtocol => token_set(&normalize_primary(expected)),
        Direction::ProtocolToPort => token_set(expected),
    };
    let expected_transport = token_set(&normalize_transport(&record.transport_spec));

    let primary_correct = token_set(&normalize_primary(primary_answer)) == expected_primary;
    let transport_correct = token_set(&normalize_transport(transport_answer)) == expected_transport;

    tracing::trace!(
        primary_correct,
        transport_correct,
        "checked answer for {}",
        record.acronym
    );

    AnswerCheck {
        primary_correct,
        transport_correct,
    }
}
