//! Quiz error types.
//!
//! Running out of questions is not an error; it is reported as a normal
//! completion through [`crate::session::Turn::Completed`].

use thiserror::Error;

use crate::session::SessionState;

/// Errors raised by the quiz engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The four source lists do not have the same number of lines.
    #[error(
        "The files do not have the same number of lines \
         (ports: {ports}, acronyms: {acronyms}, descriptions: {descriptions}, transports: {transports})"
    )]
    StructuralMismatch {
        ports: usize,
        acronyms: usize,
        descriptions: usize,
        transports: usize,
    },

    /// An operation was called in a state that does not accept it.
    #[error("cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

impl QuizError {
    /// Returns `true` if the session can never ask a question after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, QuizError::StructuralMismatch { .. })
    }
}
