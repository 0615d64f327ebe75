//! portquiz-core — Quiz engine for network port and protocol drills.
//!
//! This crate owns the quiz state machine: loading the record set, picking
//! the next question, checking answers, and tracking per-question streaks.
//! Presentation (terminal, GUI, scripts) lives outside and drives a
//! [`session::QuizSession`] through plain method calls.

pub mod answer;
pub mod config;
pub mod error;
pub mod mastery;
pub mod model;
pub mod selector;
pub mod session;
pub mod store;
pub mod traits;

pub use error::QuizError;
pub use model::{Direction, QuestionRecord};
pub use session::{QuizSession, SessionState, Turn};
pub use store::RecordSet;
