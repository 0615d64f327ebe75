//! Quiz session state machine.
//!
//! A session moves between two live states:
//!
//! ```text
//! AwaitingSelection --advance--> AwaitingAnswer --submit--> AwaitingSelection
//!         |                                                   (auto-advance)
//!         +--(no question left)--> Completed
//! ```
//!
//! Loading failures never produce a session: [`QuizSession::start`] returns
//! the error instead. All mutable quiz state is owned by the session value.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::answer::{check_answer, Outcome};
use crate::error::QuizError;
use crate::mastery::MasteryTracker;
use crate::model::{Direction, QuestionRecord};
use crate::selector::{select_next, RecentHistory, Selection};
use crate::store::{RecordSet, RecordSources};
use crate::traits::{Chooser, RandomChooser};

/// Reason reported when the quiz runs out of questions.
pub const COMPLETION_REASON: &str = "All questions have been ignored or answered.";

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingSelection,
    AwaitingAnswer,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::AwaitingSelection => write!(f, "awaiting selection"),
            SessionState::AwaitingAnswer => write!(f, "awaiting an answer"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// A question ready to be shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub index: usize,
    pub direction: Direction,
    pub prompt: String,
    /// Label for the primary answer field ("Protocol" or "Port").
    pub answer_label: &'static str,
}

/// Terminal signal: nothing left to ask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub reason: String,
}

/// What the session produces after selecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Turn {
    Question(Question),
    Completed(Completion),
}

impl Turn {
    pub fn is_completed(&self) -> bool {
        matches!(self, Turn::Completed(_))
    }
}

/// The learner's input for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub primary: String,
    pub transport: String,
    /// Stop asking this question after scoring it.
    pub ignore: bool,
}

impl Answer {
    pub fn new(primary: impl Into<String>, transport: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            transport: transport.into(),
            ignore: false,
        }
    }

    pub fn ignoring(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// Scored result of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnResult {
    pub index: usize,
    pub outcome: Outcome,
    /// "{outcome}: {ports} - {description} - {acronym} - {transports}".
    pub summary: String,
    pub record: QuestionRecord,
    /// Streak after this answer.
    pub streak: u32,
    pub ignored: bool,
}

/// A scored answer plus the turn that immediately follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub result: TurnResult,
    pub next: Turn,
}

/// One learner's run through a record set.
pub struct QuizSession<C: Chooser = RandomChooser> {
    id: Uuid,
    records: RecordSet,
    mastery: MasteryTracker,
    history: RecentHistory,
    chooser: C,
    state: SessionState,
    current: Option<(usize, Direction)>,
}

impl<C: Chooser> QuizSession<C> {
    /// Load the record set and open a session in `AwaitingSelection`.
    ///
    /// A structural mismatch is returned as an error and no session exists.
    pub fn start(sources: &RecordSources, chooser: C) -> Result<Self, QuizError> {
        let records = RecordSet::load(sources).inspect_err(|e| {
            tracing::error!("cannot start quiz: {e}");
        })?;
        Ok(Self::from_records(records, chooser))
    }

    /// Open a session over an already loaded record set.
    pub fn from_records(records: RecordSet, chooser: C) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session = %id, "quiz started with {} questions", records.len());
        Self {
            id,
            mastery: MasteryTracker::new(records.len()),
            records,
            history: RecentHistory::new(),
            chooser,
            state: SessionState::AwaitingSelection,
            current: None,
        }
    }

    /// Select the next question, or complete the quiz if none can be chosen.
    pub fn advance(&mut self) -> Result<Turn, QuizError> {
        if self.state != SessionState::AwaitingSelection {
            return Err(QuizError::InvalidState {
                operation: "advance",
                state: self.state,
            });
        }

        let selection = select_next(
            self.records.len(),
            &self.mastery,
            &mut self.history,
            &mut self.chooser,
        );

        match selection {
            Selection::Chosen { index, direction } => {
                let prompt = direction.prompt(&self.records[index]);
                self.current = Some((index, direction));
                self.state = SessionState::AwaitingAnswer;
                Ok(Turn::Question(Question {
                    index,
                    direction,
                    prompt,
                    answer_label: direction.answer_label(),
                }))
            }
            Selection::Exhausted => {
                self.current = None;
                self.state = SessionState::Completed;
                tracing::info!(
                    session = %self.id,
                    ignored = self.mastery.ignored_count(),
                    "quiz completed"
                );
                Ok(Turn::Completed(Completion {
                    reason: COMPLETION_REASON.to_string(),
                }))
            }
        }
    }

    /// Score an answer to the current question, then advance.
    pub fn submit(&mut self, answer: &Answer) -> Result<Submission, QuizError> {
        let (index, direction) = match (self.state, self.current) {
            (SessionState::AwaitingAnswer, Some(current)) => current,
            _ => {
                return Err(QuizError::InvalidState {
                    operation: "submit",
                    state: self.state,
                })
            }
        };
        let record = self.records[index].clone();

        let outcome =
            check_answer(&record, direction, &answer.primary, &answer.transport).outcome();
        self.mastery.record_result(index, outcome.is_correct());
        if answer.ignore {
            self.mastery.ignore(index);
        }
        let streak = self.mastery.streak(index).unwrap_or(0);

        tracing::debug!(
            session = %self.id,
            question = index,
            %direction,
            %outcome,
            streak,
            ignored = answer.ignore,
            "answer scored"
        );

        let result = TurnResult {
            index,
            outcome,
            summary: format!("{outcome}: {}", record.fact_line()),
            record,
            streak,
            ignored: answer.ignore,
        };

        self.current = None;
        self.state = SessionState::AwaitingSelection;
        let next = self.advance()?;

        Ok(Submission { result, next })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn mastery(&self) -> &MasteryTracker {
        &self.mastery
    }

    pub fn streak(&self, index: usize) -> Option<u32> {
        self.mastery.streak(index)
    }

    /// Recently asked question indices, oldest first.
    pub fn recent_history(&self) -> Vec<usize> {
        self.history.to_vec()
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<(&QuestionRecord, Direction)> {
        let (index, direction) = self.current?;
        self.records.get(index).map(|record| (record, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ScriptedChooser;

    fn sources(rows: &[(&str, &str, &str, &str)]) -> RecordSources {
        let mut src = RecordSources::default();
        for (port, acronym, desc, transport) in rows {
            src.ports.push(port.to_string());
            src.acronyms.push(acronym.to_string());
            src.descriptions.push(desc.to_string());
            src.transports.push(transport.to_string());
        }
        src
    }

    fn question(turn: &Turn) -> &Question {
        match turn {
            Turn::Question(q) => q,
            Turn::Completed(_) => panic!("expected a question, got completion"),
        }
    }

    #[test]
    fn http_end_to_end() {
        let src = sources(&[("80", "HTTP", "Web", "TCP")]);
        let mut session = QuizSession::start(&src, ScriptedChooser::new([0, 0, 0, 0])).unwrap();
        assert_eq!(session.state(), SessionState::AwaitingSelection);

        let turn = session.advance().unwrap();
        let q = question(&turn);
        assert_eq!(q.direction, Direction::PortToProtocol);
        assert!(q.prompt.contains("80"));
        assert_eq!(q.answer_label, "Protocol");
        assert_eq!(session.state(), SessionState::AwaitingAnswer);

        let first = session.submit(&Answer::new("HTTP", "TCP")).unwrap();
        assert_eq!(first.result.outcome, Outcome::Correct);
        assert_eq!(first.result.summary, "Correct: 80 - Web - HTTP - TCP");
        assert_eq!(first.result.streak, 1);
        // One history entry, so the same question may come straight back.
        assert_eq!(question(&first.next).index, 0);

        let second = session.submit(&Answer::new("HTTPS", "TCP")).unwrap();
        assert_eq!(second.result.outcome, Outcome::Incorrect);
        assert_eq!(second.result.summary, "Incorrect: 80 - Web - HTTP - TCP");
        assert_eq!(session.streak(0), Some(0));
        // Two history entries now block the only question.
        assert_eq!(
            second.next,
            Turn::Completed(Completion {
                reason: COMPLETION_REASON.to_string()
            })
        );
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn start_fails_on_mismatch() {
        let mut src = sources(&[("80", "HTTP", "Web", "TCP")]);
        src.transports.push("UDP".into());
        let err = QuizSession::start(&src, ScriptedChooser::default())
            .err()
            .unwrap();
        assert!(matches!(err, QuizError::StructuralMismatch { transports: 2, .. }));
    }

    #[test]
    fn submit_before_advance_is_rejected() {
        let src = sources(&[("22", "SSH", "Secure shell", "TCP")]);
        let mut session = QuizSession::start(&src, ScriptedChooser::default()).unwrap();
        let err = session.submit(&Answer::new("SSH", "TCP")).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidState {
                operation: "submit",
                state: SessionState::AwaitingSelection,
            }
        );
        assert_eq!(session.streak(0), Some(0));
    }

    #[test]
    fn double_advance_is_rejected() {
        let src = sources(&[("22", "SSH", "Secure shell", "TCP")]);
        let mut session = QuizSession::start(&src, ScriptedChooser::default()).unwrap();
        session.advance().unwrap();
        let err = session.advance().unwrap_err();
        assert!(matches!(err, QuizError::InvalidState { operation: "advance", .. }));
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        assert_eq!(session.recent_history(), vec![0]);
    }

    #[test]
    fn empty_record_set_completes_immediately() {
        let mut session = QuizSession::start(&RecordSources::default(), ScriptedChooser::default())
            .unwrap();
        assert!(session.advance().unwrap().is_completed());
        assert!(session.advance().is_err());
    }

    #[test]
    fn ignore_applies_even_when_wrong() {
        let src = sources(&[
            ("22", "SSH", "Secure shell", "TCP"),
            ("25", "SMTP", "Mail", "TCP"),
        ]);
        // Picks: question 0 (port->protocol), then question 1 (port->protocol).
        let mut session = QuizSession::start(&src, ScriptedChooser::new([0, 0, 0, 0])).unwrap();
        session.advance().unwrap();

        let sub = session.submit(&Answer::new("TELNET", "UDP").ignoring()).unwrap();
        assert_eq!(sub.result.outcome, Outcome::Incorrect);
        assert!(sub.result.ignored);
        assert!(!session.mastery().is_eligible(0));
        assert_eq!(question(&sub.next).index, 1);

        // Only question 1 is eligible and the window now covers it.
        let sub = session.submit(&Answer::new("SMTP", "TCP")).unwrap();
        assert_eq!(sub.result.outcome, Outcome::Correct);
        assert!(sub.next.is_completed());
    }

    #[test]
    fn ignoring_everything_completes() {
        let src = sources(&[
            ("53", "DNS", "Names", "TCP,UDP"),
            ("123", "NTP", "Time", "UDP"),
            ("161", "SNMP", "Management", "UDP"),
            ("443", "HTTPS", "Secure web", "TCP"),
        ]);
        let mut session = QuizSession::start(&src, RandomChooser::seeded(3)).unwrap();
        let mut turn = session.advance().unwrap();
        let mut asked = 0;
        while let Turn::Question(_) = &turn {
            turn = session.submit(&Answer::default().ignoring()).unwrap().next;
            asked += 1;
            assert!(asked <= 4, "ignored questions must not come back");
        }
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn protocol_to_port_prompt_and_check() {
        let src = sources(&[
            ("20,21", "FTP", "File transfer", "TCP"),
            ("69", "TFTP", "Trivial file transfer", "UDP"),
        ]);
        let mut session = QuizSession::start(&src, ScriptedChooser::new([0, 1])).unwrap();
        let turn = session.advance().unwrap();
        let q = question(&turn);
        assert_eq!(q.prompt, "What is the port number for FTP?");
        assert_eq!(q.answer_label, "Port");

        let (record, direction) = session.current_question().unwrap();
        assert_eq!(record.acronym, "FTP");
        assert_eq!(direction, Direction::ProtocolToPort);

        let sub = session.submit(&Answer::new("21,20", " tcp ")).unwrap();
        assert_eq!(sub.result.outcome, Outcome::Correct);
        assert!(session.current_question().is_some());
    }

    #[test]
    fn question_and_result_come_from_the_chosen_record() {
        let src = sources(&[
            ("80", "HTTP", "Web", "TCP"),
            ("443", "HTTPS", "Secure web", "TCP"),
            ("22", "SSH", "Secure shell", "TCP"),
        ]);
        let mut session = QuizSession::start(&src, ScriptedChooser::new([2, 0])).unwrap();
        let turn = session.advance().unwrap();
        assert_eq!(question(&turn).index, 2);
        assert_eq!(question(&turn).prompt, "What protocol runs on port 22?");

        let sub = session.submit(&Answer::new("ssh", "tcp")).unwrap();
        assert_eq!(sub.result.record, session.records()[2]);
        assert_eq!(sub.result.summary, "Correct: 22 - Secure shell - SSH - TCP");
    }

    #[test]
    fn streaks_are_per_question() {
        let src = sources(&[
            ("80", "HTTP", "Web", "TCP"),
            ("443", "HTTPS", "Secure web", "TCP"),
            ("22", "SSH", "Secure shell", "TCP"),
            ("23", "TELNET", "Remote terminal", "TCP"),
        ]);
        // Ask 0, 1, 2, then 3 (the only one outside the window), all port->protocol.
        let mut session =
            QuizSession::start(&src, ScriptedChooser::new([0, 0, 1, 0, 0, 0, 0, 0])).unwrap();
        session.advance().unwrap();
        session.submit(&Answer::new("HTTP", "TCP")).unwrap();
        session.submit(&Answer::new("HTTPS", "TCP")).unwrap();
        session.submit(&Answer::new("wrong", "TCP")).unwrap();
        assert_eq!(session.mastery().streaks(), &[1, 1, 0, 0]);
        assert_eq!(session.recent_history(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn result_serializes_for_front_ends() {
        let src = sources(&[("80", "HTTP", "Web", "TCP")]);
        let mut session = QuizSession::start(&src, ScriptedChooser::default()).unwrap();
        let turn = session.advance().unwrap();
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["event"], "question");
        assert_eq!(json["direction"], "port_to_protocol");

        let sub = session.submit(&Answer::new("http", "tcp")).unwrap();
        let json = serde_json::to_value(&sub.result).unwrap();
        assert_eq!(json["outcome"], "correct");
        assert_eq!(json["record"]["port_spec"], "80");
    }
}
