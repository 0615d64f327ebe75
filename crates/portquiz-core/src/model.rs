//! Core data model types for portquiz.
//!
//! A question record bundles the four facts the learner drills on. Records
//! are identified by their position in the loaded lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One quiz fact: a protocol, where it listens, and what it runs over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Port number(s), comma-separated when the protocol uses several.
    pub port_spec: String,
    /// Protocol acronym (e.g. "HTTP").
    pub acronym: String,
    /// Free-text description shown after answering.
    pub description: String,
    /// Transport protocol(s), e.g. "TCP" or "TCP,UDP".
    pub transport_spec: String,
}

impl QuestionRecord {
    pub fn new(
        port_spec: impl Into<String>,
        acronym: impl Into<String>,
        description: impl Into<String>,
        transport_spec: impl Into<String>,
    ) -> Self {
        Self {
            port_spec: port_spec.into(),
            acronym: acronym.into(),
            description: description.into(),
            transport_spec: transport_spec.into(),
        }
    }

    /// Returns `true` if any field is empty. Such records load fine but can
    /// only be answered with an empty string.
    pub fn has_empty_field(&self) -> bool {
        self.port_spec.is_empty()
            || self.acronym.is_empty()
            || self.description.is_empty()
            || self.transport_spec.is_empty()
    }

    /// One-line summary: "{ports} - {description} - {acronym} - {transports}".
    pub fn fact_line(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.port_spec, self.description, self.acronym, self.transport_spec
        )
    }
}

/// Which fact is shown and which must be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Given the port, name the protocol acronym.
    PortToProtocol,
    /// Given the acronym, name the port.
    ProtocolToPort,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::PortToProtocol, Direction::ProtocolToPort];

    /// Question text for `record` in this direction.
    pub fn prompt(self, record: &QuestionRecord) -> String {
        match self {
            Direction::PortToProtocol => {
                format!("What protocol runs on port {}?", record.port_spec)
            }
            Direction::ProtocolToPort => {
                format!("What is the port number for {}?", record.acronym)
            }
        }
    }

    /// Label for the primary answer field.
    pub fn answer_label(self) -> &'static str {
        match self {
            Direction::PortToProtocol => "Protocol",
            Direction::ProtocolToPort => "Port",
        }
    }

    /// The record field the primary answer is checked against.
    pub fn expected_primary(self, record: &QuestionRecord) -> &str {
        match self {
            Direction::PortToProtocol => &record.acronym,
            Direction::ProtocolToPort => &record.port_spec,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::PortToProtocol => write!(f, "port_to_protocol"),
            Direction::ProtocolToPort => write!(f, "protocol_to_port"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "port_to_protocol" | "port" => Ok(Direction::PortToProtocol),
            "protocol_to_port" | "protocol" => Ok(Direction::ProtocolToPort),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}
