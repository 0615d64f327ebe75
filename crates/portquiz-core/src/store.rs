//! Record store: zips four parallel line lists into question records.
//!
//! Line `i` of each list together forms record `i`. The only structural
//! check is that all four lists have the same length.

use crate::error::QuizError;
use crate::model::QuestionRecord;

/// The four raw line lists a record set is built from.
#[derive(Debug, Clone, Default)]
pub struct RecordSources {
    pub ports: Vec<String>,
    pub acronyms: Vec<String>,
    pub descriptions: Vec<String>,
    pub transports: Vec<String>,
}

impl RecordSources {
    /// Split four file contents into lines. A trailing newline does not
    /// produce an extra empty line.
    pub fn from_texts(ports: &str, acronyms: &str, descriptions: &str, transports: &str) -> Self {
        Self {
            ports: split_lines(ports),
            acronyms: split_lines(acronyms),
            descriptions: split_lines(descriptions),
            transports: split_lines(transports),
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Ordered, index-addressable set of question records.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<QuestionRecord>,
}

impl RecordSet {
    /// Build a record set from raw line lists, trimming every field.
    ///
    /// Fails with [`QuizError::StructuralMismatch`] when the lists differ in
    /// length. Empty or odd-looking fields are accepted as-is.
    pub fn load(sources: &RecordSources) -> Result<Self, QuizError> {
        let ports = sources.ports.len();
        let acronyms = sources.acronyms.len();
        let descriptions = sources.descriptions.len();
        let transports = sources.transports.len();

        if !(ports == acronyms && acronyms == descriptions && descriptions == transports) {
            return Err(QuizError::StructuralMismatch {
                ports,
                acronyms,
                descriptions,
                transports,
            });
        }

        let records = sources
            .ports
            .iter()
            .zip(&sources.acronyms)
            .zip(&sources.descriptions)
            .zip(&sources.transports)
            .map(|(((port, acronym), description), transport)| {
                QuestionRecord::new(
                    port.trim(),
                    acronym.trim(),
                    description.trim(),
                    transport.trim(),
                )
            })
            .collect::<Vec<_>>();

        for (index, record) in records.iter().enumerate() {
            if record.has_empty_field() {
                tracing::warn!(
                    record = index,
                    "record has empty field(s): {}",
                    record.fact_line()
                );
            }
        }
        tracing::debug!("loaded {} question records", records.len());
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.records.iter()
    }
}

/// Indexing panics when `index >= len()`. Callers index only with positions
/// the selector drew from `0..len()`.
impl std::ops::Index<usize> for RecordSet {
    type Output = QuestionRecord;

    fn index(&self, index: usize) -> &QuestionRecord {
        &self.records[index]
    }
}

/// A non-fatal issue found in a loaded record set.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Index of the offending record.
    pub index: usize,
    /// Warning message.
    pub message: String,
}

/// Report records that will be hard or impossible to answer.
pub fn validate_record_set(set: &RecordSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (index, record) in set.iter().enumerate() {
        let empty: Vec<&str> = [
            ("port", record.port_spec.as_str()),
            ("acronym", record.acronym.as_str()),
            ("description", record.description.as_str()),
            ("transport", record.transport_spec.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !empty.is_empty() {
            warnings.push(ValidationWarning {
                index,
                message: format!("empty field(s): {}", empty.join(", ")),
            });
        }
    }

    warnings
}
