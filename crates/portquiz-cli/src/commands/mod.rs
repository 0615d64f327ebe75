pub mod init;
pub mod run;
pub mod validate;

use comfy_table::{Cell, Table};

use portquiz_core::session::QuizSession;
use portquiz_core::store::RecordSet;
use portquiz_core::traits::Chooser;

/// Per-question streaks at the end of a session.
pub fn streak_table<C: Chooser>(session: &QuizSession<C>) -> Table {
    let mastery = session.mastery();
    let mut table = Table::new();
    table.set_header(vec!["#", "Port", "Acronym", "Transport", "Streak", "Ignored"]);

    for (index, record) in session.records().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&record.port_spec),
            Cell::new(&record.acronym),
            Cell::new(&record.transport_spec),
            Cell::new(mastery.streak(index).unwrap_or(0)),
            Cell::new(if mastery.is_eligible(index) { "" } else { "yes" }),
        ]);
    }

    table
}

/// Every record in a loaded set.
pub fn record_table(records: &RecordSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Port", "Acronym", "Description", "Transport"]);

    for (index, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&record.port_spec),
            Cell::new(&record.acronym),
            Cell::new(&record.description),
            Cell::new(&record.transport_spec),
        ]);
    }

    table
}
