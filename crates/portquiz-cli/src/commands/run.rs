//! The `portquiz run` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use portquiz_core::session::{Answer, Question, QuizSession, Turn, TurnResult};
use portquiz_core::traits::{Chooser, RandomChooser};

use crate::commands::streak_table;
use crate::data::{read_sources, resolve_config};

/// How turns are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

/// One line of `--format json` output.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Question(&'a Question),
    Result(&'a TurnResult),
    Completed { reason: &'a str, streaks: &'a [u32] },
    Stopped { streaks: &'a [u32] },
}

pub fn execute(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    seed: Option<u64>,
    format: String,
) -> Result<()> {
    let format = match format.as_str() {
        "text" => Format::Text,
        "json" => Format::Json,
        other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
    };

    let config = resolve_config(config_path.as_deref(), data_dir)?;
    let sources = read_sources(&config.data_files())?;

    let chooser = match seed.or(config.seed) {
        Some(seed) => RandomChooser::seeded(seed),
        None => RandomChooser::from_entropy(),
    };
    let mut session = QuizSession::start(&sources, chooser)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    play(&mut session, stdin.lock(), stdout.lock(), format)
}

/// Drive a session until it completes or input runs out.
fn play<C: Chooser>(
    session: &mut QuizSession<C>,
    mut input: impl BufRead,
    mut out: impl Write,
    format: Format,
) -> Result<()> {
    let mut turn = session.advance()?;

    loop {
        let question = match &turn {
            Turn::Question(q) => q,
            Turn::Completed(done) => {
                let streaks = session.mastery().streaks();
                match format {
                    Format::Text => {
                        writeln!(out, "Quiz Completed: {}", done.reason)?;
                        writeln!(out, "{}", streak_table(session))?;
                    }
                    Format::Json => emit(
                        &mut out,
                        &Event::Completed {
                            reason: &done.reason,
                            streaks,
                        },
                    )?,
                }
                return Ok(());
            }
        };

        if format == Format::Text {
            writeln!(out, "\n{}", question.prompt)?;
        } else {
            emit(&mut out, &Event::Question(question))?;
        }

        let Some(answer) = read_answer(&mut input, &mut out, question, format)? else {
            tracing::info!("input closed, stopping quiz");
            match format {
                Format::Text => {
                    writeln!(out, "\nQuiz stopped.")?;
                    writeln!(out, "{}", streak_table(session))?;
                }
                Format::Json => emit(
                    &mut out,
                    &Event::Stopped {
                        streaks: session.mastery().streaks(),
                    },
                )?,
            }
            return Ok(());
        };

        let submission = session.submit(&answer)?;
        match format {
            Format::Text => writeln!(out, "{}", submission.result.summary)?,
            Format::Json => emit(&mut out, &Event::Result(&submission.result))?,
        }
        turn = submission.next;
    }
}

/// Read the three answer lines. Returns `None` on end of input.
fn read_answer(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &Question,
    format: Format,
) -> Result<Option<Answer>> {
    let labels = [
        format!("{}: ", question.answer_label),
        "TCP or UDP: ".to_string(),
        "Ignore this question? [y/N]: ".to_string(),
    ];
    let mut fields = Vec::with_capacity(labels.len());

    for label in &labels {
        if format == Format::Text {
            write!(out, "{label}")?;
            out.flush()?;
        }
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        fields.push(line.trim_end_matches(['\r', '\n']).to_string());
    }

    let ignore = matches!(fields[2].trim().to_lowercase().as_str(), "y" | "yes");
    Ok(Some(Answer {
        primary: fields[0].clone(),
        transport: fields[1].clone(),
        ignore,
    }))
}

fn emit(out: &mut impl Write, event: &Event<'_>) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(event)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portquiz_core::store::RecordSources;
    use portquiz_core::traits::ScriptedChooser;

    fn session(picks: &[usize]) -> QuizSession<ScriptedChooser> {
        let sources = RecordSources::from_texts(
            "80\n22\n",
            "HTTP\nSSH\n",
            "Web\nSecure shell\n",
            "TCP\nTCP\n",
        );
        QuizSession::start(&sources, ScriptedChooser::new(picks.iter().copied())).unwrap()
    }

    fn run(session: &mut QuizSession<ScriptedChooser>, input: &str, format: Format) -> String {
        let mut out = Vec::new();
        play(session, input.as_bytes(), &mut out, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_transcript_until_completion() {
        // Ask 0 then 1, both port->protocol; ignore both.
        let mut s = session(&[0, 0, 1, 0]);
        let out = run(&mut s, "http\ntcp\ny\nSSH\nudp\nyes\n", Format::Text);
        assert!(out.contains("What protocol runs on port 80?"));
        assert!(out.contains("Protocol: TCP or UDP: Ignore this question? [y/N]: "));
        assert!(out.contains("Correct: 80 - Web - HTTP - TCP"));
        assert!(out.contains("Incorrect: 22 - Secure shell - SSH - TCP"));
        assert!(out.contains("Quiz Completed: All questions have been ignored or answered."));
    }

    #[test]
    fn eof_stops_early() {
        let mut s = session(&[0, 0]);
        let out = run(&mut s, "HTTP\n", Format::Text);
        assert!(out.contains("Quiz stopped."));
        assert_eq!(s.streak(0), Some(0));
    }

    #[test]
    fn json_events() {
        let mut s = session(&[1, 1, 0, 0]);
        let out = run(&mut s, "22\nTCP\nn\n", Format::Json);
        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events[0]["event"], "question");
        assert_eq!(events[0]["prompt"], "What is the port number for SSH?");
        assert_eq!(events[1]["event"], "result");
        assert_eq!(events[1]["outcome"], "correct");
        assert_eq!(events[1]["streak"], 1);
        assert_eq!(events[2]["event"], "question");
        assert_eq!(events.last().unwrap()["event"], "stopped");
    }
}
