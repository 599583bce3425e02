//! Ordered outcome reporting
//!
//! Successes are written as soon as they arrive. Errors and notices are held
//! back and written as two blocks, errors first, once the manifest is done.

use std::io::{self, Write};

use crate::types::{ImportSummary, Outcome};

const RED: &str = "\x1b[31m";
const DIM_YELLOW: &str = "\x1b[33;2m";
const RESET: &str = "\x1b[0m";

pub struct Reporter<W: Write> {
    out: W,
    color: bool,
    errors: Vec<Outcome>,
    notices: Vec<Outcome>,
    summary: ImportSummary,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            errors: Vec::new(),
            notices: Vec::new(),
            summary: ImportSummary::default(),
        }
    }

    pub fn record(&mut self, outcome: Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Success { .. } => {
                self.summary.succeeded += 1;
                let line = self.render(&outcome);
                writeln!(self.out, "{line}")?;
                self.out.flush()?;
            }
            Outcome::Error { .. } => {
                self.summary.failed += 1;
                self.errors.push(outcome);
            }
            Outcome::Notice { .. } => {
                self.summary.skipped += 1;
                self.notices.push(outcome);
            }
        }
        Ok(())
    }

    /// Write the held-back errors, then notices, and hand back the writer.
    pub fn finish(mut self) -> io::Result<(W, ImportSummary)> {
        let held: Vec<Outcome> = self.errors.drain(..).chain(self.notices.drain(..)).collect();
        for outcome in &held {
            let line = self.render(outcome);
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok((self.out, self.summary))
    }

    fn tag(&self, tag: &str, color: &str) -> String {
        if self.color {
            format!("{color}{tag}{RESET}")
        } else {
            tag.to_string()
        }
    }

    fn render(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Success {
                row,
                title,
                publication_id,
            } => format!("{row} SUCCESS GALLEY ADDED FOR {title}#publicationId#{publication_id}"),
            Outcome::Error { row, title, error } => {
                let tag = self.tag("ERROR", RED);
                match title {
                    Some(title) if error.title().is_none() => {
                        format!("{row} {tag} {error} (\"{title}\")")
                    }
                    _ => format!("{row} {tag} {error}"),
                }
            }
            Outcome::Notice {
                row,
                title,
                publication_id,
            } => {
                let tag = self.tag("NOTICE", DIM_YELLOW);
                format!("{row} {tag} GALLEY ALREADY EXISTS FOR {title}#publicationId#{publication_id}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowError;

    fn success(row: usize) -> Outcome {
        Outcome::Success { row, title: format!("T{row}"), publication_id: 100 + row as i64 }
    }

    fn notice(row: usize) -> Outcome {
        Outcome::Notice { row, title: format!("T{row}"), publication_id: 100 + row as i64 }
    }

    fn no_match(row: usize) -> Outcome {
        Outcome::Error {
            row,
            title: Some(format!("T{row}")),
            error: RowError::NoMatch { title: format!("T{row}") },
        }
    }

    fn output(reporter: Reporter<Vec<u8>>) -> (Vec<String>, ImportSummary) {
        let (out, summary) = reporter.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        (text.lines().map(str::to_string).collect(), summary)
    }

    #[test]
    fn test_successes_first_then_errors_then_notices() {
        let mut reporter = Reporter::new(Vec::new(), false);
        reporter.record(notice(1)).unwrap();
        reporter.record(no_match(2)).unwrap();
        reporter.record(success(3)).unwrap();
        reporter.record(notice(4)).unwrap();
        reporter.record(no_match(5)).unwrap();
        reporter.record(success(6)).unwrap();

        let (lines, summary) = output(reporter);
        assert_eq!(
            lines,
            vec![
                "3 SUCCESS GALLEY ADDED FOR T3#publicationId#103",
                "6 SUCCESS GALLEY ADDED FOR T6#publicationId#106",
                "2 ERROR NO MATCHES FOR T2",
                "5 ERROR NO MATCHES FOR T5",
                "1 NOTICE GALLEY ALREADY EXISTS FOR T1#publicationId#101",
                "4 NOTICE GALLEY ALREADY EXISTS FOR T4#publicationId#104",
            ]
        );
        assert_eq!(summary, ImportSummary { succeeded: 2, failed: 2, skipped: 2 });
    }

    #[test]
    fn test_success_written_immediately() {
        let mut reporter = Reporter::new(Vec::new(), false);
        reporter.record(no_match(1)).unwrap();
        reporter.record(success(2)).unwrap();
        assert_eq!(
            String::from_utf8(reporter.out.clone()).unwrap(),
            "2 SUCCESS GALLEY ADDED FOR T2#publicationId#102\n"
        );
    }

    #[test]
    fn test_validation_error_names_title() {
        let mut reporter = Reporter::new(Vec::new(), false);
        reporter
            .record(Outcome::Error {
                row: 7,
                title: Some("Foo".to_string()),
                error: RowError::UnsupportedLocale { code: "xx".to_string() },
            })
            .unwrap();
        reporter
            .record(Outcome::Error {
                row: 8,
                title: None,
                error: RowError::MalformedRow { expected: 5, found: 2 },
            })
            .unwrap();

        let (lines, _) = output(reporter);
        assert_eq!(lines[0], "7 ERROR locale not supported in context xx (\"Foo\")");
        assert_eq!(lines[1], "8 ERROR data or delimiter # missing (expected 5 fields, got 2)");
    }

    #[test]
    fn test_colored_tags() {
        let mut reporter = Reporter::new(Vec::new(), true);
        reporter.record(no_match(1)).unwrap();
        reporter.record(notice(2)).unwrap();
        let (lines, _) = output(reporter);
        assert_eq!(lines[0], "1 \x1b[31mERROR\x1b[0m NO MATCHES FOR T1");
        assert!(lines[1].starts_with("2 \x1b[33;2mNOTICE\x1b[0m "));
    }

    #[test]
    fn test_empty_run() {
        let (lines, summary) = output(Reporter::new(Vec::new(), false));
        assert!(lines.is_empty());
        assert_eq!(summary.total(), 0);
    }
}
