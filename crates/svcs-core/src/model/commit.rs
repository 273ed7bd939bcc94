//! Commit records and the newest-first commit log.
//!
//! Persisted shape of one record:
//!
//! ```text
//! commit <fingerprint>
//! Author: <author>
//! <message>
//!
//! ```
//!
//! Records are concatenated newest first; every record ends with a blank line.
//! A message may itself contain blank lines. A new record starts only where a
//! blank line is followed by a `commit` line and an `Author:` line, and
//! [`escape_message`] keeps messages from producing that sequence.

use crate::errors::SvcsError;
use crate::fingerprint::Fingerprint;

const COMMIT_PREFIX: &str = "commit ";
const AUTHOR_PREFIX: &str = "Author: ";

/// One entry of the commit log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub fingerprint: Fingerprint,
    pub author: String,
    pub message: String,
}

impl CommitRecord {
    pub fn new(
        fingerprint: Fingerprint,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            fingerprint,
            author: author.into(),
            message: message.into(),
        }
    }

    /// Render the record block including its trailing blank line
    pub fn render(&self) -> String {
        format!(
            "{}{}\n{}{}\n{}\n\n",
            COMMIT_PREFIX, self.fingerprint, AUTHOR_PREFIX, self.author, self.message
        )
    }
}

impl std::fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}\n{}{}\n{}",
            COMMIT_PREFIX, self.fingerprint, AUTHOR_PREFIX, self.author, self.message
        )
    }
}

/// Commit log, most recent record first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitLog {
    records: Vec<CommitRecord>,
}

impl CommitLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Parse persisted log text
    ///
    /// # Errors
    ///
    /// Returns `SvcsError::MalformedLog` when a block does not start with a
    /// `commit` line followed by an `Author:` line.
    pub fn parse(text: &str) -> Result<Self, SvcsError> {
        // Drop the terminator of the last record
        let body = text
            .strip_suffix("\n\n")
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text);
        let lines: Vec<&str> = body.split('\n').collect();

        let mut records = Vec::new();
        let mut i = lines
            .iter()
            .position(|l| !l.is_empty())
            .unwrap_or(lines.len());

        while i < lines.len() {
            let fingerprint = lines[i]
                .trim_end_matches('\r')
                .strip_prefix(COMMIT_PREFIX)
                .ok_or_else(|| SvcsError::MalformedLog {
                    line: i + 1,
                    reason: format!("expected '{}<fingerprint>'", COMMIT_PREFIX),
                })?;

            let author = match lines.get(i + 1) {
                Some(l) => l
                    .trim_end_matches('\r')
                    .strip_prefix(AUTHOR_PREFIX)
                    .ok_or_else(|| SvcsError::MalformedLog {
                        line: i + 2,
                        reason: format!("expected '{}<name>'", AUTHOR_PREFIX),
                    })?,
                None => {
                    return Err(SvcsError::MalformedLog {
                        line: i + 2,
                        reason: "record ends before author line".to_string(),
                    })
                }
            };

            let message_start = i + 2;
            let message_end = (message_start..lines.len())
                .find(|&j| lines[j].is_empty() && starts_record(&lines, j + 1))
                .unwrap_or(lines.len());

            records.push(CommitRecord::new(
                Fingerprint::from_string(fingerprint.to_string()),
                author,
                lines[message_start..message_end].join("\n"),
            ));
            i = message_end + 1;
        }

        Ok(Self { records })
    }

    /// Render the full persisted log text
    pub fn render(&self) -> String {
        self.records.iter().map(CommitRecord::render).collect()
    }

    /// Put `record` ahead of every existing record
    pub fn prepend(&mut self, record: CommitRecord) {
        self.records.insert(0, record);
    }

    /// Exact fingerprint equality against any record
    pub fn contains_fingerprint(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.fingerprint.as_str() == id)
    }

    pub fn latest(&self) -> Option<&CommitRecord> {
        self.records.first()
    }

    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn starts_record(lines: &[&str], at: usize) -> bool {
    matches!(
        (lines.get(at), lines.get(at + 1)),
        (Some(head), Some(author))
            if head.starts_with(COMMIT_PREFIX) && author.starts_with(AUTHOR_PREFIX)
    )
}

/// Make `message` safe to store in a record
///
/// A `commit ` line directly after a blank line would read back as the start
/// of another record; such lines get a leading space. Every other message,
/// blank lines included, is kept as is.
pub fn escape_message(message: &str) -> String {
    let mut escaped = Vec::new();
    let mut after_blank = false;
    for line in message.split('\n') {
        if after_blank && line.starts_with(COMMIT_PREFIX) {
            escaped.push(format!(" {}", line));
        } else {
            escaped.push(line.to_string());
        }
        after_blank = line.is_empty();
    }
    escaped.join("\n")
}
