//! Parsing of Manager text-API responses.
//!
//! # Design
//! The first line of every response is a status message starting with `OK`
//! or `FAIL`. On success, tabular commands follow it with one
//! colon-separated record per line. A `FAIL` response is data, not an error:
//! it is reported through `is_failure()` and never decoded further.
//!
//! Decoding is lenient. A record with fewer columns than the schema leaves
//! the trailing fields absent, extra columns are ignored, and nothing here
//! returns an error.

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::CommandKind;

const FAIL_PREFIX: &str = "FAIL";
const OK_PREFIX: &str = "OK";

/// One decoded data line: schema field name to column value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tuple {
    fields: IndexMap<&'static str, Option<String>>,
}

impl Tuple {
    fn decode(fields: &[&'static str], line: &str) -> Self {
        let mut columns: Vec<&str> = line.split(':').collect();
        // A trailing empty column is a missing value, not an empty string.
        while columns.last().is_some_and(|c| c.is_empty()) {
            columns.pop();
        }
        let fields = fields
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, columns.get(i).map(|c| c.to_string())))
            .collect();
        Self { fields }
    }

    /// Value of `field`, or `None` when the column was missing or the field
    /// is not part of this tuple's schema.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }

    /// Field names and values in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A Manager response classified by the command that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerResponse {
    command: String,
    kind: Option<CommandKind>,
    summary: String,
    lines: Vec<String>,
    failed: bool,
    tuples: Vec<Tuple>,
}

impl ManagerResponse {
    /// Parse `text` as the body returned for `command`.
    pub fn parse(command: &str, text: &str) -> Self {
        // Only lines empty before trimming are trailing padding; a
        // whitespace-only last line is still a blank record.
        let mut raw: Vec<&str> = text.split('\n').collect();
        while raw.last().is_some_and(|l| l.is_empty()) {
            raw.pop();
        }
        let lines: Vec<String> = raw.iter().map(|l| l.trim().to_string()).collect();

        let failed = lines
            .first()
            .is_some_and(|message| message.starts_with(FAIL_PREFIX));
        let kind = CommandKind::from_name(command);

        let tuples = match kind {
            Some(kind) if !failed => lines
                .iter()
                .skip(1)
                .map(|line| Tuple::decode(kind.fields(), line))
                .collect(),
            _ => Vec::new(),
        };

        tracing::debug!(
            command,
            failed,
            lines = lines.len(),
            tuples = tuples.len(),
            "parsed manager response"
        );

        Self {
            command: command.to_string(),
            kind,
            summary: text.to_string(),
            lines,
            failed,
            tuples,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Schema the body was decoded with, if the command is tabular.
    pub fn kind(&self) -> Option<CommandKind> {
        self.kind
    }

    /// The raw response text, untouched.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Trimmed response lines, status line first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The status line, e.g. `OK - Listed applications for virtual host localhost`.
    pub fn message(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    pub fn is_failure(&self) -> bool {
        self.failed
    }

    pub fn is_ok(&self) -> bool {
        self.message().is_some_and(|m| m.starts_with(OK_PREFIX))
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    /// Tuples whose `field` equals `value`, in response order.
    pub fn find_by(&self, field: &str, value: &str) -> Vec<&Tuple> {
        self.tuples
            .iter()
            .filter(|tuple| tuple.get(field) == Some(value))
            .collect()
    }
}
