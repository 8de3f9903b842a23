use std::path::PathBuf;

use mrl_eval_shared::TableKind;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed header at line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },
    #[error("missing {section} section")]
    MissingSection { section: TableKind },
    #[error("misplaced {section} section at line {line}: {reason}")]
    MisplacedSection {
        section: TableKind,
        line: usize,
        reason: String,
    },
    #[error("malformed {section} table at line {line}{}: {reason}", column_note(.column))]
    MalformedTable {
        section: TableKind,
        line: usize,
        column: Option<String>,
        reason: String,
    },
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

fn column_note(column: &Option<String>) -> String {
    match column {
        Some(name) => format!(", column {name:?}"),
        None => String::new(),
    }
}

impl ParseError {
    /// 1-based document line the failure points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedHeader { line, .. }
            | ParseError::MisplacedSection { line, .. }
            | ParseError::MalformedTable { line, .. } => Some(*line),
            ParseError::MissingSection { .. } | ParseError::Io(_) => None,
        }
    }

    /// Section the failure belongs to; `None` for header and I/O failures.
    pub fn section(&self) -> Option<TableKind> {
        match self {
            ParseError::MissingSection { section }
            | ParseError::MisplacedSection { section, .. }
            | ParseError::MalformedTable { section, .. } => Some(*section),
            ParseError::MalformedHeader { .. } | ParseError::Io(_) => None,
        }
    }
}

/// A parse failure tied to the report file it came from.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", .path.display())]
pub struct ReportError {
    pub path: PathBuf,
    pub source: ParseError,
}
