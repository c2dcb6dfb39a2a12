//! Recoverable conditions noticed while loading lexicons or classifying a
//! response. Components receive a [`DiagnosticSink`] explicitly instead of
//! writing to a process-wide log, so callers decide where notices end up.

use crate::scoring::{LexiconKind, Scheme};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A lexicon table could not be opened; the lexicon is left empty.
    LexiconUnavailable {
        kind: LexiconKind,
        path: PathBuf,
        reason: String,
    },
    /// The response document could not be read; scoring continues with no words.
    ResponseUnavailable { path: PathBuf, reason: String },
    /// A response word was already counted for its scheme and group.
    DuplicateWord { scheme: Scheme, word: String },
    /// A response word has no entry in the lexicon for the active phase.
    UnknownWord { scheme: Scheme, word: String },
    /// A prior report lacked a line that repeat mode reads.
    PriorReportIncomplete { missing: &'static str },
}

impl Diagnostic {
    /// Resource problems degrade whole groups; word notices only affect one token.
    pub fn is_resource_problem(&self) -> bool {
        matches!(
            self,
            Diagnostic::LexiconUnavailable { .. } | Diagnostic::ResponseUnavailable { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LexiconUnavailable { kind, path, reason } => write!(
                f,
                "failed to open {} lexicon at {}: {}",
                kind,
                path.display(),
                reason
            ),
            Diagnostic::ResponseUnavailable { path, reason } => write!(
                f,
                "failed to open response document at {}: {}",
                path.display(),
                reason
            ),
            Diagnostic::DuplicateWord { scheme, word } => write!(
                f,
                "word ({word}) appears in the {scheme} section of the response more than once"
            ),
            Diagnostic::UnknownWord { scheme, word } => {
                write!(f, "word ({word}) is not in the {scheme} lexicon")
            }
            Diagnostic::PriorReportIncomplete { missing } => {
                write!(f, "prior report is missing the {missing} line")
            }
        }
    }
}

/// Destination for diagnostics raised during a scoring run.
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::LexiconUnavailable { kind, path, .. } => {
                error!(lexicon = %kind, path = %path.display(), "{diagnostic}");
            }
            Diagnostic::ResponseUnavailable { path, .. } => {
                error!(path = %path.display(), "{diagnostic}");
            }
            Diagnostic::DuplicateWord { scheme, word }
            | Diagnostic::UnknownWord { scheme, word } => {
                warn!(%scheme, %word, "{diagnostic}");
            }
            Diagnostic::PriorReportIncomplete { .. } => warn!("{diagnostic}"),
        }
    }
}
