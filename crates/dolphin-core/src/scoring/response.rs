use crate::diagnostics::{Diagnostic, DiagnosticSink};
use std::path::Path;

const SUBJECT_MARKER: char = '-';
const CONCEPT_MARKER: char = '$';

/// A whitespace-delimited token of a response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseToken {
    /// `-NAME` names the subject; the last one wins.
    Subject(String),
    /// `$` moves the document from the self section into the concept section.
    ConceptMarker,
    /// Any other token, unsanitized.
    Word(String),
}

impl ResponseToken {
    fn parse(raw: &str) -> Self {
        if let Some(subject) = raw.strip_prefix(SUBJECT_MARKER) {
            Self::Subject(subject.to_string())
        } else if raw.starts_with(CONCEPT_MARKER) {
            Self::ConceptMarker
        } else {
            Self::Word(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDocument {
    tokens: Vec<ResponseToken>,
}

impl ResponseDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(ResponseToken::parse).collect(),
        }
    }

    /// Lays out stored answer lists the way the intake export writes them:
    /// subject marker, self words, concept marker, concept words.
    pub fn from_word_lists<S, C>(subject: &str, self_words: S, concept_words: C) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut text = format!("{SUBJECT_MARKER}{subject}\n");
        for word in self_words {
            text.push_str(word.as_ref());
            text.push('\n');
        }
        text.push(CONCEPT_MARKER);
        text.push('\n');
        for word in concept_words {
            text.push_str(word.as_ref());
            text.push('\n');
        }
        Self::parse(&text)
    }

    /// Invalid UTF-8 is replaced with U+FFFD; only an unreadable file fails.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Reads a document, falling back to an empty one when the file cannot be
    /// opened. The failure is reported to `sink`.
    pub fn load_or_empty<P: AsRef<Path>>(path: P, sink: &mut dyn DiagnosticSink) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(document) => document,
            Err(err) => {
                sink.record(Diagnostic::ResponseUnavailable {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
                Self::default()
            }
        }
    }

    /// The subject named by the last `-NAME` token, if any.
    pub fn subject(&self) -> Option<&str> {
        self.tokens.iter().rev().find_map(|token| match token {
            ResponseToken::Subject(subject) => Some(subject.as_str()),
            _ => None,
        })
    }

    pub fn tokens(&self) -> &[ResponseToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
