use super::group::Scheme;
use super::lexicon::Lexicons;
use super::persona::Persona;
use super::response::{ResponseDocument, ResponseToken};
use super::sanitize::sanitize;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    SelfProjection,
    Concept,
}

/// Which sections of a response are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationMode {
    /// Score the self section and the concept section.
    Full,
    /// Ignore the self section; used when prior self results are reused.
    ConceptOnly,
}

/// Walks a response document and accumulates weights against the lexicons.
pub struct Classifier<'a> {
    lexicons: &'a Lexicons,
}

impl<'a> Classifier<'a> {
    pub fn new(lexicons: &'a Lexicons) -> Self {
        Self { lexicons }
    }

    pub fn classify(&self, document: &ResponseDocument, sink: &mut dyn DiagnosticSink) -> Persona {
        self.classify_with(document, ClassificationMode::Full, sink)
    }

    pub fn classify_with(
        &self,
        document: &ResponseDocument,
        mode: ClassificationMode,
        sink: &mut dyn DiagnosticSink,
    ) -> Persona {
        let mut persona = Persona::new();
        let mut phase = Phase::SelfProjection;

        for token in document.tokens() {
            match token {
                ResponseToken::Subject(subject) => persona.set_subject(subject.as_str()),
                ResponseToken::ConceptMarker => phase = Phase::Concept,
                ResponseToken::Word(raw) => {
                    let word = sanitize(raw);
                    if word.is_empty() {
                        continue;
                    }

                    match (phase, mode) {
                        (Phase::SelfProjection, ClassificationMode::Full) => {
                            self.score_self_word(&mut persona, &word, sink)
                        }
                        (Phase::SelfProjection, ClassificationMode::ConceptOnly) => {}
                        (Phase::Concept, _) => self.score_concept_word(&mut persona, &word, sink),
                    }
                }
            }
        }

        debug!(
            subject = persona.subject().unwrap_or_default(),
            self_words = persona.total_words(Scheme::SelfProjection),
            concept_words = persona.total_words(Scheme::Concept),
            adjusted_words = persona.total_words(Scheme::Adjusted),
            "classified response"
        );
        persona
    }

    /// A self word counts once toward its group. Every occurrence is also
    /// split under the self group: the adjusted table's weight when the word
    /// is listed there, otherwise the self weight goes to task.
    fn score_self_word(&self, persona: &mut Persona, word: &str, sink: &mut dyn DiagnosticSink) {
        let Some(entry) = self.lexicons.self_words().get(word) else {
            sink.record(Diagnostic::UnknownWord {
                scheme: Scheme::SelfProjection,
                word: word.to_string(),
            });
            return;
        };

        if !persona.record_distinct(Scheme::SelfProjection, entry.group, word, entry.weight) {
            sink.record(Diagnostic::DuplicateWord {
                scheme: Scheme::SelfProjection,
                word: word.to_string(),
            });
        }

        match self.lexicons.adjusted_words().get(word) {
            Some(adjusted) => {
                persona.accumulate(Scheme::Adjusted, entry.group, word, adjusted.weight)
            }
            None => persona.accumulate(Scheme::Task, entry.group, word, entry.weight),
        }
    }

    fn score_concept_word(&self, persona: &mut Persona, word: &str, sink: &mut dyn DiagnosticSink) {
        let Some(entry) = self.lexicons.concept_words().get(word) else {
            sink.record(Diagnostic::UnknownWord {
                scheme: Scheme::Concept,
                word: word.to_string(),
            });
            return;
        };

        if !persona.record_distinct(Scheme::Concept, entry.group, word, entry.weight) {
            sink.record(Diagnostic::DuplicateWord {
                scheme: Scheme::Concept,
                word: word.to_string(),
            });
        }
    }
}
