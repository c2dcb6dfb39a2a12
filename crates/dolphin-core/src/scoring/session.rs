use super::classifier::{ClassificationMode, Classifier};
use super::lexicon::{LexiconError, Lexicons};
use super::persona::Persona;
use super::repeat::{repeat_record, PriorSelfProjection};
use super::response::ResponseDocument;
use super::score::ResultRecord;
use crate::config::LexiconPaths;
use crate::diagnostics::DiagnosticSink;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    Initial,
    Repeat,
}

/// A scored response: the accumulator (kept for report rendering) and the
/// finished result record.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub kind: AssessmentKind,
    pub persona: Persona,
    pub record: ResultRecord,
}

/// Loaded lexicons reused across sequential scoring runs.
pub struct AssessmentSession {
    lexicons: Lexicons,
}

impl AssessmentSession {
    pub fn new(lexicons: Lexicons) -> Self {
        Self { lexicons }
    }

    /// Loads all three tables. Configuration errors abort before anything is scored.
    pub fn load(paths: &LexiconPaths, sink: &mut dyn DiagnosticSink) -> Result<Self, LexiconError> {
        Lexicons::load(paths, sink).map(Self::new)
    }

    pub fn lexicons(&self) -> &Lexicons {
        &self.lexicons
    }

    pub fn score(&self, document: &ResponseDocument, sink: &mut dyn DiagnosticSink) -> Assessment {
        let persona = Classifier::new(&self.lexicons).classify(document, sink);
        let record = ResultRecord::compute(&persona, self.lexicons.ceilings());
        info!(
            subject = %record.subject,
            self_words = record.totals.self_projection,
            concept_words = record.totals.concept,
            "scored assessment"
        );

        Assessment {
            kind: AssessmentKind::Initial,
            persona,
            record,
        }
    }

    pub fn repeat(
        &self,
        document: &ResponseDocument,
        prior: &PriorSelfProjection,
        sink: &mut dyn DiagnosticSink,
    ) -> Assessment {
        let persona = Classifier::new(&self.lexicons).classify_with(
            document,
            ClassificationMode::ConceptOnly,
            sink,
        );
        let record = repeat_record(prior, &persona, self.lexicons.ceilings());
        info!(
            subject = %record.subject,
            concept_words = record.totals.concept,
            "scored repeat assessment"
        );

        Assessment {
            kind: AssessmentKind::Repeat,
            persona,
            record,
        }
    }
}
