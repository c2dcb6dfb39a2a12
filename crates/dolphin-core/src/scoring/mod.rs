//! Lexicon loading, response classification and score computation.

mod classifier;
mod group;
mod lexicon;
mod persona;
mod repeat;
mod response;
mod sanitize;
mod score;
mod session;

pub use classifier::{ClassificationMode, Classifier};
pub use group::{GroupMap, Scheme, TraitGroup};
pub use lexicon::{Ceilings, Lexicon, LexiconEntry, LexiconError, LexiconKind, Lexicons};
pub use persona::{GroupTally, Persona};
pub use repeat::{repeat_record, PriorResultError, PriorSelfProjection};
pub use response::{ResponseDocument, ResponseToken};
pub use sanitize::sanitize;
pub use score::{decision_approach, ResultRecord, Score, SchemeScores, ScoreBreakdown, WordTotals};
pub use session::{Assessment, AssessmentKind, AssessmentSession};

pub(crate) use repeat::{SELF_PROJECTION_HEADER, SELF_TOTAL_PREFIX};
