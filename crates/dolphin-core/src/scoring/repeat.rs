//! Repeat mode: re-score only the concept section of a response while reusing
//! the self projection computed by an earlier run.
//!
//! The earlier projection comes either from a stored [`ResultRecord`] or, for
//! subjects scored before records were persisted, from the rendered text
//! report. Report recovery reads fixed character offsets; any change to the
//! report layout in [`crate::report`] breaks it.

use super::group::{GroupMap, Scheme, TraitGroup};
use super::lexicon::Ceilings;
use super::persona::Persona;
use super::score::{ResultRecord, Score, SchemeScores, WordTotals};
use crate::diagnostics::{Diagnostic, DiagnosticSink};

pub(crate) const SELF_TOTAL_PREFIX: &str = "Self Total Words:";
pub(crate) const SELF_PROJECTION_HEADER: &str = "******* Self Projection *******";
const SELF_TOTAL_OFFSET: usize = 18;
const PERCENT_OFFSET: usize = 11;
const DECISION_OFFSET: usize = 19;
const FIELD_WIDTH: usize = 5;
/// A, B, C, D and Average lines, then the Decision Approach line.
const PROJECTION_ROWS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum PriorResultError {
    #[error("prior report has no self projection section")]
    MissingSelfProjection,
    #[error("prior report line '{line}' does not hold a {field}")]
    UnreadableField { field: &'static str, line: String },
    #[error("no stored result for subject '{subject}'")]
    NotStored { subject: String },
}

/// Self-scheme results carried over from an earlier assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorSelfProjection {
    pub scores: GroupMap<Score>,
    pub decision_approach: Score,
    pub self_total_words: usize,
}

impl PriorSelfProjection {
    pub fn from_record(record: &ResultRecord) -> Self {
        Self {
            scores: record.self_projection.groups,
            decision_approach: record.decision_approach,
            self_total_words: record.totals.self_projection,
        }
    }

    /// Recovers the projection from a rendered report. A missing total-words
    /// line is reported to `sink` and treated as zero.
    pub fn from_report(
        text: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, PriorResultError> {
        let mut lines = text.lines();
        let mut self_total_words = None;
        let mut rows = None;

        while let Some(line) = lines.next() {
            if line.get(..SELF_TOTAL_PREFIX.len()) == Some(SELF_TOTAL_PREFIX) {
                self_total_words = Some(parse_total(line)?);
            }
            if line == SELF_PROJECTION_HEADER && rows.is_none() {
                rows = Some(read_projection_rows(&mut lines));
            }
        }

        let rows = rows.ok_or(PriorResultError::MissingSelfProjection)?;
        let self_total_words = self_total_words.unwrap_or_else(|| {
            sink.record(Diagnostic::PriorReportIncomplete {
                missing: SELF_TOTAL_PREFIX,
            });
            0
        });

        let mut scores = GroupMap::from([Score::Undefined; 4]);
        for (group, line) in TraitGroup::ordered().into_iter().zip(rows.iter()) {
            scores[group] = parse_percent(line, PERCENT_OFFSET, "group percentage")?;
        }
        let decision_approach =
            parse_percent(rows[PROJECTION_ROWS], DECISION_OFFSET, "decision approach")?;

        Ok(Self {
            scores,
            decision_approach,
            self_total_words,
        })
    }

    /// Recomputed from the four group scores rather than read back.
    pub fn average(&self) -> Score {
        Score::mean(self.scores.values().copied())
    }
}

/// Combines carried-over self results with a concept-only classification.
pub fn repeat_record(
    prior: &PriorSelfProjection,
    persona: &Persona,
    ceilings: &Ceilings,
) -> ResultRecord {
    ResultRecord {
        subject: persona.subject().unwrap_or_default().to_string(),
        totals: WordTotals {
            self_projection: prior.self_total_words,
            concept: persona.total_words(Scheme::Concept),
            adjusted: persona.total_words(Scheme::Adjusted),
        },
        self_projection: SchemeScores::from_groups(prior.scores),
        decision_approach: prior.decision_approach,
        concept: SchemeScores::compute(&persona.weights(Scheme::Concept), &ceilings.concept),
    }
}

/// The header is followed by a blank line, then value lines separated by
/// single blank lines.
fn read_projection_rows<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut rows = Vec::with_capacity(PROJECTION_ROWS + 1);
    lines.next();
    let mut line = lines.next().unwrap_or_default();
    for _ in 0..PROJECTION_ROWS {
        rows.push(line);
        lines.next();
        line = lines.next().unwrap_or_default();
    }
    rows.push(line);
    rows
}

fn parse_total(line: &str) -> Result<usize, PriorResultError> {
    let unreadable = || PriorResultError::UnreadableField {
        field: "word total",
        line: line.to_string(),
    };
    let digits: String = line
        .get(SELF_TOTAL_OFFSET..)
        .ok_or_else(unreadable)?
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().map_err(|_| unreadable())
}

fn parse_percent(
    line: &str,
    offset: usize,
    field: &'static str,
) -> Result<Score, PriorResultError> {
    let unreadable = || PriorResultError::UnreadableField {
        field,
        line: line.to_string(),
    };
    let end = (offset + FIELD_WIDTH).min(line.len());
    let window = line.get(offset..end).ok_or_else(unreadable)?.trim_start();

    if "undefined".starts_with(window) && !window.is_empty() {
        return Ok(Score::Undefined);
    }

    let numeric: String = window
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    numeric
        .parse::<f64>()
        .map(|percent| Score::Defined(percent / 100.0))
        .map_err(|_| unreadable())
}
