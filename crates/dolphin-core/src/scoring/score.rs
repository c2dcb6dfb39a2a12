use super::group::{GroupMap, Scheme, TraitGroup};
use super::lexicon::Ceilings;
use super::persona::Persona;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized score. Groups whose ceiling is zero have no defined
/// percentage; that is carried explicitly instead of as NaN or zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Score {
    Defined(f64),
    Undefined,
}

impl Score {
    pub fn ratio(accumulated: i64, ceiling: i64) -> Self {
        if ceiling == 0 {
            Self::Undefined
        } else {
            Self::Defined(accumulated as f64 / ceiling as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Arithmetic mean; undefined if any member is.
    pub fn mean<I: IntoIterator<Item = Score>>(scores: I) -> Self {
        let mut sum = 0.0;
        let mut count = 0usize;
        for score in scores {
            match score {
                Self::Defined(value) => sum += value,
                Self::Undefined => return Self::Undefined,
            }
            count += 1;
        }
        if count == 0 {
            Self::Undefined
        } else {
            Self::Defined(sum / count as f64)
        }
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::Defined)
    }
}

impl From<Score> for Option<f64> {
    fn from(score: Score) -> Self {
        score.value()
    }
}

impl fmt::Display for Score {
    /// Percentage with two decimals, or `undefined`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(value) => write!(f, "{:.2}%", value * 100.0),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// Per-group percentages of one scheme and their mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeScores {
    pub groups: GroupMap<Score>,
    pub average: Score,
}

impl SchemeScores {
    pub fn compute(accumulated: &GroupMap<i64>, ceilings: &GroupMap<i64>) -> Self {
        Self::from_groups(accumulated.map(|group, sum| Score::ratio(*sum, ceilings[group])))
    }

    pub fn from_groups(groups: GroupMap<Score>) -> Self {
        let average = Score::mean(groups.values().copied());
        Self { groups, average }
    }
}

/// Asymmetric deviation of the self average driven by how task-weighted
/// (`task_avg`) and adjusted-weighted (`adjusted_avg`) self percentages differ.
/// Task-heavy responses pull toward the low end by `(avg - 1)`, adjusted-heavy
/// ones by `avg`.
pub fn decision_approach(self_avg: Score, adjusted_avg: Score, task_avg: Score) -> Score {
    let (Score::Defined(avg), Score::Defined(d_a), Score::Defined(d_t)) =
        (self_avg, adjusted_avg, task_avg)
    else {
        return Score::Undefined;
    };

    let dist = d_t - d_a;
    let decision = if dist < 0.0 {
        avg - dist.abs() * avg
    } else if dist > 0.0 {
        avg + dist.abs() * (avg - 1.0)
    } else {
        0.0
    };
    Score::Defined(decision)
}

/// Distinct-word totals reported alongside the scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordTotals {
    pub self_projection: usize,
    pub concept: usize,
    pub adjusted: usize,
}

impl WordTotals {
    pub fn of(persona: &Persona) -> Self {
        Self {
            self_projection: persona.total_words(Scheme::SelfProjection),
            concept: persona.total_words(Scheme::Concept),
            adjusted: persona.total_words(Scheme::Adjusted),
        }
    }
}

/// Every scheme's percentages for one persona, including the intermediate
/// adjusted and task schemes that only feed the decision approach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub self_projection: SchemeScores,
    pub concept: SchemeScores,
    pub adjusted: SchemeScores,
    pub task: SchemeScores,
    pub decision_approach: Score,
}

impl ScoreBreakdown {
    pub fn compute(persona: &Persona, ceilings: &Ceilings) -> Self {
        let scores_for = |scheme: Scheme| {
            SchemeScores::compute(&persona.weights(scheme), ceilings.for_scheme(scheme))
        };
        let self_projection = scores_for(Scheme::SelfProjection);
        let concept = scores_for(Scheme::Concept);
        let adjusted = scores_for(Scheme::Adjusted);
        let task = scores_for(Scheme::Task);
        let decision_approach =
            decision_approach(self_projection.average, adjusted.average, task.average);

        Self {
            self_projection,
            concept,
            adjusted,
            task,
            decision_approach,
        }
    }

    pub fn into_record(self, subject: impl Into<String>, totals: WordTotals) -> ResultRecord {
        ResultRecord {
            subject: subject.into(),
            totals,
            self_projection: self.self_projection,
            decision_approach: self.decision_approach,
            concept: self.concept,
        }
    }
}

/// The finished result handed to persistence. Serializes to the flat field
/// set the results table uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResultRow", into = "ResultRow")]
pub struct ResultRecord {
    pub subject: String,
    pub totals: WordTotals,
    pub self_projection: SchemeScores,
    pub decision_approach: Score,
    pub concept: SchemeScores,
}

impl ResultRecord {
    pub fn compute(persona: &Persona, ceilings: &Ceilings) -> Self {
        ScoreBreakdown::compute(persona, ceilings).into_record(
            persona.subject().unwrap_or_default(),
            WordTotals::of(persona),
        )
    }

    /// Takes over the concept scores and concept word total of `other`,
    /// leaving the self projection untouched.
    pub fn replace_concept(&mut self, other: &ResultRecord) {
        self.concept = other.concept;
        self.totals.concept = other.totals.concept;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultRow {
    email: String,
    self_total_words: usize,
    conc_total_words: usize,
    adj_total_words: usize,
    self_a: Score,
    self_b: Score,
    self_c: Score,
    self_d: Score,
    self_avg: Score,
    dec_approach: Score,
    conc_a: Score,
    conc_b: Score,
    conc_c: Score,
    conc_d: Score,
    conc_avg: Score,
}

impl From<ResultRecord> for ResultRow {
    fn from(record: ResultRecord) -> Self {
        let own = record.self_projection.groups;
        let concept = record.concept.groups;
        Self {
            email: record.subject,
            self_total_words: record.totals.self_projection,
            conc_total_words: record.totals.concept,
            adj_total_words: record.totals.adjusted,
            self_a: own[TraitGroup::A],
            self_b: own[TraitGroup::B],
            self_c: own[TraitGroup::C],
            self_d: own[TraitGroup::D],
            self_avg: record.self_projection.average,
            dec_approach: record.decision_approach,
            conc_a: concept[TraitGroup::A],
            conc_b: concept[TraitGroup::B],
            conc_c: concept[TraitGroup::C],
            conc_d: concept[TraitGroup::D],
            conc_avg: record.concept.average,
        }
    }
}

impl From<ResultRow> for ResultRecord {
    fn from(row: ResultRow) -> Self {
        Self {
            subject: row.email,
            totals: WordTotals {
                self_projection: row.self_total_words,
                concept: row.conc_total_words,
                adjusted: row.adj_total_words,
            },
            self_projection: SchemeScores {
                groups: GroupMap::from([row.self_a, row.self_b, row.self_c, row.self_d]),
                average: row.self_avg,
            },
            decision_approach: row.dec_approach,
            concept: SchemeScores {
                groups: GroupMap::from([row.conc_a, row.conc_b, row.conc_c, row.conc_d]),
                average: row.conc_avg,
            },
        }
    }
}
