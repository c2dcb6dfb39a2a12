use super::group::{GroupMap, Scheme, TraitGroup};
use super::sanitize::sanitize;
use crate::config::LexiconPaths;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Identifies which of the three weighted tables a lexicon was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexiconKind {
    SelfWords,
    ConceptWords,
    AdjustedWords,
}

impl LexiconKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::SelfWords, Self::ConceptWords, Self::AdjustedWords]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfWords => "self",
            Self::ConceptWords => "concept",
            Self::AdjustedWords => "adjusted",
        }
    }

    pub const fn scheme(self) -> Scheme {
        match self {
            Self::SelfWords => Scheme::SelfProjection,
            Self::ConceptWords => Scheme::Concept,
            Self::AdjustedWords => Scheme::Adjusted,
        }
    }
}

impl fmt::Display for LexiconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration problems in a lexicon table. Any of these makes the table
/// untrustworthy, so no response may be scored against it.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("duplicate word ({word}) found on line {line} of the {kind} lexicon")]
    DuplicateWord {
        kind: LexiconKind,
        word: String,
        line: u64,
    },
    #[error("malformed entry on line {line} of the {kind} lexicon: {reason}")]
    MalformedLine {
        kind: LexiconKind,
        line: u64,
        reason: String,
    },
    #[error("failed to read the {kind} lexicon: {source}")]
    Read {
        kind: LexiconKind,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub word: String,
    pub group: TraitGroup,
    pub weight: u32,
}

/// Sanitized word lookup for one table, plus the per-group ceiling sums.
#[derive(Debug, Clone)]
pub struct Lexicon {
    kind: LexiconKind,
    entries: HashMap<String, LexiconEntry>,
    ceiling: GroupMap<i64>,
}

impl Lexicon {
    pub fn empty(kind: LexiconKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
            ceiling: GroupMap::default(),
        }
    }

    /// Opens and parses a table. A missing or unreadable file is reported to
    /// `sink` and yields an empty lexicon; duplicates and malformed lines fail.
    pub fn load<P: AsRef<Path>>(
        kind: LexiconKind,
        path: P,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                sink.record(Diagnostic::LexiconUnavailable {
                    kind,
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
                return Ok(Self::empty(kind));
            }
        };

        let lexicon = Self::from_reader(kind, file)?;
        info!(
            lexicon = %kind,
            path = %path.display(),
            entries = lexicon.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    pub fn from_reader<R: Read>(kind: LexiconKind, reader: R) -> Result<Self, LexiconError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'/'))
            .from_reader(reader);
        let mut lexicon = Self::empty(kind);

        for record in csv_reader.records() {
            let record = record.map_err(|source| LexiconError::Read { kind, source })?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let entry = parse_entry(&record).map_err(|reason| LexiconError::MalformedLine {
                kind,
                line,
                reason,
            })?;
            lexicon.insert(entry, line)?;
        }

        Ok(lexicon)
    }

    /// Adds an entry and its weight to the group ceiling. Inserting a word that
    /// is already present is a configuration error.
    pub fn insert(&mut self, entry: LexiconEntry, line: u64) -> Result<(), LexiconError> {
        if self.entries.contains_key(&entry.word) {
            return Err(LexiconError::DuplicateWord {
                kind: self.kind,
                word: entry.word,
                line,
            });
        }

        debug!(
            lexicon = %self.kind,
            word = %entry.word,
            group = %entry.group,
            weight = entry.weight,
            "lexicon entry"
        );
        self.ceiling[entry.group] += i64::from(entry.weight);
        self.entries.insert(entry.word.clone(), entry);
        Ok(())
    }

    pub fn kind(&self) -> LexiconKind {
        self.kind
    }

    pub fn get(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ceiling(&self) -> &GroupMap<i64> {
        &self.ceiling
    }
}

/// `word,G weight`: the group letter sits right after the comma and the
/// weight follows the first space of that field.
fn parse_entry(record: &csv::StringRecord) -> Result<LexiconEntry, String> {
    let raw_word = record.get(0).unwrap_or_default();
    let Some(rest) = record.get(1) else {
        return Err(format!("expected 'word,GROUP weight', found '{raw_word}'"));
    };

    let word = sanitize(raw_word);
    if word.is_empty() {
        return Err(format!("word '{raw_word}' is empty once punctuation is removed"));
    }

    let group_char = rest.chars().next().unwrap_or(' ');
    let group = TraitGroup::from_char(group_char)
        .ok_or_else(|| format!("group '{group_char}' for '{word}' is not one of A, B, C, D"))?;

    let raw_weight = rest
        .split_once(' ')
        .and_then(|(_, weight)| weight.split_whitespace().next())
        .ok_or_else(|| format!("missing weight for '{word}'"))?;
    let weight = parse_weight(raw_weight)
        .ok_or_else(|| format!("weight '{raw_weight}' for '{word}' is not a non-negative number"))?;

    Ok(LexiconEntry {
        word,
        group,
        weight,
    })
}

/// Reads the leading number of the weight token, so `5`, `2.9` and `5pts`
/// are all accepted. The fractional part is dropped.
fn parse_weight(raw: &str) -> Option<u32> {
    let number_len = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    let value = raw[..number_len].parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value.trunc() as u32)
}

/// Maximum attainable weighted sums per scheme and group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ceilings {
    pub self_projection: GroupMap<i64>,
    pub concept: GroupMap<i64>,
    pub adjusted: GroupMap<i64>,
    pub task: GroupMap<i64>,
}

impl Ceilings {
    /// The task ceiling is whatever part of the self ceiling the adjusted
    /// table does not cover.
    pub fn new(
        self_projection: GroupMap<i64>,
        concept: GroupMap<i64>,
        adjusted: GroupMap<i64>,
    ) -> Self {
        let task = self_projection.map(|group, ceiling| ceiling - adjusted[group]);
        Self {
            self_projection,
            concept,
            adjusted,
            task,
        }
    }

    pub fn for_scheme(&self, scheme: Scheme) -> &GroupMap<i64> {
        match scheme {
            Scheme::SelfProjection => &self.self_projection,
            Scheme::Concept => &self.concept,
            Scheme::Adjusted => &self.adjusted,
            Scheme::Task => &self.task,
        }
    }
}

/// The three lexicons of one run and the ceilings derived from them.
/// Read-only once built, so it can be reused across sequential scoring runs.
#[derive(Debug, Clone)]
pub struct Lexicons {
    self_words: Lexicon,
    concept_words: Lexicon,
    adjusted_words: Lexicon,
    ceilings: Ceilings,
}

impl Lexicons {
    pub fn new(self_words: Lexicon, concept_words: Lexicon, adjusted_words: Lexicon) -> Self {
        let ceilings = Ceilings::new(
            *self_words.ceiling(),
            *concept_words.ceiling(),
            *adjusted_words.ceiling(),
        );
        Self {
            self_words,
            concept_words,
            adjusted_words,
            ceilings,
        }
    }

    pub fn load(paths: &LexiconPaths, sink: &mut dyn DiagnosticSink) -> Result<Self, LexiconError> {
        let self_words = Lexicon::load(LexiconKind::SelfWords, &paths.self_words, sink)?;
        let concept_words = Lexicon::load(LexiconKind::ConceptWords, &paths.concept_words, sink)?;
        let adjusted_words =
            Lexicon::load(LexiconKind::AdjustedWords, &paths.adjusted_words, sink)?;
        Ok(Self::new(self_words, concept_words, adjusted_words))
    }

    pub fn get(&self, kind: LexiconKind) -> &Lexicon {
        match kind {
            LexiconKind::SelfWords => &self.self_words,
            LexiconKind::ConceptWords => &self.concept_words,
            LexiconKind::AdjustedWords => &self.adjusted_words,
        }
    }

    pub fn self_words(&self) -> &Lexicon {
        &self.self_words
    }

    pub fn concept_words(&self) -> &Lexicon {
        &self.concept_words
    }

    pub fn adjusted_words(&self) -> &Lexicon {
        &self.adjusted_words
    }

    pub fn ceilings(&self) -> &Ceilings {
        &self.ceilings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kind: LexiconKind, table: &str) -> Result<Lexicon, LexiconError> {
        Lexicon::from_reader(kind, table.as_bytes())
    }

    #[test]
    fn ceilings_sum_weights_per_group() {
        let table = "/ comment line,A 100\nhappy,A 5\nCalm,B 3\nsteady,B 4\nbold,D 2\n";
        let lexicon = parse(LexiconKind::SelfWords, table).expect("table parses");

        assert_eq!(lexicon.len(), 4);
        assert_eq!(lexicon.ceiling()[TraitGroup::A], 5);
        assert_eq!(lexicon.ceiling()[TraitGroup::B], 7);
        assert_eq!(lexicon.ceiling()[TraitGroup::C], 0);
        assert_eq!(lexicon.ceiling()[TraitGroup::D], 2);
        assert_eq!(
            lexicon.get("calm"),
            Some(&LexiconEntry {
                word: "calm".to_string(),
                group: TraitGroup::B,
                weight: 3
            })
        );
    }

    #[test]
    fn keys_are_sanitized_and_decimal_weights_truncate() {
        let lexicon =
            parse(LexiconKind::ConceptWords, "Self-Aware!,C 2.9\n").expect("table parses");
        let entry = lexicon.get("selfaware").expect("sanitized key present");
        assert_eq!(entry.weight, 2);
        assert_eq!(lexicon.ceiling()[TraitGroup::C], 2);
    }

    #[test]
    fn weight_is_the_leading_number_of_the_first_token() {
        let table = "happy,A 5 extra notes\ncalm,B 3pts\nbold,D  4\n";
        let lexicon = parse(LexiconKind::SelfWords, table).expect("table parses");

        assert_eq!(lexicon.get("happy").map(|entry| entry.weight), Some(5));
        assert_eq!(lexicon.get("calm").map(|entry| entry.weight), Some(3));
        assert_eq!(lexicon.get("bold").map(|entry| entry.weight), Some(4));
        assert_eq!(lexicon.ceiling()[TraitGroup::A], 5);
    }

    #[test]
    fn duplicate_word_fails_wherever_it_appears() {
        for table in [
            "happy,A 5\nhappy,B 1\ncalm,C 2\n",
            "calm,C 2\nhappy,A 5\nHAPPY!,B 1\n",
        ] {
            match parse(LexiconKind::AdjustedWords, table) {
                Err(LexiconError::DuplicateWord { kind, word, .. }) => {
                    assert_eq!(kind, LexiconKind::AdjustedWords);
                    assert_eq!(word, "happy");
                }
                other => panic!("expected duplicate word error, got {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_reports_physical_line() {
        let table = "happy,A 5\ncalm,B 1\nhappy,A 5\n";
        match parse(LexiconKind::SelfWords, table) {
            Err(LexiconError::DuplicateWord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected duplicate word error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_lines_are_rejected() {
        for table in [
            "happy A 5\n",
            "happy,E 5\n",
            "happy,A\n",
            "happy,A \n",
            "happy,A -1\n",
            "happy,A pts\n",
            "...,A 1\n",
        ] {
            assert!(
                matches!(
                    parse(LexiconKind::SelfWords, table),
                    Err(LexiconError::MalformedLine { .. })
                ),
                "expected malformed error for {table:?}"
            );
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let lexicon = parse(LexiconKind::SelfWords, "happy,A 5\n\n   \ncalm,B 1\r\n")
            .expect("table parses");
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn missing_table_is_reported_and_left_empty() {
        let mut sink = Vec::new();
        let lexicon = Lexicon::load(
            LexiconKind::ConceptWords,
            "./does-not-exist/conceptWeight.txt",
            &mut sink,
        )
        .expect("missing table is not fatal");

        assert!(lexicon.is_empty());
        assert_eq!(*lexicon.ceiling(), GroupMap::default());
        assert!(matches!(
            sink.as_slice(),
            [Diagnostic::LexiconUnavailable {
                kind: LexiconKind::ConceptWords,
                ..
            }]
        ));
    }

    #[test]
    fn task_ceiling_is_self_minus_adjusted() {
        let self_words = parse(LexiconKind::SelfWords, "a1,A 5\na2,A 5\nb1,B 4\nc1,C 1\n")
            .expect("self parses");
        let concept_words = parse(LexiconKind::ConceptWords, "d1,D 8\n").expect("concept parses");
        let adjusted_words =
            parse(LexiconKind::AdjustedWords, "a1,A 5\nc1,C 3\n").expect("adjusted parses");

        let lexicons = Lexicons::new(self_words, concept_words, adjusted_words);
        let ceilings = lexicons.ceilings();

        assert_eq!(ceilings.task, GroupMap::from([5, 4, -2, 0]));
        for group in TraitGroup::ordered() {
            assert_eq!(
                ceilings.task[group],
                ceilings.self_projection[group] - ceilings.adjusted[group]
            );
        }
        assert_eq!(ceilings.for_scheme(Scheme::Concept)[TraitGroup::D], 8);
    }
}
