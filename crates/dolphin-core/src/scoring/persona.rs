use super::group::{GroupMap, Scheme, TraitGroup};
use std::collections::BTreeSet;

/// Running weight and distinct words for one scheme/group pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTally {
    pub weight: i64,
    pub words: BTreeSet<String>,
}

impl GroupTally {
    pub fn count(&self) -> usize {
        self.words.len()
    }
}

/// Per-response accumulator: a subject name and one tally per scheme and group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Persona {
    subject: Option<String>,
    self_projection: GroupMap<GroupTally>,
    concept: GroupMap<GroupTally>,
    adjusted: GroupMap<GroupTally>,
    task: GroupMap<GroupTally>,
}

impl Persona {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = Some(subject.into());
    }

    pub fn tallies(&self, scheme: Scheme) -> &GroupMap<GroupTally> {
        match scheme {
            Scheme::SelfProjection => &self.self_projection,
            Scheme::Concept => &self.concept,
            Scheme::Adjusted => &self.adjusted,
            Scheme::Task => &self.task,
        }
    }

    fn tallies_mut(&mut self, scheme: Scheme) -> &mut GroupMap<GroupTally> {
        match scheme {
            Scheme::SelfProjection => &mut self.self_projection,
            Scheme::Concept => &mut self.concept,
            Scheme::Adjusted => &mut self.adjusted,
            Scheme::Task => &mut self.task,
        }
    }

    pub fn tally(&self, scheme: Scheme, group: TraitGroup) -> &GroupTally {
        &self.tallies(scheme)[group]
    }

    pub fn weights(&self, scheme: Scheme) -> GroupMap<i64> {
        self.tallies(scheme).map(|_, tally| tally.weight)
    }

    /// Sum of the distinct-word counts over all groups of a scheme.
    pub fn total_words(&self, scheme: Scheme) -> usize {
        self.tallies(scheme).values().map(GroupTally::count).sum()
    }

    /// Counts a word once. Returns `false`, leaving the tally untouched, when
    /// the word was already recorded for this scheme and group.
    pub fn record_distinct(
        &mut self,
        scheme: Scheme,
        group: TraitGroup,
        word: &str,
        weight: u32,
    ) -> bool {
        let tally = &mut self.tallies_mut(scheme)[group];
        if tally.words.contains(word) {
            return false;
        }
        tally.words.insert(word.to_string());
        tally.weight += i64::from(weight);
        true
    }

    /// Adds the weight on every call; the word set only grows on first sight.
    pub fn accumulate(&mut self, scheme: Scheme, group: TraitGroup, word: &str, weight: u32) {
        let tally = &mut self.tallies_mut(scheme)[group];
        tally.words.insert(word.to_string());
        tally.weight += i64::from(weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_recording_ignores_repeats() {
        let mut persona = Persona::new();
        assert!(persona.record_distinct(Scheme::SelfProjection, TraitGroup::A, "happy", 5));
        assert!(!persona.record_distinct(Scheme::SelfProjection, TraitGroup::A, "happy", 5));

        let tally = persona.tally(Scheme::SelfProjection, TraitGroup::A);
        assert_eq!(tally.weight, 5);
        assert_eq!(tally.count(), 1);
    }

    #[test]
    fn accumulate_adds_weight_each_time() {
        let mut persona = Persona::new();
        persona.accumulate(Scheme::Task, TraitGroup::C, "calm", 2);
        persona.accumulate(Scheme::Task, TraitGroup::C, "calm", 2);

        assert_eq!(persona.weights(Scheme::Task)[TraitGroup::C], 4);
        assert_eq!(persona.total_words(Scheme::Task), 1);
    }

    #[test]
    fn totals_span_all_groups() {
        let mut persona = Persona::new();
        persona.record_distinct(Scheme::Concept, TraitGroup::A, "bold", 1);
        persona.record_distinct(Scheme::Concept, TraitGroup::D, "quiet", 1);
        persona.record_distinct(Scheme::Concept, TraitGroup::D, "still", 1);

        assert_eq!(persona.total_words(Scheme::Concept), 3);
        assert_eq!(persona.total_words(Scheme::SelfProjection), 0);
    }
}
