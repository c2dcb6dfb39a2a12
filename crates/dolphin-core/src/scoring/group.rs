use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the four trait categories every weighted word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitGroup {
    A,
    B,
    C,
    D,
}

impl TraitGroup {
    pub const fn ordered() -> [Self; 4] {
        [Self::A, Self::B, Self::C, Self::D]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    pub fn from_char(value: char) -> Option<Self> {
        match value {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

impl fmt::Display for TraitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Independent weighting dimension a response is accumulated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    SelfProjection,
    Concept,
    Adjusted,
    Task,
}

impl Scheme {
    pub const fn ordered() -> [Self; 4] {
        [Self::SelfProjection, Self::Concept, Self::Adjusted, Self::Task]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfProjection => "self",
            Self::Concept => "concept",
            Self::Adjusted => "adjusted",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-size map keyed by [`TraitGroup`], so every group always has a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupMap<T> {
    slots: [T; 4],
}

impl<T> GroupMap<T> {
    pub fn from_fn(mut f: impl FnMut(TraitGroup) -> T) -> Self {
        Self {
            slots: TraitGroup::ordered().map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitGroup, &T)> {
        TraitGroup::ordered().into_iter().zip(self.slots.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(TraitGroup, &T) -> U) -> GroupMap<U> {
        GroupMap::from_fn(|group| f(group, &self[group]))
    }
}

impl<T> Index<TraitGroup> for GroupMap<T> {
    type Output = T;

    fn index(&self, group: TraitGroup) -> &Self::Output {
        &self.slots[group.index()]
    }
}

impl<T> IndexMut<TraitGroup> for GroupMap<T> {
    fn index_mut(&mut self, group: TraitGroup) -> &mut Self::Output {
        &mut self.slots[group.index()]
    }
}

impl<T> From<[T; 4]> for GroupMap<T> {
    fn from(slots: [T; 4]) -> Self {
        Self { slots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_parses_only_known_letters() {
        assert_eq!(TraitGroup::from_char('C'), Some(TraitGroup::C));
        assert_eq!(TraitGroup::from_char('c'), None);
        assert_eq!(TraitGroup::from_char('E'), None);
    }

    #[test]
    fn group_map_indexes_by_group() {
        let mut map: GroupMap<i64> = GroupMap::default();
        map[TraitGroup::B] += 4;
        map[TraitGroup::D] = 9;

        let collected: Vec<_> = map.iter().map(|(group, value)| (group, *value)).collect();
        assert_eq!(
            collected,
            vec![
                (TraitGroup::A, 0),
                (TraitGroup::B, 4),
                (TraitGroup::C, 0),
                (TraitGroup::D, 9)
            ]
        );
    }
}
