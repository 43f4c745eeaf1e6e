//! Predicates over neighbor bitmasks and first-match lookup tables

use serde::{Deserialize, Serialize};

use crate::neighbors::Neighbors;

/// A boolean predicate over a [`Neighbors`] value.
///
/// Tables of tagged predicates replace per-entry closures so rule tables can
/// be declared as data and serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Matches every value.
    Always,
    /// Every bit of the mask is set.
    Has(u8),
    /// No bit of the mask is set.
    HasNot(u8),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn and(self, other: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Shorthand for `Has(required) AND HasNot(forbidden)`
    pub fn has_and_not(required: u8, forbidden: u8) -> Condition {
        Condition::Has(required).and(Condition::HasNot(forbidden))
    }

    pub fn matches(&self, neighbors: Neighbors) -> bool {
        match self {
            Condition::Always => true,
            Condition::Has(mask) => neighbors.includes_all(*mask),
            Condition::HasNot(mask) => neighbors.excludes_all(*mask),
            Condition::And(left, right) => left.matches(neighbors) && right.matches(neighbors),
            Condition::Or(left, right) => left.matches(neighbors) || right.matches(neighbors),
        }
    }
}

/// Ordered list of `(value, condition)` pairs. Fetching returns the value of
/// the first entry whose condition holds.
#[derive(Debug, Clone, Default)]
pub struct ConditionMap<T> {
    entries: Vec<(T, Condition)>,
}

impl<T> ConditionMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, value: T, condition: Condition) {
        self.entries.push((value, condition));
    }

    /// First matching value, if any
    pub fn fetch(&self, neighbors: Neighbors) -> Option<&T> {
        self.entries
            .iter()
            .find(|(_, condition)| condition.matches(neighbors))
            .map(|(value, _)| value)
    }

    /// Number of entries matching `neighbors` (used to detect overlaps)
    pub fn match_count(&self, neighbors: Neighbors) -> usize {
        self.entries
            .iter()
            .filter(|(_, condition)| condition.matches(neighbors))
            .count()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(value, _)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
