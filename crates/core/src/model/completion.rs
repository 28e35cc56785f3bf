use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of a sublesson in a course: `(lesson_index, sublesson_index)`.
///
/// Used both as the viewer cursor and as the completion-set key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct CompletionKey {
    pub lesson_index: usize,
    pub sublesson_index: usize,
}

pub type Cursor = CompletionKey;

impl CompletionKey {
    #[must_use]
    pub const fn new(lesson_index: usize, sublesson_index: usize) -> Self {
        Self {
            lesson_index,
            sublesson_index,
        }
    }

    /// One-based `lesson.sublesson` label shown next to the content title.
    #[must_use]
    pub fn ordinal_label(self) -> String {
        format!("{}.{}", self.lesson_index + 1, self.sublesson_index + 1)
    }
}

impl fmt::Display for CompletionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lesson_index, self.sublesson_index)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid completion key: {raw:?}")]
pub struct ParseKeyError {
    raw: String,
}

impl FromStr for CompletionKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyError { raw: s.to_owned() };
        let (lesson, sublesson) = s.split_once('-').ok_or_else(err)?;
        let lesson_index = lesson.trim().parse().map_err(|_| err())?;
        let sublesson_index = sublesson.trim().parse().map_err(|_| err())?;
        Ok(Self::new(lesson_index, sublesson_index))
    }
}

/// Sublessons the learner has finished, server-reported or completed this session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionSet {
    keys: BTreeSet<CompletionKey>,
}

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the key was not present before.
    pub fn insert(&mut self, key: CompletionKey) -> bool {
        self.keys.insert(key)
    }

    #[must_use]
    pub fn with(&self, key: CompletionKey) -> Self {
        let mut next = self.clone();
        next.insert(key);
        next
    }

    /// Union with another snapshot; keys are never dropped.
    #[must_use]
    pub fn merged(&self, other: &CompletionSet) -> Self {
        let mut next = self.clone();
        next.keys.extend(other.keys.iter().copied());
        next
    }

    #[must_use]
    pub fn contains(&self, key: CompletionKey) -> bool {
        self.keys.contains(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CompletionKey> + '_ {
        self.keys.iter().copied()
    }
}

impl FromIterator<CompletionKey> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = CompletionKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Rounded completion percentage; every sublesson weighs the same.
///
/// Returns 0 for a course without sublessons and never exceeds 100.
#[must_use]
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    // Half-up rounding without floats.
    let pct = (completed * 200 + total) / (total * 2);
    u8::try_from(pct).unwrap_or(100)
}
