// Entry domain model
use chrono::{DateTime, Utc};

/// Score values are plain signed integers.
pub type Score = i64;

/// A single record on a board. Fields are private so a stored entry can
/// only ever be replaced, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    score: Score,
    recorded_at: DateTime<Utc>,
}

impl Entry {
    /// Creates an entry stamped with the current time.
    pub fn new(name: impl Into<String>, score: Score) -> Self {
        Self::recorded(name, score, Utc::now())
    }

    /// Rebuilds an entry with a known timestamp, e.g. from a snapshot.
    pub fn recorded(name: impl Into<String>, score: Score, recorded_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            score,
            recorded_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_stamped_now() {
        let before = Utc::now();
        let entry = Entry::new("noob1", 1);
        let after = Utc::now();

        assert_eq!(entry.name(), "noob1");
        assert_eq!(entry.score(), 1);
        assert!(entry.recorded_at() >= before && entry.recorded_at() <= after);
    }
}
