// Ranked board domain model - bounded, always-sorted collection of entries
use super::entry::{Entry, Score};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Capacity given to boards created without an explicit one.
pub const DEFAULT_CAPACITY: usize = 20;

/// Keeps the top `capacity` entries sorted by descending score.
///
/// Equal scores keep their insertion order. Admission is serialized by an
/// internal lock, so a shared `&RankedBoard` can be posted to from many
/// threads at once.
#[derive(Debug)]
pub struct RankedBoard {
    title: String,
    description: String,
    capacity: usize,
    entries: Mutex<Vec<Entry>>,
}

impl RankedBoard {
    /// Creates an empty board with [`DEFAULT_CAPACITY`].
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_capacity(title, description, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: usize,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            capacity,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Reconstitutes a board from stored parts.
    ///
    /// A hand-edited snapshot may hold unsorted entries or more than
    /// `capacity` of them; both are repaired here so the invariants hold
    /// from the first admission on.
    pub fn from_parts(
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: usize,
        mut entries: Vec<Entry>,
    ) -> Self {
        let title = title.into();
        let sorted = entries.is_sorted_by(|a, b| a.score() >= b.score());
        if !sorted {
            tracing::warn!("Board '{}' entries were not sorted, re-sorting", title);
            entries.sort_by(|a, b| b.score().cmp(&a.score()));
        }
        if entries.len() > capacity {
            tracing::warn!(
                "Board '{}' holds {} entries but capacity is {}, dropping the lowest",
                title,
                entries.len(),
                capacity
            );
            entries.truncate(capacity);
        }

        Self {
            title,
            description: description.into(),
            capacity,
            entries: Mutex::new(entries),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offers an entry to the board. Returns whether it was kept.
    pub fn post(&self, entry: Entry) -> bool {
        self.admit(entry).is_some()
    }

    /// Offers an entry to the board and returns the 1-based rank it landed
    /// on, or `None` when the score was not high enough.
    ///
    /// On a full board the score must be strictly greater than the lowest
    /// retained score; a tie does not displace it.
    pub fn admit(&self, entry: Entry) -> Option<usize> {
        let mut entries = self.lock();
        if self.capacity == 0 {
            return None;
        }

        if entries.len() >= self.capacity {
            let lowest = entries.last().map(Entry::score)?;
            if entry.score() <= lowest {
                return None;
            }
            entries.pop();
        }

        // Insert after every entry with an equal or higher score.
        let index = entries
            .iter()
            .position(|e| e.score() < entry.score())
            .unwrap_or(entries.len());
        entries.insert(index, entry);

        Some(index + 1)
    }

    /// Whether a score would be admitted right now.
    pub fn qualifies(&self, score: Score) -> bool {
        let entries = self.lock();
        if self.capacity == 0 {
            return false;
        }
        if entries.len() < self.capacity {
            return true;
        }
        entries.last().map(|e| score > e.score()).unwrap_or(true)
    }

    /// A consistent copy of the entries, highest score first.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().clone()
    }

    pub fn top_score(&self) -> Option<Score> {
        self.lock().first().map(Entry::score)
    }

    pub fn lowest_score(&self) -> Option<Score> {
        self.lock().last().map(Entry::score)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock().len() >= self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        // Admission never leaves the vector half-updated, so a poisoned lock
        // still guards valid data.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Display for RankedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lock();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "({})", entry.score())?;
        }
        Ok(())
    }
}
