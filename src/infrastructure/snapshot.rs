// Mapper between the ranked board and its JSON snapshot
use crate::domain::board::RankedBoard;
use crate::domain::entry::{Entry, Score};
use crate::error::{BoardError, BoardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// On-disk and over-the-wire shape of a board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BoardSnapshot {
    pub title: String,
    pub description: String,
    #[serde(alias = "capacity")]
    pub max_entries: usize,
    #[serde(deserialize_with = "null_as_empty")]
    pub entries: Vec<EntrySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntrySnapshot {
    pub name: String,
    pub score: Score,
    pub time: DateTime<Utc>,
}

// Older snapshots store an empty board as `"Entries": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<EntrySnapshot>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<EntrySnapshot>>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn board_to_snapshot(board: &RankedBoard) -> BoardSnapshot {
    let entries = board
        .entries()
        .into_iter()
        .map(|e| EntrySnapshot {
            name: e.name().to_string(),
            score: e.score(),
            time: e.recorded_at(),
        })
        .collect();

    BoardSnapshot {
        title: board.title().to_string(),
        description: board.description().to_string(),
        max_entries: board.capacity(),
        entries,
    }
}

pub fn snapshot_to_board(snapshot: BoardSnapshot) -> RankedBoard {
    let entries = snapshot
        .entries
        .into_iter()
        .map(|e| Entry::recorded(e.name, e.score, e.time))
        .collect();

    RankedBoard::from_parts(
        snapshot.title,
        snapshot.description,
        snapshot.max_entries,
        entries,
    )
}

/// Encode a board as compact JSON bytes
pub fn encode(board: &RankedBoard) -> BoardResult<Vec<u8>> {
    Ok(serde_json::to_vec(&board_to_snapshot(board))?)
}

/// Decode JSON bytes into a board; `name` is only used for error reporting
pub fn decode(name: &str, bytes: &[u8]) -> BoardResult<RankedBoard> {
    let snapshot: BoardSnapshot =
        serde_json::from_slice(bytes).map_err(|e| BoardError::Unavailable {
            name: name.to_string(),
            reason: format!("unable to convert file data to json: {}", e),
        })?;
    Ok(snapshot_to_board(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_stored_field_names() {
        let board = RankedBoard::with_capacity("Highscores", "Example", 5);
        board.post(Entry::new("V", 50));

        let bytes = encode(&board).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["Title"], "Highscores");
        assert_eq!(value["Description"], "Example");
        assert_eq!(value["MaxEntries"], 5);
        assert_eq!(value["Entries"][0]["Name"], "V");
        assert_eq!(value["Entries"][0]["Score"], 50);
        assert!(value["Entries"][0]["Time"].is_string());
    }

    #[test]
    fn test_decode_round_trips_order_and_timestamps() {
        let board = RankedBoard::with_capacity("Highscores", "Example", 5);
        for (name, score) in [("A", 10), ("B", 30), ("C", 10)] {
            board.post(Entry::new(name, score));
        }

        let loaded = decode("first", &encode(&board).unwrap()).unwrap();

        assert_eq!(loaded.title(), board.title());
        assert_eq!(loaded.description(), board.description());
        assert_eq!(loaded.capacity(), board.capacity());
        assert_eq!(loaded.entries(), board.entries());
    }

    #[test]
    fn test_decode_accepts_null_entries_and_rfc3339_times() {
        let json = br#"{
            "Title": "Balloon Game Highscores",
            "Description": "simple highscores example",
            "MaxEntries": 20,
            "Entries": null
        }"#;
        let board = decode("first", json).unwrap();
        assert!(board.is_empty());
        assert_eq!(board.capacity(), 20);

        let json = br#"{"Title":"t","Description":"d","capacity":2,
            "Entries":[{"Name":"x","Score":7,"Time":"2019-01-05T22:14:03.123456789Z"}]}"#;
        let board = decode("first", json).unwrap();
        assert_eq!(board.capacity(), 2);
        assert_eq!(board.entries()[0].score(), 7);
        assert_eq!(
            board.entries()[0].recorded_at().to_rfc3339(),
            "2019-01-05T22:14:03.123456789+00:00"
        );
    }

    #[test]
    fn test_decode_rejects_malformed_data() {
        let err = decode("first", b"{not json").unwrap_err();
        assert!(matches!(err, BoardError::Unavailable { ref name, .. } if name == "first"));

        let err = decode("first", br#"{"MaxEntries": -1}"#).unwrap_err();
        assert!(matches!(err, BoardError::Unavailable { .. }));
    }
}
