use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

use crate::model::PuzzleRecord;

/// Puzzle data compiled into the binary. Shared by the server render and the hydrated client.
const EMBEDDED_PUZZLES: &str = include_str!("../data/connections.json");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse puzzle data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("puzzle data contains no puzzles")]
    Empty,
    #[error("puzzle date {date:?} is not a YYYY-MM-DD calendar date: {source}")]
    InvalidDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("puzzle {next} comes after {previous}; dates must be strictly ascending")]
    OutOfOrder { previous: String, next: String },
    #[error("puzzle {date} uses the word {word:?} more than once")]
    DuplicateWord { date: String, word: String },
}

/// The read-only list of puzzles, sorted ascending by date and never empty. Cloning is cheap, so
/// it is handed around by value (and through Leptos context) rather than kept in a global.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    puzzles: Arc<[PuzzleRecord]>,
}

impl Dataset {
    /// Loads the puzzles bundled with the app.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(EMBEDDED_PUZZLES)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let puzzles: Vec<PuzzleRecord> = serde_json::from_str(json)?;
        Self::new(puzzles)
    }

    /// Validates `puzzles` and wraps them. Group and member counts are already enforced by the
    /// record types; this checks the things the types can't: a non-empty list, real dates in
    /// strictly ascending order, and sixteen distinct words per puzzle.
    pub fn new(puzzles: Vec<PuzzleRecord>) -> Result<Self, DatasetError> {
        if puzzles.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut previous: Option<(&PuzzleRecord, NaiveDate)> = None;
        for puzzle in &puzzles {
            let date = puzzle
                .parsed_date()
                .map_err(|source| DatasetError::InvalidDate {
                    date: puzzle.date.clone(),
                    source,
                })?;

            if let Some((prev, prev_date)) = previous {
                if prev_date >= date {
                    return Err(DatasetError::OutOfOrder {
                        previous: prev.date.clone(),
                        next: puzzle.date.clone(),
                    });
                }
            }

            let mut seen = HashSet::new();
            for word in puzzle.words() {
                if !seen.insert(word) {
                    return Err(DatasetError::DuplicateWord {
                        date: puzzle.date.clone(),
                        word: word.to_string(),
                    });
                }
            }

            previous = Some((puzzle, date));
        }

        Ok(Self {
            puzzles: puzzles.into(),
        })
    }

    /// Today's puzzle, which is always the last one.
    pub fn latest(&self) -> &PuzzleRecord {
        &self.puzzles[self.puzzles.len() - 1]
    }

    pub fn earliest(&self) -> &PuzzleRecord {
        &self.puzzles[0]
    }

    pub fn find(&self, date: &str) -> Option<&PuzzleRecord> {
        self.puzzles.iter().find(|p| p.date == date)
    }

    /// Picks any puzzle uniformly at random, the latest one included.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &PuzzleRecord {
        self.puzzles.choose(rng).unwrap_or_else(|| self.latest())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PuzzleRecord> {
        self.puzzles.iter()
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::fruit_puzzle;
    use crate::model::{GROUP_COUNT, GROUP_SIZE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dated(date: &str) -> PuzzleRecord {
        let mut puzzle = fruit_puzzle();
        puzzle.date = date.to_string();
        puzzle
    }

    #[test]
    fn test_embedded_dataset_is_valid() {
        let dataset = Dataset::embedded().expect("embedded puzzles should load");
        assert!(!dataset.is_empty());

        for puzzle in dataset.iter() {
            assert_eq!(puzzle.answers.len(), GROUP_COUNT);
            for answer in &puzzle.answers {
                assert_eq!(answer.members.len(), GROUP_SIZE);
            }
            let distinct: HashSet<&str> = puzzle.words().collect();
            assert_eq!(distinct.len(), GROUP_SIZE * GROUP_COUNT, "{}", puzzle.date);
        }
    }

    #[test]
    fn test_latest_earliest_and_find() {
        let dataset = Dataset::new(vec![
            dated("2023-06-12"),
            dated("2023-06-13"),
            dated("2023-06-20"),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.latest().date, "2023-06-20");
        assert_eq!(dataset.earliest().date, "2023-06-12");
        assert_eq!(dataset.find("2023-06-13").unwrap().date, "2023-06-13");
        assert!(dataset.find("2023-06-14").is_none());
        assert!(dataset.find("").is_none());
    }

    #[test]
    fn test_choose_covers_every_puzzle() {
        let dataset = Dataset::new(vec![
            dated("2023-06-12"),
            dated("2023-06-13"),
            dated("2023-06-14"),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let seen: HashSet<String> = (0..200)
            .map(|_| dataset.choose(&mut rng).date.clone())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_choose_single_puzzle() {
        let dataset = Dataset::new(vec![dated("2023-06-12")]).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..10 {
            assert_eq!(dataset.choose(&mut rng).date, "2023-06-12");
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Dataset::new(vec![]), Err(DatasetError::Empty)));
        assert!(matches!(Dataset::from_json("[]"), Err(DatasetError::Empty)));
    }

    #[test]
    fn test_rejects_bad_dates() {
        let result = Dataset::new(vec![dated("2023-13-40")]);
        assert!(matches!(result, Err(DatasetError::InvalidDate { .. })));

        let result = Dataset::new(vec![dated("2023-06-13"), dated("2023-06-12")]);
        assert!(matches!(result, Err(DatasetError::OutOfOrder { .. })));

        // Two puzzles on the same day are ambiguous for date lookups.
        let result = Dataset::new(vec![dated("2023-06-12"), dated("2023-06-12")]);
        assert!(matches!(result, Err(DatasetError::OutOfOrder { .. })));
    }

    #[test]
    fn test_rejects_duplicate_words() {
        let mut puzzle = fruit_puzzle();
        puzzle.answers[3].members[0] = "APPLE".to_string();
        match Dataset::new(vec![puzzle]) {
            Err(DatasetError::DuplicateWord { word, .. }) => assert_eq!(word, "APPLE"),
            other => panic!("expected duplicate word error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        // Three members in a group.
        let json = r#"[{"date": "2023-06-12", "answers": [
            {"group": "A", "level": 0, "members": ["a", "b", "c"]},
            {"group": "B", "level": 1, "members": ["e", "f", "g", "h"]},
            {"group": "C", "level": 2, "members": ["i", "j", "k", "l"]},
            {"group": "D", "level": 3, "members": ["m", "n", "o", "p"]}
        ]}]"#;
        assert!(matches!(Dataset::from_json(json), Err(DatasetError::Parse(_))));

        // Only one group.
        let json = r#"[{"date": "2023-06-12", "answers": [
            {"group": "A", "level": 0, "members": ["a", "b", "c", "d"]}
        ]}]"#;
        assert!(matches!(Dataset::from_json(json), Err(DatasetError::Parse(_))));

        assert!(matches!(Dataset::from_json("{"), Err(DatasetError::Parse(_))));
    }
}
