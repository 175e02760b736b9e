use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const GROUP_SIZE: usize = 4;
pub const GROUP_COUNT: usize = 4;

/// Format of the `date` field of every puzzle record.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A labelled set of words that belong together. `level` is the difficulty tier and drives the
/// colour the group is rendered with once solved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerGroup {
    pub group: String,
    pub level: u8,
    pub members: [String; GROUP_SIZE],
}

impl AnswerGroup {
    pub fn contains(&self, word: &str) -> bool {
        self.members.iter().any(|m| m == word)
    }

    /// Returns true if every member of this group appears in `words`.
    pub fn is_covered_by<S: AsRef<str>>(&self, words: &[S]) -> bool {
        self.members
            .iter()
            .all(|m| words.iter().any(|w| w.as_ref() == m))
    }
}

/// One day's puzzle: sixteen words split into four groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub date: String,
    pub answers: [AnswerGroup; GROUP_COUNT],
}

impl PuzzleRecord {
    /// All words of the puzzle, group by group.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.answers
            .iter()
            .flat_map(|a| a.members.iter().map(String::as_str))
    }

    pub fn parsed_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
    }

    /// The date as shown in the page header, e.g. "June 12, 2023". Falls back to the raw string
    /// if it doesn't parse.
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

/// A word still on the board, and whether the player currently has it selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionState {
    pub word: String,
    pub selected: bool,
}

impl OptionState {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            selected: false,
        }
    }
}
