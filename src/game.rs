use rand::Rng;

use crate::model::{AnswerGroup, OptionState, PuzzleRecord, GROUP_COUNT, GROUP_SIZE};
use crate::shuffle::{shuffle, shuffle_with};

/// Wrong guesses allowed before the round ends.
pub const STARTING_LIVES: u8 = 4;

/// Advisory messages raised by the game. They never block; the page shows them for
/// [`Notice::duration_ms`] and then drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SelectFour,
    InvalidGroup,
    GameOver,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::SelectFour => "Select 4 options",
            Notice::InvalidGroup => "Invalid group",
            Notice::GameOver => "Game Over",
        }
    }

    pub fn duration_ms(&self) -> u32 {
        match self {
            Notice::SelectFour | Notice::InvalidGroup => 2500,
            Notice::GameOver => 5000,
        }
    }
}

/// What happened when the player submitted their selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    /// Fewer than four words were selected. Nothing changed.
    Incomplete { selected: usize },
    /// The selection was exactly this group, which is now solved.
    Correct(AnswerGroup),
    /// Not a group. `lives` is what's left after the penalty.
    Wrong { lives: u8 },
    /// Not a group, and that was the last life. Every group is now revealed.
    GameOver,
}

impl Guess {
    /// Notices to raise for this outcome, in order.
    pub fn notices(&self) -> &'static [Notice] {
        match self {
            Guess::Incomplete { .. } => &[Notice::SelectFour],
            Guess::Correct(_) => &[],
            Guess::Wrong { .. } => &[Notice::InvalidGroup],
            Guess::GameOver => &[Notice::InvalidGroup, Notice::GameOver],
        }
    }
}

/// One attempt at one puzzle.
///
/// Words move from `options` to `solved` a group at a time, so between them they always hold the
/// puzzle's sixteen words exactly once. The round is over once every group is solved or the lives
/// run out; there is no separate state flag for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    puzzle: PuzzleRecord,
    solved: Vec<AnswerGroup>,
    options: Vec<OptionState>,
    lives: u8,
}

impl Session {
    pub fn new(puzzle: PuzzleRecord) -> Self {
        Self::new_with(puzzle, &mut rand::rng())
    }

    /// Lays the puzzle's words out in a random order, nothing selected, nothing solved.
    pub fn new_with<R: Rng + ?Sized>(puzzle: PuzzleRecord, rng: &mut R) -> Self {
        let words: Vec<&str> = puzzle.words().collect();
        let options = shuffle_with(&words, rng)
            .into_iter()
            .map(OptionState::new)
            .collect();

        Self {
            puzzle,
            solved: Vec::with_capacity(GROUP_COUNT),
            options,
            lives: STARTING_LIVES,
        }
    }

    /// Solved groups, easiest first. After a loss this is the full answer key instead.
    pub fn solved(&self) -> &[AnswerGroup] {
        &self.solved
    }

    pub fn options(&self) -> &[OptionState] {
        &self.options
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn selected(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.word.as_str())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.selected).count()
    }

    #[cfg(test)]
    fn is_won(&self) -> bool {
        self.lives > 0 && self.solved.len() == GROUP_COUNT
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0 || self.solved.len() == GROUP_COUNT
    }

    /// Flips the selection of `word`. Returns false, changing nothing, if the word isn't on the
    /// board or selecting it would make more than four selected words.
    pub fn toggle(&mut self, word: &str) -> bool {
        let selected = self.selected_count();
        let Some(option) = self.options.iter_mut().find(|o| o.word == word) else {
            return false;
        };

        if !option.selected && selected >= GROUP_SIZE {
            return false;
        }

        option.selected = !option.selected;
        true
    }

    /// Reorders the board. Selections stay with their words.
    pub fn shuffle_options(&mut self) {
        self.options = shuffle(&self.options);
    }

    #[cfg(test)]
    fn shuffle_options_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.options = shuffle_with(&self.options, rng);
    }

    pub fn deselect_all(&mut self) {
        for option in &mut self.options {
            option.selected = false;
        }
    }

    /// Checks the current selection against the answer key.
    pub fn submit(&mut self) -> Guess {
        let selected = self.selected();
        if selected.len() < GROUP_SIZE {
            return Guess::Incomplete {
                selected: selected.len(),
            };
        }

        let found = self
            .puzzle
            .answers
            .iter()
            .find(|a| a.is_covered_by(&selected))
            .cloned();

        match found {
            Some(group) => {
                self.options.retain(|o| !group.contains(&o.word));
                self.solved.push(group.clone());
                self.solved.sort_by_key(|g| g.level);
                Guess::Correct(group)
            }
            None => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives > 0 {
                    return Guess::Wrong { lives: self.lives };
                }

                self.solved = self.puzzle.answers.to_vec();
                self.options.clear();
                Guess::GameOver
            }
        }
    }
}
