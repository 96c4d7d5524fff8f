//! Structural puzzle validation.

use super::types::{Puzzle, Word};
use derive_more::{Display, Error};
use std::collections::{HashMap, HashSet};
use tracing::instrument;

/// Structural defects that make a puzzle unplayable.
///
/// Fatal to engine construction; the engine never exists over an
/// invalid puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    /// The puzzle declares no groups.
    #[display("no groups in puzzle")]
    EmptyGroups,
    /// The puzzle declares no words.
    #[display("no words in puzzle")]
    EmptyWords,
    /// The same word is assigned more than once.
    #[display("duplicate word {word} in puzzle")]
    DuplicateWord {
        /// The word that appears twice.
        word: Word,
    },
    /// Words are not split evenly across groups.
    #[display("asymmetric word to group mapping")]
    AsymmetricMapping,
}

/// Checks the structural invariants of `puzzle`.
///
/// Every group must hold exactly `word_count / group_count` words;
/// partial or lopsided puzzles are invalid, not just uneven. Performs
/// no mutation.
#[instrument(skip(puzzle), fields(puzzle_id = %puzzle.id()))]
pub fn validate(puzzle: &Puzzle) -> Result<(), PuzzleError> {
    let group_count = puzzle.groups().len();
    let word_count = puzzle.words().len();

    if group_count == 0 {
        return Err(PuzzleError::EmptyGroups);
    }
    if word_count == 0 {
        return Err(PuzzleError::EmptyWords);
    }

    let mut seen = HashSet::new();
    for (word, _) in puzzle.words() {
        if !seen.insert(word.as_str()) {
            return Err(PuzzleError::DuplicateWord { word: word.clone() });
        }
    }

    if word_count % group_count != 0 {
        return Err(PuzzleError::AsymmetricMapping);
    }

    // an assignment to an undeclared group leaves some declared group short,
    // so it also lands here
    let words_per_group = word_count / group_count;
    let mut tallies: HashMap<&str, usize> = puzzle
        .groups()
        .iter()
        .map(|group| (group.id().as_str(), 0))
        .collect();
    for (_, group_id) in puzzle.words() {
        match tallies.get_mut(group_id.as_str()) {
            Some(tally) => *tally += 1,
            None => return Err(PuzzleError::AsymmetricMapping),
        }
    }
    if tallies.values().any(|&tally| tally != words_per_group) {
        return Err(PuzzleError::AsymmetricMapping);
    }

    Ok(())
}
