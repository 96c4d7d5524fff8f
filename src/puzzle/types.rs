//! Core puzzle data types.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Unique identifier of a puzzle.
pub type PuzzleId = String;

/// Unique identifier of a group within a puzzle.
pub type GroupId = String;

/// A single word tile of the puzzle. Unique across the whole puzzle.
pub type Word = String;

/// A named partition of the puzzle's words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Group {
    /// Group id, unique across the puzzle.
    id: GroupId,
    /// Display title.
    title: String,
    /// Optional explanation revealed once the group is solved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    infos: Option<String>,
    /// Optional link with background information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// Words assigned to this group, in first-seen order.
    ///
    /// Derived cache, rebuilt from the word→group mapping by
    /// [`PuzzleModel::build`](super::PuzzleModel::build); never authored
    /// and never mutated independently of the mapping.
    #[serde(default)]
    #[new(default)]
    words: Vec<Word>,
}

impl Group {
    pub(crate) fn set_words(&mut self, words: Vec<Word>) {
        self.words = words;
    }
}

/// A complete puzzle definition: groups plus the word→group mapping.
///
/// Plain data; nothing is checked until [`PuzzleModel::build`]
/// (or [`validate`]) runs against it.
///
/// [`PuzzleModel::build`]: super::PuzzleModel::build
/// [`validate`]: super::validate()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Puzzle {
    /// Puzzle id, matched against restored game states.
    id: PuzzleId,
    /// Groups in declaration order.
    groups: Vec<Group>,
    /// Word→group assignments in declaration (board) order.
    words: Vec<(Word, GroupId)>,
    /// Incorrect guesses tolerated before the game is lost.
    /// Defaults to the group count when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mistakes_allowed: Option<u32>,
}

impl Puzzle {
    pub(crate) fn groups_mut(&mut self) -> &mut [Group] {
        &mut self.groups
    }
}
