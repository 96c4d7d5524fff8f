//! Game state types: guesses, the mutable state slice, and the phase.

use crate::puzzle::{GroupId, PuzzleId, Word};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A submitted selection, recorded permanently in the guess log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Guess {
    /// The full selection at the time of submission, in selection order.
    words: Vec<Word>,
    /// The solved group; present iff the guess was judged correct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<GroupId>,
}

impl Guess {
    /// True if this guess was judged incorrect.
    pub fn is_mistake(&self) -> bool {
        self.group.is_none()
    }
}

/// The mutable slice of state that changes during play.
///
/// Owned by exactly one [`Game`](crate::Game) instance. Snapshots
/// serialize with serde and double as the persistence contract for
/// hosts that save games in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameState {
    /// Id of the puzzle this state belongs to.
    puzzle_id: PuzzleId,
    /// Words currently selected, in selection order.
    selection: Vec<Word>,
    /// Append-only log of submitted guesses.
    guesses: Vec<Guess>,
}

impl GameState {
    /// Fresh, unplayed state for the given puzzle.
    pub fn fresh(puzzle_id: PuzzleId) -> Self {
        Self {
            puzzle_id,
            selection: Vec::new(),
            guesses: Vec::new(),
        }
    }

    // Mutations replace whole vectors (copy-on-write) so subscribers can
    // detect change by shallow diff.

    pub(crate) fn with_selection(&self, selection: Vec<Word>) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    pub(crate) fn with_guess(&self, guess: Guess) -> Self {
        let mut guesses = self.guesses.clone();
        guesses.push(guess);
        Self {
            guesses,
            ..self.clone()
        }
    }
}

/// Coarse game status, derived from guesses and selection on every read.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Normal play.
    Playing,
    /// The current full selection repeats an earlier incorrect guess.
    Mistaken,
    /// Exactly one group remains; its words are preselected and locked.
    Last,
    /// The mistake budget is exhausted.
    Lost,
    /// Every group has been solved.
    Won,
}
