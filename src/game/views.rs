//! Derived read-only views over the game state.

use super::rules;
use super::types::{GameState, Phase};
use crate::puzzle::{GroupId, PuzzleModel, Word};
use crate::store::{Derived, Store};
use std::rc::Rc;

/// Subscribable views recomputed on every state change.
///
/// Presentation code subscribes to these instead of re-deriving game
/// rules itself. Nothing is stored independently of the game state:
/// each view recomputes from the latest snapshot on every notification,
/// so a reader can never observe a value that diverged from the state.
#[derive(Debug)]
pub struct GameViews {
    phase: Derived<Phase>,
    selection_empty: Derived<bool>,
    selection_full: Derived<bool>,
    uncoupled_words: Derived<Vec<Word>>,
    coupled_group_ids: Derived<Vec<GroupId>>,
    mistakes_remaining: Derived<i32>,
    percentage: Derived<f64>,
}

impl GameViews {
    pub(crate) fn wire(model: &Rc<PuzzleModel>, state: &Store<GameState>) -> Self {
        let phase = {
            let model = Rc::clone(model);
            Derived::new(state, move |state| rules::phase(&model, state))
        };
        let selection_empty = Derived::new(state, |state| state.selection().is_empty());
        let selection_full = {
            let model = Rc::clone(model);
            Derived::new(state, move |state| rules::is_selection_full(&model, state))
        };
        let uncoupled_words = {
            let model = Rc::clone(model);
            Derived::new(state, move |state| rules::uncoupled_words(&model, state))
        };
        let coupled_group_ids = Derived::new(state, rules::coupled_group_ids);
        let mistakes_remaining = {
            let model = Rc::clone(model);
            Derived::new(state, move |state| rules::mistakes_remaining(&model, state))
        };
        let percentage = {
            let model = Rc::clone(model);
            Derived::new(state, move |state| rules::solved_fraction(&model, state))
        };
        Self {
            phase,
            selection_empty,
            selection_full,
            uncoupled_words,
            coupled_group_ids,
            mistakes_remaining,
            percentage,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> &Derived<Phase> {
        &self.phase
    }

    /// True while nothing is selected.
    pub fn selection_empty(&self) -> &Derived<bool> {
        &self.selection_empty
    }

    /// True while the selection holds a full group's worth of words.
    pub fn selection_full(&self) -> &Derived<bool> {
        &self.selection_full
    }

    /// Words whose group has not been solved yet, in declaration order.
    pub fn uncoupled_words(&self) -> &Derived<Vec<Word>> {
        &self.uncoupled_words
    }

    /// Groups already solved, in guess order.
    pub fn coupled_group_ids(&self) -> &Derived<Vec<GroupId>> {
        &self.coupled_group_ids
    }

    /// Incorrect guesses still tolerated before the game is lost.
    pub fn mistakes_remaining(&self) -> &Derived<i32> {
        &self.mistakes_remaining
    }

    /// Fraction of groups solved, in `[0, 1]`.
    pub fn percentage(&self) -> &Derived<f64> {
        &self.percentage
    }
}
