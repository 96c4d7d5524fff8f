//! Pure derivations over puzzle model and game state.
//!
//! Everything here recomputes from (model, state) on every call; nothing
//! is cached, so the engine queries and the derived views can never
//! diverge from the underlying state.

use super::types::{GameState, Phase};
use crate::puzzle::{GroupId, PuzzleModel, Word};
use std::collections::HashMap;

/// Groups already solved, in guess order.
pub fn coupled_group_ids(state: &GameState) -> Vec<GroupId> {
    state
        .guesses()
        .iter()
        .filter_map(|guess| guess.group().clone())
        .collect()
}

/// Word lists of the incorrect guesses, in guess order.
pub fn mistaken_guesses(state: &GameState) -> Vec<Vec<Word>> {
    state
        .guesses()
        .iter()
        .filter(|guess| guess.is_mistake())
        .map(|guess| guess.words().clone())
        .collect()
}

/// Words whose group has not been solved yet, in declaration order.
pub fn uncoupled_words(model: &PuzzleModel, state: &GameState) -> Vec<Word> {
    let coupled = coupled_group_ids(state);
    model
        .puzzle()
        .words()
        .iter()
        .filter(|(_, group_id)| !coupled.contains(group_id))
        .map(|(word, _)| word.clone())
        .collect()
}

/// Incorrect guesses still tolerated. Negative when a restored log
/// overshoots the budget; the phase rule only tests `<= 0`.
pub fn mistakes_remaining(model: &PuzzleModel, state: &GameState) -> i32 {
    model.mistakes_allowed() as i32 - mistaken_guesses(state).len() as i32
}

/// True once the selection holds a full group's worth of words.
pub fn is_selection_full(model: &PuzzleModel, state: &GameState) -> bool {
    state.selection().len() >= model.words_per_group()
}

/// True iff the current full selection repeats an earlier incorrect
/// guess, compared as a multiset (order disregarded, counts exact).
pub fn is_selection_mistake(model: &PuzzleModel, state: &GameState) -> bool {
    if !is_selection_full(model, state) {
        return false;
    }
    let selection = sorted(state.selection());
    state
        .guesses()
        .iter()
        .any(|guess| guess.is_mistake() && sorted(guess.words()) == selection)
}

/// True iff exactly one group remains unsolved.
pub fn is_last_couple(model: &PuzzleModel, state: &GameState) -> bool {
    model.group_count() - coupled_group_ids(state).len() == 1
}

/// Largest number of selected words sharing one group; 0 for an empty
/// selection.
pub fn max_correlation(model: &PuzzleModel, state: &GameState) -> usize {
    let mut tallies: HashMap<&GroupId, usize> = HashMap::new();
    for word in state.selection() {
        if let Some(group_id) = model.group_of(word) {
            *tallies.entry(group_id).or_insert(0) += 1;
        }
    }
    tallies.values().copied().max().unwrap_or(0)
}

/// Fraction of groups solved, in `[0, 1]`.
pub fn solved_fraction(model: &PuzzleModel, state: &GameState) -> f64 {
    coupled_group_ids(state).len() as f64 / model.group_count() as f64
}

/// Derives the phase. Precedence, first match wins:
/// lost, won, last, mistaken, playing.
pub fn phase(model: &PuzzleModel, state: &GameState) -> Phase {
    if mistakes_remaining(model, state) <= 0 {
        Phase::Lost
    } else if uncoupled_words(model, state).is_empty() {
        Phase::Won
    } else if is_last_couple(model, state) {
        Phase::Last
    } else if is_selection_mistake(model, state) {
        Phase::Mistaken
    } else {
        Phase::Playing
    }
}

fn sorted(words: &[Word]) -> Vec<&Word> {
    let mut words: Vec<&Word> = words.iter().collect();
    words.sort();
    words
}
