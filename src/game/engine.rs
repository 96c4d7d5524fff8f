//! Game engine façade: construction, queries, and mutations.

use super::rules;
use super::types::{GameState, Guess, Phase};
use super::views::GameViews;
use crate::puzzle::{Group, GroupId, Puzzle, PuzzleError, PuzzleId, PuzzleModel, Word};
use crate::store::{Store, Subscription};
use derive_more::{Display, Error, From};
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// Defects in a saved state offered for restoration.
///
/// Fatal to construction with that state; callers may fall back to a
/// fresh state.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RestoreError {
    /// The state belongs to a different puzzle.
    #[display("saved state is for puzzle {found}, expected {expected}")]
    PuzzleMismatch {
        /// Id of the puzzle being constructed.
        expected: PuzzleId,
        /// Id carried by the saved state.
        found: PuzzleId,
    },
    /// The selection contains a word the puzzle does not know.
    #[display("unknown word {word} in selection of saved state")]
    UnknownSelectionWord {
        /// The offending word.
        word: Word,
    },
    /// The selection holds more words than a group contains.
    #[display("selection of saved state holds {found} words, limit {limit}")]
    OversizedSelection {
        /// Words per group of the puzzle.
        limit: usize,
        /// Selection length carried by the saved state.
        found: usize,
    },
    /// A word appears more than once in the selection.
    #[display("word {word} selected twice in saved state")]
    DuplicateSelectionWord {
        /// The offending word.
        word: Word,
    },
    /// A guess contains a word the puzzle does not know.
    #[display("unknown word {word} in guess #{index} of saved state")]
    UnknownGuessWord {
        /// Position of the guess in the log.
        index: usize,
        /// The offending word.
        word: Word,
    },
    /// A guess credits a group the puzzle does not know.
    #[display("unknown group {group} in guess #{index} of saved state")]
    UnknownGuessGroup {
        /// Position of the guess in the log.
        index: usize,
        /// The offending group id.
        group: GroupId,
    },
    /// Two guesses credit the same group. The engine never records a
    /// second solve of a group, so such a log cannot be genuine.
    #[display("group {group} credited again in guess #{index} of saved state")]
    DuplicateGroupCredit {
        /// Position of the second crediting guess in the log.
        index: usize,
        /// The group credited twice.
        group: GroupId,
    },
}

/// Errors fatal to engine construction.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// The puzzle itself is structurally invalid.
    Puzzle(PuzzleError),
    /// The supplied saved state does not fit the puzzle.
    Restore(RestoreError),
}

/// One in-progress game: an immutable [`PuzzleModel`] plus the mutable
/// [`GameState`] behind a reactive [`Store`].
///
/// One instance owns exactly one game. Hosts running several puzzles at
/// once construct one engine per puzzle; there is no ambient shared
/// state between instances.
///
/// Queries are pure functions of the current state; mutations report
/// "not allowed right now" outcomes through their boolean return value
/// rather than errors.
#[derive(Debug)]
pub struct Game {
    model: Rc<PuzzleModel>,
    state: Store<GameState>,
    views: GameViews,
}

enum Verdict {
    NotFull,
    AlreadyCoupled(GroupId),
    Mistake(Vec<Word>),
    Correct(Vec<Word>, GroupId),
}

impl Game {
    /// Builds an engine over `puzzle` with a fresh, unplayed state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Puzzle`] when the puzzle is structurally
    /// invalid.
    #[instrument(skip(puzzle), fields(puzzle_id = %puzzle.id()))]
    pub fn new(puzzle: Puzzle) -> Result<Self, GameError> {
        let model = PuzzleModel::build(puzzle)?;
        let state = GameState::fresh(model.id().clone());
        Ok(Self::assemble(model, state))
    }

    /// Builds an engine over `puzzle`, resuming from a saved state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Puzzle`] when the puzzle is structurally
    /// invalid, or [`GameError::Restore`] when the saved state
    /// references a different puzzle, unknown words, or unknown groups,
    /// or when its selection or guess log could not have been produced
    /// by play (oversized or repeating selection, twice-credited group).
    #[instrument(skip(puzzle, state), fields(puzzle_id = %puzzle.id()))]
    pub fn restore(puzzle: Puzzle, state: GameState) -> Result<Self, GameError> {
        let model = PuzzleModel::build(puzzle)?;
        validate_state(&model, &state)?;
        Ok(Self::assemble(model, state))
    }

    fn assemble(model: PuzzleModel, state: GameState) -> Self {
        info!(
            puzzle_id = %model.id(),
            guesses = state.guesses().len(),
            "game engine ready"
        );
        let model = Rc::new(model);
        let state = Store::new(state);
        let views = GameViews::wire(&model, &state);
        Self {
            model,
            state,
            views,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Puzzle queries
    // ─────────────────────────────────────────────────────────────

    /// The underlying puzzle, with group word caches filled.
    pub fn puzzle(&self) -> &Puzzle {
        self.model.puzzle()
    }

    /// All puzzle words in declaration order.
    pub fn words(&self) -> Vec<Word> {
        self.model.words()
    }

    /// Number of words in the puzzle.
    pub fn word_count(&self) -> usize {
        self.model.word_count()
    }

    /// Group ids in declaration order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.model.group_ids()
    }

    /// Words per group.
    pub fn words_per_group(&self) -> usize {
        self.model.words_per_group()
    }

    /// Looks up a group by id.
    pub fn group_by_id(&self, id: &str) -> Option<&Group> {
        self.model.group_by_id(id)
    }

    // ─────────────────────────────────────────────────────────────
    //  State queries
    // ─────────────────────────────────────────────────────────────

    /// The current selection, in selection order.
    pub fn selection(&self) -> Vec<Word> {
        self.state.with(|state| state.selection().clone())
    }

    /// The guess log, in submission order.
    pub fn guesses(&self) -> Vec<Guess> {
        self.state.with(|state| state.guesses().clone())
    }

    /// Groups already solved, in guess order.
    pub fn coupled_group_ids(&self) -> Vec<GroupId> {
        self.state.with(rules::coupled_group_ids)
    }

    /// Word lists of the incorrect guesses, in guess order.
    pub fn mistaken_guesses(&self) -> Vec<Vec<Word>> {
        self.state.with(rules::mistaken_guesses)
    }

    /// Words whose group has not been solved yet, in declaration order.
    pub fn uncoupled_words(&self) -> Vec<Word> {
        self.state.with(|state| rules::uncoupled_words(&self.model, state))
    }

    /// Incorrect guesses still tolerated before the game is lost.
    pub fn mistakes_remaining(&self) -> i32 {
        self.state
            .with(|state| rules::mistakes_remaining(&self.model, state))
    }

    /// True once the selection holds a full group's worth of words.
    pub fn is_selection_full(&self) -> bool {
        self.state
            .with(|state| rules::is_selection_full(&self.model, state))
    }

    /// True iff the current full selection repeats an earlier incorrect
    /// guess, disregarding order.
    pub fn is_selection_mistake(&self) -> bool {
        self.state
            .with(|state| rules::is_selection_mistake(&self.model, state))
    }

    /// True iff exactly one group remains unsolved.
    pub fn is_last_couple(&self) -> bool {
        self.state
            .with(|state| rules::is_last_couple(&self.model, state))
    }

    /// Largest number of selected words sharing one group.
    pub fn max_correlation(&self) -> usize {
        self.state
            .with(|state| rules::max_correlation(&self.model, state))
    }

    /// The current phase, derived from guesses and selection.
    pub fn phase(&self) -> Phase {
        self.state.with(|state| rules::phase(&self.model, state))
    }

    /// A snapshot of the current state, suitable for persisting and
    /// later [`restore`](Game::restore).
    pub fn snapshot(&self) -> GameState {
        self.state.get()
    }

    /// The derived, subscribable views over this game's state.
    pub fn views(&self) -> &GameViews {
        &self.views
    }

    /// Subscribes to the raw game state; the callback fires once
    /// immediately and then synchronously after every mutation.
    pub fn subscribe(&self, callback: impl FnMut(&GameState) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutations
    // ─────────────────────────────────────────────────────────────

    /// Appends `word` to the selection.
    ///
    /// Returns false when the selection is already full, the word is
    /// already selected, or the puzzle does not contain it.
    #[instrument(skip(self), fields(puzzle_id = %self.model.id()))]
    pub fn select(&mut self, word: &str) -> bool {
        if !self.model.contains_word(word) {
            debug!(word, "select rejected: word not in puzzle");
            return false;
        }
        let accepted = self.state.with(|state| {
            !rules::is_selection_full(&self.model, state)
                && !state.selection().iter().any(|selected| selected == word)
        });
        if !accepted {
            debug!(word, "select rejected: selection full or word already selected");
            return false;
        }
        let word = word.to_owned();
        self.state.update(move |state| {
            let mut selection = state.selection().clone();
            selection.push(word);
            state.with_selection(selection)
        });
        true
    }

    /// Removes `word` from the selection; removing an absent word still
    /// succeeds.
    ///
    /// Returns false while the last group is locked in: the
    /// auto-preselected final couple cannot be altered.
    #[instrument(skip(self), fields(puzzle_id = %self.model.id()))]
    pub fn deselect(&mut self, word: &str) -> bool {
        if self.is_last_couple() {
            debug!(word, "deselect rejected: last group is locked");
            return false;
        }
        let word = word.to_owned();
        self.state.update(move |state| {
            let selection = state
                .selection()
                .iter()
                .filter(|selected| **selected != word)
                .cloned()
                .collect();
            state.with_selection(selection)
        });
        true
    }

    /// Empties the selection.
    ///
    /// Returns false while the last group is locked in.
    #[instrument(skip(self), fields(puzzle_id = %self.model.id()))]
    pub fn clear_selection(&mut self) -> bool {
        if self.is_last_couple() {
            debug!("clear rejected: last group is locked");
            return false;
        }
        self.state.update(|state| state.with_selection(Vec::new()));
        true
    }

    /// Submits the current selection as a guess.
    ///
    /// An incorrect guess is appended to the log and costs a mistake;
    /// the selection stays on the board. A correct guess is credited to
    /// its group and clears the selection; when exactly one group then
    /// remains, its words are preselected for the player. A
    /// correct-looking guess for a group that is already solved records
    /// nothing. Returns true only for a correct, newly credited guess.
    #[instrument(skip(self), fields(puzzle_id = %self.model.id()))]
    pub fn couple_selection(&mut self) -> bool {
        let verdict = self.state.with(|state| {
            if !rules::is_selection_full(&self.model, state) {
                return Verdict::NotFull;
            }
            let selection = state.selection().clone();
            if rules::max_correlation(&self.model, state) < self.model.words_per_group() {
                return Verdict::Mistake(selection);
            }
            // the whole selection maps to the group of its first word
            match self.model.group_of(&selection[0]).cloned() {
                Some(group) if rules::coupled_group_ids(state).contains(&group) => {
                    Verdict::AlreadyCoupled(group)
                }
                Some(group) => Verdict::Correct(selection, group),
                None => Verdict::Mistake(selection),
            }
        });

        match verdict {
            Verdict::NotFull => {
                debug!("guess rejected: selection not full");
                false
            }
            Verdict::AlreadyCoupled(group) => {
                warn!(%group, "guess ignored: group already solved");
                false
            }
            Verdict::Mistake(words) => {
                debug!(?words, "incorrect guess recorded");
                self.state
                    .update(move |state| state.with_guess(Guess::new(words, None)));
                false
            }
            Verdict::Correct(words, group) => {
                info!(%group, "group solved");
                let model = Rc::clone(&self.model);
                self.state.update(move |state| {
                    let next = state.with_guess(Guess::new(words, Some(group)));
                    let selection = if rules::is_last_couple(&model, &next) {
                        // preselect the final group for the player
                        rules::uncoupled_words(&model, &next)
                    } else {
                        Vec::new()
                    };
                    next.with_selection(selection)
                });
                true
            }
        }
    }
}

fn validate_state(model: &PuzzleModel, state: &GameState) -> Result<(), RestoreError> {
    if state.puzzle_id() != model.id() {
        return Err(RestoreError::PuzzleMismatch {
            expected: model.id().clone(),
            found: state.puzzle_id().clone(),
        });
    }
    if state.selection().len() > model.words_per_group() {
        return Err(RestoreError::OversizedSelection {
            limit: model.words_per_group(),
            found: state.selection().len(),
        });
    }
    let mut selected: HashSet<&Word> = HashSet::new();
    for word in state.selection() {
        if !model.contains_word(word) {
            return Err(RestoreError::UnknownSelectionWord { word: word.clone() });
        }
        if !selected.insert(word) {
            return Err(RestoreError::DuplicateSelectionWord { word: word.clone() });
        }
    }
    let mut credited: HashSet<&GroupId> = HashSet::new();
    for (index, guess) in state.guesses().iter().enumerate() {
        for word in guess.words() {
            if !model.contains_word(word) {
                return Err(RestoreError::UnknownGuessWord {
                    index,
                    word: word.clone(),
                });
            }
        }
        if let Some(group) = guess.group() {
            if model.group_by_id(group).is_none() {
                return Err(RestoreError::UnknownGuessGroup {
                    index,
                    group: group.clone(),
                });
            }
            if !credited.insert(group) {
                return Err(RestoreError::DuplicateGroupCredit {
                    index,
                    group: group.clone(),
                });
            }
        }
    }
    Ok(())
}
