//! Validated puzzle model with lookup indexes.

use super::types::{Group, GroupId, Puzzle, PuzzleId, Word};
use super::validate::{self, PuzzleError};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// A validated puzzle plus the lookup caches built from it.
///
/// Construction runs the structural checks once and fills the per-group
/// word lists from the word→group mapping. The mapping is treated as
/// immutable afterwards, so the caches stay consistent for the life of
/// the model.
#[derive(Debug, Clone)]
pub struct PuzzleModel {
    puzzle: Puzzle,
    group_index: HashMap<GroupId, usize>,
    word_groups: HashMap<Word, GroupId>,
}

impl PuzzleModel {
    /// Validates `puzzle` and builds the lookup caches.
    ///
    /// The per-group word cache is rebuilt from scratch, overwriting
    /// anything a deserialized puzzle may have carried in
    /// [`Group::words`](Group::words).
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] when the puzzle is structurally unplayable.
    #[instrument(skip(puzzle), fields(puzzle_id = %puzzle.id()))]
    pub fn build(mut puzzle: Puzzle) -> Result<Self, PuzzleError> {
        validate::validate(&puzzle)?;

        let group_index: HashMap<GroupId, usize> = puzzle
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| (group.id().clone(), index))
            .collect();
        let word_groups: HashMap<Word, GroupId> = puzzle.words().iter().cloned().collect();

        let mut caches: Vec<Vec<Word>> = vec![Vec::new(); puzzle.groups().len()];
        for (word, group_id) in puzzle.words() {
            if let Some(&slot) = group_index.get(group_id) {
                caches[slot].push(word.clone());
            }
        }
        for (group, words) in puzzle.groups_mut().iter_mut().zip(caches) {
            group.set_words(words);
        }

        debug!(
            groups = group_index.len(),
            words = word_groups.len(),
            "puzzle model built"
        );
        Ok(Self {
            puzzle,
            group_index,
            word_groups,
        })
    }

    /// The underlying puzzle, with group word caches filled.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Puzzle id.
    pub fn id(&self) -> &PuzzleId {
        self.puzzle.id()
    }

    /// All puzzle words in declaration order.
    pub fn words(&self) -> Vec<Word> {
        self.puzzle
            .words()
            .iter()
            .map(|(word, _)| word.clone())
            .collect()
    }

    /// Number of words in the puzzle.
    pub fn word_count(&self) -> usize {
        self.puzzle.words().len()
    }

    /// Group ids in declaration order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.puzzle
            .groups()
            .iter()
            .map(|group| group.id().clone())
            .collect()
    }

    /// Number of groups in the puzzle.
    pub fn group_count(&self) -> usize {
        self.puzzle.groups().len()
    }

    /// Words per group; validation guarantees the division is exact.
    pub fn words_per_group(&self) -> usize {
        self.word_count() / self.group_count()
    }

    /// Looks up a group by id.
    pub fn group_by_id(&self, id: &str) -> Option<&Group> {
        self.group_index
            .get(id)
            .and_then(|&index| self.puzzle.groups().get(index))
    }

    /// The group a word is assigned to.
    pub fn group_of(&self, word: &str) -> Option<&GroupId> {
        self.word_groups.get(word)
    }

    /// True if the puzzle contains `word`.
    pub fn contains_word(&self, word: &str) -> bool {
        self.word_groups.contains_key(word)
    }

    /// The mistake budget, defaulting to the group count.
    pub fn mistakes_allowed(&self) -> u32 {
        self.puzzle
            .mistakes_allowed()
            .unwrap_or(self.group_count() as u32)
    }
}
