//! Author-facing puzzle format.
//!
//! Puzzles are authored as groups with word lists; the engine consumes
//! the mapping form. An optional `order` permutation fixes the board
//! layout of the flattened word list, so authored files can control how
//! the tiles land without revealing the grouping.

use super::types::{Group, GroupId, Puzzle, PuzzleId, Word};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::instrument;

/// One authored group: display metadata plus its word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct RiddleGroup {
    /// Display title.
    title: String,
    /// Optional explanation revealed once the group is solved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    infos: Option<String>,
    /// Optional link with background information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// The group's words.
    words: Vec<Word>,
}

/// An authored puzzle: groups with word lists and an optional board order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Riddle {
    /// Puzzle id carried over to the converted [`Puzzle`].
    id: PuzzleId,
    /// Groups in declaration order.
    groups: Vec<RiddleGroup>,
    /// Permutation of the flattened word list fixing the board layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<Vec<usize>>,
}

/// Defects that keep a riddle from converting into a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RiddleError {
    /// A word appears in more than one group, or twice in one group.
    #[display("duplicate word {word} in riddle")]
    DuplicateWord {
        /// The word that appears twice.
        word: Word,
    },
    /// `order` is not a permutation of the flattened word list indexes.
    #[display("order is not a permutation of 0..{expected}")]
    InvalidOrder {
        /// Length of the flattened word list.
        expected: usize,
    },
}

impl Riddle {
    /// Converts into the mapping-based [`Puzzle`] the engine consumes.
    ///
    /// Group ids are positional (`group1`, `group2`, …) since the
    /// authored format carries none. Without `order`, words land in
    /// group-declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RiddleError`] when a word is assigned twice or `order`
    /// is not a valid permutation.
    #[instrument(skip(self), fields(riddle_id = %self.id))]
    pub fn into_puzzle(self) -> Result<Puzzle, RiddleError> {
        let mut assignments: Vec<(Word, GroupId)> = Vec::new();
        let mut groups = Vec::with_capacity(self.groups.len());
        for (index, group) in self.groups.into_iter().enumerate() {
            let RiddleGroup {
                title,
                infos,
                url,
                words,
            } = group;
            let group_id = format!("group{}", index + 1);
            for word in words {
                assignments.push((word, group_id.clone()));
            }
            groups.push(Group::new(group_id, title, infos, url));
        }

        let mut seen = HashSet::new();
        for (word, _) in &assignments {
            if !seen.insert(word.clone()) {
                return Err(RiddleError::DuplicateWord { word: word.clone() });
            }
        }

        let assignments = match self.order {
            None => assignments,
            Some(order) => {
                if !is_permutation(&order, assignments.len()) {
                    return Err(RiddleError::InvalidOrder {
                        expected: assignments.len(),
                    });
                }
                order
                    .into_iter()
                    .map(|index| assignments[index].clone())
                    .collect()
            }
        };

        Ok(Puzzle::new(self.id, groups, assignments, None))
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    let mut hit = vec![false; len];
    order.len() == len
        && order
            .iter()
            .all(|&index| index < len && !std::mem::replace(&mut hit[index], true))
}
