//! Word-grouping puzzle engine with reactive state.
//!
//! A fixed vocabulary of words is partitioned into disjoint groups of
//! equal size. The player selects a candidate group of words and submits
//! it as a guess; correct guesses lock their group in, incorrect guesses
//! consume a limited mistake budget, and the game ends in a win or loss.
//!
//! # Architecture
//!
//! - **Puzzle**: immutable puzzle content (groups plus the word→group
//!   mapping), validated once into a [`PuzzleModel`]
//! - **Game**: the engine façade owning one [`GameState`] per puzzle
//!   session, with boolean-returning mutations and pure queries
//! - **Store / Derived**: a minimal synchronous observable container;
//!   [`GameViews`] bundles the derived values presentation code consumes
//!
//! Rendering, daily-puzzle pages, and persistence services are external
//! collaborators: the engine exposes data and operations only.
//!
//! # Example
//!
//! ```
//! use couplings::{Game, Group, Phase, Puzzle};
//!
//! # fn main() -> Result<(), couplings::GameError> {
//! let puzzle = Puzzle::new(
//!     "demo".into(),
//!     vec![
//!         Group::new("fruit".into(), "Fruit".into(), None, None),
//!         Group::new("color".into(), "Colors".into(), None, None),
//!     ],
//!     vec![
//!         ("Apple".into(), "fruit".into()),
//!         ("Teal".into(), "color".into()),
//!         ("Pear".into(), "fruit".into()),
//!         ("Mauve".into(), "color".into()),
//!     ],
//!     None,
//! );
//!
//! let mut game = Game::new(puzzle)?;
//! game.select("Apple");
//! game.select("Pear");
//! assert!(game.couple_selection());
//!
//! // the last remaining group is preselected automatically
//! assert_eq!(game.phase(), Phase::Last);
//! assert!(game.couple_selection());
//! assert_eq!(game.phase(), Phase::Won);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;
mod puzzle;
mod store;

// Crate-level exports - engine and state
pub use game::{Game, GameError, GameState, GameViews, Guess, Phase, RestoreError};

// Crate-level exports - puzzle content
pub use puzzle::{
    Group, GroupId, Puzzle, PuzzleError, PuzzleId, PuzzleModel, Riddle, RiddleError, RiddleGroup,
    Word, validate,
};

// Crate-level exports - reactive containers
pub use store::{Derived, Store, Subscription};
