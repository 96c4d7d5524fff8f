//! Puzzle domain: data types, structural validation, and the validated
//! model the engine runs against.

mod model;
mod riddle;
mod types;
mod validate;

pub use model::PuzzleModel;
pub use riddle::{Riddle, RiddleError, RiddleGroup};
pub use types::{Group, GroupId, Puzzle, PuzzleId, Word};
pub use validate::{PuzzleError, validate};
