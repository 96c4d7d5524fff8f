//! Game engine: state types, pure rules, the façade, and derived views.

mod engine;
mod rules;
mod types;
mod views;

pub use engine::{Game, GameError, RestoreError};
pub use types::{GameState, Guess, Phase};
pub use views::GameViews;
