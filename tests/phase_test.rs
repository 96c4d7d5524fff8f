//! Tests for the phase state machine and its precedence.

use couplings::{Game, GameState, Group, Guess, Phase, Puzzle};
use strum::IntoEnumIterator;

fn group(id: &str, title: &str) -> Group {
    Group::new(id.into(), title.into(), None, None)
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(word, group)| (word.to_string(), group.to_string()))
        .collect()
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|word| word.to_string()).collect()
}

fn two_group_puzzle(mistakes_allowed: Option<u32>) -> Puzzle {
    Puzzle::new(
        "p1".into(),
        vec![group("groupa", "Group A"), group("groupb", "Group B")],
        pairs(&[
            ("W1a", "groupa"),
            ("W2a", "groupa"),
            ("W1b", "groupb"),
            ("W2b", "groupb"),
        ]),
        mistakes_allowed,
    )
}

fn mistake(items: &[&str]) -> Guess {
    Guess::new(words(items), None)
}

fn solve(items: &[&str], group: &str) -> Guess {
    Guess::new(words(items), Some(group.to_string()))
}

#[test]
fn test_fresh_game_is_playing() {
    let game = Game::new(two_group_puzzle(None)).expect("valid puzzle");
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn test_mistaken_after_incorrect_guess() {
    let mut game = Game::new(two_group_puzzle(None)).expect("valid puzzle");
    game.select("W1a");
    game.select("W1b");
    assert!(!game.couple_selection());

    // the mistaken selection is still on the board
    assert_eq!(game.phase(), Phase::Mistaken);

    // changing the selection returns to playing
    game.deselect("W1b");
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn test_last_when_one_group_remains() {
    let mut game = Game::new(two_group_puzzle(None)).expect("valid puzzle");
    game.select("W1a");
    game.select("W2a");
    assert!(game.couple_selection());
    assert_eq!(game.phase(), Phase::Last);
}

#[test]
fn test_win_keeps_mistake_budget() {
    let mut game = Game::new(two_group_puzzle(None)).expect("valid puzzle");
    game.select("W1a");
    game.select("W2a");
    assert!(game.couple_selection());
    assert!(game.couple_selection());

    assert_eq!(game.phase(), Phase::Won);
    assert_eq!(game.mistakes_remaining(), 2);
}

#[test]
fn test_loss_on_exhausted_budget() {
    let mut game = Game::new(two_group_puzzle(None)).expect("valid puzzle");
    game.select("W1a");
    game.select("W1b");
    assert!(!game.couple_selection());
    game.clear_selection();
    game.select("W2a");
    game.select("W2b");
    assert!(!game.couple_selection());

    assert_eq!(game.mistakes_remaining(), 0);
    // lost even though most words are still uncoupled
    assert_eq!(game.phase(), Phase::Lost);
}

#[test]
fn test_lost_takes_precedence_over_won() {
    // a restored log can be both out of budget and fully solved
    let state = GameState::new(
        "p1".into(),
        vec![],
        vec![
            mistake(&["W1a", "W1b"]),
            mistake(&["W2a", "W2b"]),
            solve(&["W1a", "W2a"], "groupa"),
            solve(&["W1b", "W2b"], "groupb"),
        ],
    );
    let game = Game::restore(two_group_puzzle(None), state).expect("valid state");
    assert_eq!(game.mistakes_remaining(), 0);
    assert!(game.uncoupled_words().is_empty());
    assert_eq!(game.phase(), Phase::Lost);
}

#[test]
fn test_last_takes_precedence_over_stale_mistake() {
    // the preselected last couple repeats nothing, but even a selection
    // matching an old mistake must report last, not mistaken
    let state = GameState::new(
        "p1".into(),
        words(&["W1b", "W2b"]),
        vec![
            mistake(&["W1b", "W2b"]),
            solve(&["W1a", "W2a"], "groupa"),
        ],
    );
    let game = Game::restore(two_group_puzzle(None), state).expect("valid state");
    assert!(game.is_selection_mistake());
    assert_eq!(game.phase(), Phase::Last);
}

#[test]
fn test_raised_budget_delays_loss() {
    let mut game = Game::new(two_group_puzzle(Some(10))).expect("valid puzzle");
    assert_eq!(game.mistakes_remaining(), 10);

    game.select("W1a");
    game.select("W1b");
    assert!(!game.couple_selection());
    game.clear_selection();
    game.select("W2a");
    game.select("W2b");
    assert!(!game.couple_selection());

    assert_eq!(game.mistakes_remaining(), 8);
    assert_ne!(game.phase(), Phase::Lost);
}

#[test]
fn test_phase_serializes_lowercase() {
    for phase in Phase::iter() {
        let json = serde_json::to_string(&phase).expect("serializable");
        // serde and Display agree on the lowercase name
        assert_eq!(json, format!("\"{phase}\""));
    }
}
