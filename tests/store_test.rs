//! Tests for the reactive store and the derived game views.

use couplings::{Derived, Game, Group, Phase, Puzzle, Store};
use std::cell::RefCell;
use std::rc::Rc;

fn group(id: &str, title: &str) -> Group {
    Group::new(id.into(), title.into(), None, None)
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(word, group)| (word.to_string(), group.to_string()))
        .collect()
}

fn two_group_puzzle() -> Puzzle {
    Puzzle::new(
        "p1".into(),
        vec![group("groupa", "Group A"), group("groupb", "Group B")],
        pairs(&[
            ("W1a", "groupa"),
            ("W2a", "groupa"),
            ("W1b", "groupb"),
            ("W2b", "groupb"),
        ]),
        None,
    )
}

fn recorded<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T)) {
    let seen: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
}

#[test]
fn test_subscribe_notifies_immediately() {
    let store = Store::new(41);
    let (seen, callback) = recorded();
    let _subscription = store.subscribe(callback);
    assert_eq!(*seen.borrow(), vec![41]);
}

#[test]
fn test_replace_and_update_notify_synchronously() {
    let store = Store::new(1);
    let (seen, callback) = recorded();
    let _subscription = store.subscribe(callback);

    store.replace(2);
    store.update(|current| current * 10);

    assert_eq!(*seen.borrow(), vec![1, 2, 20]);
    assert_eq!(store.get(), 20);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let store = Store::new(0);
    let (seen, callback) = recorded();
    let subscription = store.subscribe(callback);

    store.replace(1);
    subscription.unsubscribe();
    store.replace(2);

    assert_eq!(*seen.borrow(), vec![0, 1]);
}

#[test]
fn test_dropping_the_handle_unsubscribes() {
    let store = Store::new(0);
    let (seen, callback) = recorded();
    {
        let _subscription = store.subscribe(callback);
        store.replace(1);
    }
    store.replace(2);
    assert_eq!(*seen.borrow(), vec![0, 1]);
}

#[test]
fn test_mutation_inside_subscriber_is_queued() {
    let store = Store::new(0);
    let (seen, mut callback) = recorded::<i32>();

    let nested = store.clone();
    let _subscription = store.subscribe(move |value: &i32| {
        callback(value);
        if *value == 1 {
            nested.update(|current| current + 100);
        }
    });

    store.replace(1);
    // the nested mutation ran after the first pass, with its own pass
    assert_eq!(*seen.borrow(), vec![0, 1, 101]);
    assert_eq!(store.get(), 101);
}

#[test]
fn test_derived_recomputes_on_every_change() {
    let store = Store::new(2);
    let doubled = Derived::new(&store, |value| value * 2);
    assert_eq!(doubled.get(), 4);

    let (seen, callback) = recorded();
    let _subscription = doubled.subscribe(callback);

    store.replace(5);
    store.replace(7);
    assert_eq!(doubled.get(), 14);
    assert_eq!(*seen.borrow(), vec![4, 10, 14]);
}

#[test]
fn test_game_views_follow_play() {
    let mut game = Game::new(two_group_puzzle()).expect("valid puzzle");
    let (phases, callback) = recorded::<Phase>();
    let _subscription = game.views().phase().subscribe(callback);

    assert!(game.views().selection_empty().get());
    assert!(!game.views().selection_full().get());
    assert_eq!(game.views().percentage().get(), 0.0);

    game.select("W1a");
    game.select("W2a");
    assert!(!game.views().selection_empty().get());
    assert!(game.views().selection_full().get());

    assert!(game.couple_selection());
    assert_eq!(game.views().percentage().get(), 0.5);
    assert_eq!(
        game.views().coupled_group_ids().get(),
        vec!["groupa".to_string()]
    );
    assert_eq!(
        game.views().uncoupled_words().get(),
        vec!["W1b".to_string(), "W2b".to_string()]
    );

    assert!(game.couple_selection());
    assert_eq!(game.views().percentage().get(), 1.0);

    // one notification per mutation, immediate one included
    assert_eq!(
        *phases.borrow(),
        vec![
            Phase::Playing, // on subscribe
            Phase::Playing, // select W1a
            Phase::Playing, // select W2a
            Phase::Last,    // first couple
            Phase::Won,     // second couple
        ]
    );
}

#[test]
fn test_views_never_diverge_from_queries() {
    let mut game = Game::new(two_group_puzzle()).expect("valid puzzle");
    game.select("W1a");
    game.select("W1b");
    assert!(!game.couple_selection());

    assert_eq!(game.views().phase().get(), game.phase());
    assert_eq!(
        game.views().mistakes_remaining().get(),
        game.mistakes_remaining()
    );
    assert_eq!(game.views().uncoupled_words().get(), game.uncoupled_words());
    assert_eq!(
        game.views().coupled_group_ids().get(),
        game.coupled_group_ids()
    );
}

#[test]
fn test_state_subscription_sees_every_mutation() {
    let mut game = Game::new(two_group_puzzle()).expect("valid puzzle");
    let counter = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&counter);
    let _subscription = game.subscribe(move |_| *sink.borrow_mut() += 1);
    assert_eq!(*counter.borrow(), 1);

    game.select("W1a");
    game.deselect("W1a");
    game.clear_selection();
    assert_eq!(*counter.borrow(), 4);
}
