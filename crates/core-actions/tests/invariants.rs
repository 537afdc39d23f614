//! Property test: no key sequence can break the buffer/cursor invariants.

mod common;
use common::*;

use core_actions::handle_key;
use core_events::{Direction, Key, control};
use core_state::EditorState;
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => prop::sample::select(vec![
            "i", "I", "a", "A", "o", "O", "h", "j", "k", "l", "w", "b", "0", "$", "g", "G",
            "x", "d", "y", "p", "P", "v", "u", ":", "1", "q", "w", "漢", "é", " ", "ab\ncd",
        ])
        .prop_map(Key::printable),
        2 => prop::sample::select(vec![
            control::ESC,
            control::CARRIAGE_RETURN,
            control::DEL,
            control::CTRL_R,
            control::TAB,
        ])
        .prop_map(Key::Control),
        1 => prop::sample::select(vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ])
        .prop_map(Key::Arrow),
    ]
}

proptest! {
    #[test]
    fn reachable_states_keep_invariants(
        initial in "[a-c漢 \n]{0,12}",
        keys in prop::collection::vec(key_strategy(), 0..80),
    ) {
        let mut state = EditorState::new(&initial, None);
        for key in &keys {
            handle_key(&mut state, key);
            prop_assert!(state.invariants_hold(), "violated after {:?}", key);
            if state.is_stopped() {
                break;
            }
        }
    }
}

#[test]
fn helper_feed_checks_invariants() {
    let st = run_keys("a", &["o", "b", ESC, "v", "k", "d"]);
    assert!(st.invariants_hold());
}
