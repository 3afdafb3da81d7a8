use proptest::prelude::*;

use crate::types::KeyEvent;

use super::make_session;

fn arb_event() -> impl Strategy<Value = KeyEvent> {
    prop_oneof![
        prop::char::range('a', 'z').prop_map(KeyEvent::Text),
        Just(KeyEvent::Text('!')),
        Just(KeyEvent::Backspace),
        Just(KeyEvent::Space),
        Just(KeyEvent::Enter),
        Just(KeyEvent::Escape),
        Just(KeyEvent::ArrowDown),
        Just(KeyEvent::ArrowUp),
        (0usize..3).prop_map(KeyEvent::SelectCandidate),
    ]
}

proptest! {
    /// Any key sequence leaves the session in a coherent state: commits
    /// are never empty, and composition-ending keys actually end it.
    #[test]
    fn session_state_stays_coherent(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut session = make_session();

        for event in events {
            let was_composing = session.is_composing();
            let resp = session.handle_key(event);

            if let Some(commit) = &resp.commit {
                prop_assert!(!commit.is_empty());
            }

            match event {
                KeyEvent::Escape if was_composing => {
                    prop_assert!(!session.is_composing());
                    prop_assert!(resp.commit.is_none());
                }
                KeyEvent::Space | KeyEvent::Enter if was_composing => {
                    prop_assert!(!session.is_composing());
                    prop_assert!(resp.commit.is_some());
                }
                KeyEvent::Text(c) if c.is_ascii_alphabetic() => {
                    prop_assert!(session.is_composing());
                    prop_assert!(resp.consumed);
                }
                _ => {}
            }

            // The buffer only ever holds what was typed.
            prop_assert!(session.composed_string().chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    /// Backspacing everything away returns to idle without a commit.
    #[test]
    fn backspace_unwinds_to_idle(word in "[a-z]{1,8}") {
        let mut session = make_session();
        super::type_string(&mut session, &word);

        for _ in 0..word.len() {
            let resp = session.handle_key(KeyEvent::Backspace);
            prop_assert!(resp.consumed);
            prop_assert!(resp.commit.is_none());
        }
        prop_assert!(!session.is_composing());
    }
}
