//! Property tests for dealing, shuffling and arbitrary play.

use std::time::Duration;

use concentration::game::shuffle::shuffle;
use concentration::game::{
    Board, CardState, Deck, GameEvent, GameSession, ManualScheduler, Timing,
};
use concentration::EventLog;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn deck_of(pairs: usize) -> Deck {
    Deck::new((0..pairs).map(|i| format!("s{i}"))).unwrap()
}

#[derive(Clone, Debug)]
enum Action {
    Select(usize),
    Advance(u64),
    Restart,
}

fn action(cards: usize) -> impl Strategy<Value = Action> {
    prop_oneof![
        8 => (0..cards + 2).prop_map(Action::Select),
        4 => (0u64..1500).prop_map(Action::Advance),
        1 => Just(Action::Restart),
    ]
}

proptest! {
    #[test]
    fn shuffle_keeps_every_element(mut values in proptest::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
        let mut expected = values.clone();
        shuffle(&mut values, &mut StdRng::seed_from_u64(seed));
        values.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn fresh_board_holds_each_symbol_twice(pairs in 1usize..24, seed in any::<u64>()) {
        let deck = deck_of(pairs);
        let board = Board::shuffled(&deck, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(board.len(), pairs * 2);
        prop_assert_eq!(board.count(CardState::Hidden), pairs * 2);
        prop_assert!(board.verify(&deck).is_ok());
        for symbol in deck.symbols() {
            let copies = board.cards().iter().filter(|card| card.symbol() == symbol).count();
            prop_assert_eq!(copies, 2);
        }
    }

    #[test]
    fn arbitrary_play_keeps_invariants(
        pairs in 1usize..6,
        seed in any::<u64>(),
        actions in proptest::collection::vec(action(12), 0..120),
    ) {
        let mut session = GameSession::with_rng(
            deck_of(pairs),
            Timing::default(),
            ManualScheduler::new(),
            EventLog::new(),
            StdRng::seed_from_u64(seed),
        );
        let mut completions_this_game = 0;

        for action in actions {
            let before_attempts = session.attempts();
            match action {
                Action::Select(position) => {
                    let was_locked = session.is_locked();
                    let events_before = session.observer().events().len();
                    session.select_card(position);
                    if was_locked {
                        prop_assert_eq!(session.observer().events().len(), events_before);
                    }
                    prop_assert!(session.attempts() - before_attempts <= 1);
                }
                Action::Advance(ms) => session.advance(Duration::from_millis(ms)),
                Action::Restart => {
                    session.request_restart();
                    completions_this_game = 0;
                }
            }

            for event in session.observer_mut().take() {
                if let GameEvent::GameComplete { .. } = event {
                    completions_this_game += 1;
                }
            }
            prop_assert!(completions_this_game <= 1);
            prop_assert!(session.verify().is_ok(), "{:?}", session.verify());
            prop_assert_eq!(
                session.matched_pairs() == session.pair_count(),
                session.board().all_matched()
            );
            if !session.is_locked() {
                prop_assert!(session.board().count(CardState::Revealed) <= 1);
            }
        }
    }
}
