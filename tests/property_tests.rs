//! Property-based tests for board generation and the selection state machine.

use proptest::prelude::*;

use memory_match::{
    generate, GameController, GameMode, GameRng, GameSession, Phase, PlayerId,
    RecordingPresenter, StartRequest, TileIndex,
};

/// One thing a player (or the clock) can do.
#[derive(Clone, Debug)]
enum Input {
    Select(usize),
    Wait(u64),
    Reset,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        6 => (0usize..18).prop_map(Input::Select),
        3 => (0u64..2500).prop_map(Input::Wait),
        1 => Just(Input::Reset),
    ]
}

/// Invariants that hold between any two events.
fn check_session(session: &GameSession) -> Result<(), TestCaseError> {
    let board = session.board();
    let selection = session.selection();

    prop_assert!(board.is_well_formed());
    prop_assert!(selection.len() <= 2);
    prop_assert_eq!(session.is_locked(), session.phase() == Phase::Evaluating);

    for (index, tile) in board.indexed() {
        let selected = selection.contains(&index);
        if tile.matched {
            prop_assert!(!selected);
        } else {
            // Face-up unmatched tiles are exactly the current selection.
            prop_assert_eq!(tile.revealed, selected);
        }
    }

    let matched = board.matched_count();
    prop_assert_eq!(matched % 2, 0);

    let total: u32 = session.players().iter().map(|(_, p)| p.score).sum();
    prop_assert_eq!(total as usize, matched / 2 * 10);

    if let Some(secs) = session.time_remaining() {
        prop_assert!(secs > 0 && secs <= 60);
    }
    prop_assert!(session.active_player().index() < session.players().player_count());
    Ok(())
}

proptest! {
    #[test]
    fn generated_boards_hold_each_symbol_twice(seed in any::<u64>(), pairs in 1usize..=8) {
        let board = generate(pairs, &mut GameRng::new(seed));

        prop_assert_eq!(board.len(), pairs * 2);
        prop_assert!(board.is_well_formed());
        prop_assert_eq!(board.symbol_counts().len(), pairs);
        prop_assert!(board.tiles().all(|t| !t.revealed && !t.matched));
    }

    #[test]
    fn random_play_keeps_session_consistent(
        seed in any::<u64>(),
        multi in any::<bool>(),
        inputs in prop::collection::vec(input(), 1..120),
    ) {
        let mut game = GameController::with_seed(seed, RecordingPresenter::new());
        if multi {
            game.change_mode(GameMode::Multi);
            game.start(&StartRequest::multi("Ana", "Bo")).unwrap();
        } else {
            game.start(&StartRequest::single("Ana")).unwrap();
        }

        for input in inputs {
            match input {
                Input::Select(i) => {
                    let _ = game.select_tile(TileIndex::new(i));
                }
                Input::Wait(ms) => game.advance(ms),
                Input::Reset => {
                    prop_assert!(game.reset().is_some());
                }
            }

            let session = game.session().unwrap();
            check_session(session)?;

            // Only the live session may have pending tasks.
            let live = game.scheduler().pending_for(session.id()).len();
            prop_assert_eq!(live, game.scheduler().len());
        }
    }

    #[test]
    fn ignored_selection_leaves_session_unchanged(
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..20, 1..40),
    ) {
        let mut game = GameController::with_seed(seed, RecordingPresenter::new());
        game.start(&StartRequest::single("Ana")).unwrap();

        for pick in picks {
            let before = game.session().unwrap().clone();
            if game.select_tile(TileIndex::new(pick)).is_err() {
                prop_assert_eq!(game.session().unwrap(), &before);
            }
            game.advance(900);
        }
        prop_assert!(game.session().unwrap().score(PlayerId::ONE) % 10 == 0);
    }
}
