//! Full game lifecycle integration tests.

use twenty48::store::{leaderboard, stats};
use twenty48::{
    load_best_score, load_snapshot, save_best_score, save_snapshot, Board, Direction, GameState,
    GameStatus, MemoryStore, NewEntry,
};

fn playing_state(board: Board) -> GameState {
    let mut state = GameState::new(42, 0);
    state.board = board;
    state
}

// =============================================================================
// Seeded Playthroughs
// =============================================================================

#[test]
fn seeded_game_plays_to_a_terminal_state() {
    let mut game = GameState::new(1234, 0);
    let mut moves = 0;

    while game.status == GameStatus::Playing && moves < 10_000 {
        let mut any = false;
        for direction in Direction::ALL {
            let score_before = game.score;
            if game.make_move(direction) {
                any = true;
                assert!(game.score >= score_before);
                assert!(game.best_score >= game.score);
                moves += 1;
                break;
            }
        }
        if !any {
            break;
        }
    }

    assert!(game.status.is_terminal(), "status = {:?}", game.status);
    assert!(game.ended_at.is_some());
    assert_eq!(game.move_count, moves);

    // Every surviving tile respects the value invariant.
    for row in game.board.rows() {
        for &cell in row {
            assert!(cell == 0 || (cell >= 2 && cell.is_power_of_two()));
        }
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let mut a = GameState::new(77, 0);
    let mut b = GameState::new(77, 0);

    for _ in 0..200 {
        for direction in Direction::ALL {
            assert_eq!(a.make_move(direction), b.make_move(direction));
        }
    }

    assert_eq!(a.board, b.board);
    assert_eq!(a.score, b.score);
    assert_eq!(a.move_count, b.move_count);
}

// =============================================================================
// Undo Semantics
// =============================================================================

#[test]
fn undo_best_score_is_max_of_both_states() {
    let mut state = playing_state(Board::from_rows([
        [512, 512, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]));
    state.best_score = 600;

    assert!(state.make_move(Direction::Left));
    assert_eq!(state.score, 1024);
    assert_eq!(state.best_score, 1024);

    assert!(state.undo());
    assert_eq!(state.score, 0);
    // max(best before undo, best of restored state)
    assert_eq!(state.best_score, 1024);
    assert!(!state.can_undo);
}

#[test]
fn undo_restores_tiles_exactly() {
    let board = Board::from_rows([
        [2, 2, 4, 8],
        [0, 16, 0, 16],
        [2, 0, 0, 2],
        [0, 0, 32, 32],
    ]);
    let mut state = playing_state(board);

    assert!(state.make_move(Direction::Right));
    assert_ne!(state.board, board);

    assert!(state.undo());
    assert_eq!(state.board, board);
    assert_eq!(state.move_count, 0);
}

// =============================================================================
// Terminal States
// =============================================================================

#[test]
fn terminal_states_reject_every_direction_unchanged() {
    for status in [GameStatus::Won, GameStatus::Lost] {
        let mut state = playing_state(Board::from_rows([
            [2, 2, 4, 4],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]));
        state.status = status;
        let before = state.clone();

        for direction in Direction::ALL {
            assert!(!state.make_move(direction));
            assert_eq!(state, before);
        }
    }
}

#[test]
fn won_status_survives_playing_past_the_threshold() {
    let mut state = playing_state(Board::from_rows([
        [1024, 1024, 2, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]));

    assert!(state.make_move(Direction::Left));
    assert_eq!(state.status, GameStatus::Won);

    // Moves after a win stay rejected until a fresh game.
    for direction in Direction::ALL {
        assert!(!state.make_move(direction));
    }
    assert_eq!(state.status, GameStatus::Won);
}

// =============================================================================
// Terminal → Leaderboard/Stats Flow
// =============================================================================

#[test]
fn finished_game_feeds_leaderboard_and_stats() {
    let mut store = MemoryStore::new();
    let mut state = playing_state(Board::from_rows([
        [1024, 1024, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]));

    assert!(state.make_move(Direction::Left));
    assert_eq!(state.status, GameStatus::Won);

    let duration = state.duration().expect("terminal game has a duration");
    let stored = leaderboard::append(
        &mut store,
        NewEntry {
            player_name: String::new(),
            score: state.score,
            final_tile: state.final_tile(),
            move_count: state.move_count,
            timestamp: state.ended_at.unwrap(),
            game_time: duration.num_milliseconds() as f64 / 1000.0,
            board_state: state.board,
        },
    )
    .unwrap();

    assert_eq!(stored.player_name, "Anonymous");
    assert_eq!(stored.score, 2048);
    assert_eq!(stored.final_tile, 2048);

    let recorded = stats::record(
        &mut store,
        state.score,
        state.move_count,
        state.status == GameStatus::Won,
        state.final_tile(),
    )
    .unwrap();
    assert_eq!(recorded.games_played, 1);
    assert_eq!(recorded.games_won, 1);

    save_best_score(&mut store, state.best_score).unwrap();
    assert_eq!(load_best_score(&store), 2048);
}

// =============================================================================
// Snapshot Persistence
// =============================================================================

#[test]
fn saved_game_resumes_with_the_same_tile_sequence() {
    let mut store = MemoryStore::new();
    let mut live = GameState::new(9, 0);

    for direction in [Direction::Left, Direction::Up, Direction::Right] {
        live.make_move(direction);
    }
    save_snapshot(&mut store, &live).unwrap();

    let mut resumed = load_snapshot(&store).expect("snapshot loads");
    assert_eq!(resumed, live);

    // The restored RNG continues exactly where the live one is.
    for _ in 0..20 {
        for direction in Direction::ALL {
            assert_eq!(live.make_move(direction), resumed.make_move(direction));
        }
    }
    assert_eq!(live.board, resumed.board);
    assert_eq!(live.score, resumed.score);
}

#[test]
fn fresh_game_replaces_state_wholesale() {
    let mut old = GameState::new(5, 0);
    while !old.make_move(Direction::Left) && !old.make_move(Direction::Up) {}
    old.best_score = 900;

    let fresh = GameState::new(6, old.best_score);

    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.move_count, 0);
    assert_eq!(fresh.best_score, 900); // ratchet carries across games
    assert!(fresh.previous.is_none());
    assert_eq!(fresh.board.empty_positions().len(), 14);
}
