//! Scenario tests - hand-built boards driven through the public API

use emoji_crush::core::{find_matches, EngineConfig, Grid, Lifecycle, PickOutcome, Resolver};
use emoji_crush::engine::Session;
use emoji_crush::types::TokenKind::{self, *};
use emoji_crush::types::{EngineEvent, GameAction, Position, TokenId, BOARD_SIZE};

/// Diagonal stripes: no run anywhere
fn striped() -> [[TokenKind; 8]; 8] {
    let pattern = [Apple, Grape, Orange, Lemon, Blueberry, Coconut];
    let mut kinds = [[Apple; 8]; 8];
    for (r, row) in kinds.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = pattern[(r + c) % pattern.len()];
        }
    }
    kinds
}

/// Ids from `Grid::from_kinds` are row-major
fn id_at(row: u8, col: u8) -> TokenId {
    TokenId(row as u32 * BOARD_SIZE as u32 + col as u32)
}

/// Row 3 reads Lemon Coconut Coconut Apple; (2,3) is Coconut.
/// Swapping (2,3) with (3,3) completes Coconut at row 3, cols 1-3.
fn single_run_board() -> [[TokenKind; 8]; 8] {
    let mut kinds = striped();
    kinds[3][1] = Coconut;
    kinds
}

/// Row 5 reads Lemon Lemon Grape Lemon; column 0 holds Apple at rows 4, 6, 7.
/// Swapping (5,2) with (5,3) clears row 5 cols 0-2, which drops the Apple at
/// (4,0) onto the two below it.
fn cascade_board() -> [[TokenKind; 8]; 8] {
    let mut kinds = striped();
    kinds[5][0] = Lemon;
    kinds[5][1] = Lemon;
    kinds[5][3] = Lemon;
    kinds[4][0] = Apple;
    kinds[7][0] = Apple;
    kinds
}

fn cleared(events: &[EngineEvent]) -> Vec<(u32, u32, u32)> {
    events
        .iter()
        .filter_map(|e| match *e {
            EngineEvent::Cleared {
                pass,
                tokens,
                score_delta,
            } => Some((pass, tokens, score_delta)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_fixtures_start_quiescent() {
    assert!(find_matches(&Grid::from_kinds(striped())).is_empty());
    assert!(find_matches(&Grid::from_kinds(single_run_board())).is_empty());
    assert!(find_matches(&Grid::from_kinds(cascade_board())).is_empty());
}

#[test]
fn test_swap_forms_single_horizontal_run() {
    let mut grid = Grid::from_kinds(single_run_board());
    assert!(grid.swap(Position::new(2, 3), Position::new(3, 3)));

    let matched = find_matches(&grid);
    assert_eq!(matched.len(), 3);
    // (3,3) now holds the token that started at (2,3)
    for id in [id_at(3, 1), id_at(3, 2), id_at(2, 3)] {
        assert!(matched.contains(id), "missing {:?}", id);
    }
}

#[test]
fn test_swap_scores_three_tokens() {
    let config = EngineConfig::default();
    let mut resolver =
        Resolver::with_grid(config, 11, Grid::from_kinds(single_run_board())).unwrap();

    assert_eq!(
        resolver.pick(Position::new(2, 3)),
        PickOutcome::Selected(Position::new(2, 3))
    );
    assert!(matches!(
        resolver.pick(Position::new(3, 3)),
        PickOutcome::Swapped { .. }
    ));

    // Match check
    assert!(resolver.advance());
    let snap = resolver.snapshot();
    assert_eq!(snap.pending.len(), 3);

    let events = resolver.drain_events();
    assert_eq!(
        cleared(&events),
        vec![(1, 3, 3 * config.points_per_token)]
    );
}

#[test]
fn test_column_gravity_and_refill() {
    let config = EngineConfig::instant();
    // Runs at row 2 (Apple) and row 5 (Lemon), both spanning cols 3-5, so
    // column 4 loses rows 2 and 5.
    let mut kinds = striped();
    kinds[2][3] = Apple;
    kinds[2][5] = Apple;
    kinds[5][3] = Lemon;
    kinds[5][5] = Lemon;
    let grid = Grid::from_kinds(kinds);
    let before = grid.column(4).unwrap();
    let matched = find_matches(&grid);
    assert!(matched.contains(id_at(2, 4)));
    assert!(matched.contains(id_at(5, 4)));
    assert_eq!(matched.len(), 6);

    let mut resolver = Resolver::with_grid(config, 5, grid).unwrap();
    assert!(resolver.resolve_existing());
    // Clear, then remove + gravity + refill
    assert!(resolver.advance());

    let after = resolver.grid().column(4).unwrap();
    let survivors = [before[0], before[1], before[3], before[4], before[6], before[7]];
    assert_eq!(&after[2..], &survivors);
    for token in &after[..2] {
        assert!(token.id > TokenId(63), "refill reused id {:?}", token.id);
    }
    assert_ne!(after[0].id, after[1].id);
}

#[test]
fn test_cascade_runs_second_pass() {
    let config = EngineConfig::instant();
    let resolver = Resolver::with_grid(config, 21, Grid::from_kinds(cascade_board())).unwrap();
    let mut session = Session::from_resolver(resolver);

    assert!(session.apply_action(GameAction::Pick(Position::new(5, 2))));
    assert!(session.apply_action(GameAction::Pick(Position::new(5, 3))));

    let mut steps = 0;
    while !session.resolver().is_idle() {
        session.tick(16);
        steps += 1;
        assert!(steps < 200, "cascade did not settle");
    }

    let events = session.drain_events();
    let clears = cleared(&events);
    assert!(clears.len() >= 2, "expected a second pass, got {:?}", clears);
    assert_eq!(clears[0], (1, 3, 30));
    assert_eq!(clears[1].0, 2);
    assert!(clears[1].1 >= 3);

    let total: u32 = clears.iter().map(|c| c.2).sum();
    assert_eq!(session.score(), total);
    assert!(session.score() >= 60);

    // The three Apples from column 0 went in pass two
    for id in [id_at(4, 0), id_at(6, 0), id_at(7, 0)] {
        assert_eq!(session.resolver().grid().position_of(id), None);
    }
    assert!(matches!(events.last(), Some(EngineEvent::Settled { .. })));
    assert!(find_matches(session.resolver().grid()).is_empty());
}

#[test]
fn test_countdown_expiry_waits_for_cascade() {
    let config = EngineConfig::default().with_game_duration_secs(1);
    let resolver = Resolver::with_grid(config, 3, Grid::from_kinds(cascade_board())).unwrap();
    let mut session = Session::from_resolver(resolver);

    session.pick(Position::new(5, 2));
    session.pick(Position::new(5, 3));

    // One long tick: the swap window closes and the countdown hits zero
    session.tick(1000);
    assert_eq!(session.time_left(), 0);
    assert!(!session.is_game_over());
    assert_eq!(session.resolver().lifecycle(), Lifecycle::Expiring);

    // Input is refused while the cascade finishes
    assert_eq!(session.pick(Position::new(0, 0)), PickOutcome::Ignored);

    let mut steps = 0;
    while !session.is_game_over() {
        session.tick(100);
        steps += 1;
        assert!(steps < 500, "cascade did not settle");
    }

    let events = session.drain_events();
    assert_eq!(events.last(), Some(&EngineEvent::GameOver));
    assert!(cleared(&events).len() >= 2);
    assert!(session.score() >= 60);

    assert_eq!(session.pick(Position::new(0, 0)), PickOutcome::Ignored);
    assert!(!session.apply_action(GameAction::Pick(Position::new(0, 1))));

    session.apply_action(GameAction::Restart);
    assert!(!session.is_game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.time_left(), 1);
}
