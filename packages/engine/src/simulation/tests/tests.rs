use super::*;
use crate::systems::movement::{self, MoveKind};

fn grid_of(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|t| Cell::from_token(t).unwrap()).collect())
            .collect(),
    )
    .unwrap()
}

fn always(response: i64) -> impl FnMut(&[Vec<Cell>], ScriptCache) -> Result<ScriptReply, String> {
    move |_view, cache| {
        Ok(ScriptReply {
            response,
            cached_data: cache,
        })
    }
}

#[test]
fn session_requires_a_player_cell() {
    let grid = grid_of(&[&["a", "b"], &["a", "a"]]);
    assert!(matches!(
        SessionCore::new(grid),
        Err(EngineError::NoPlayerFound)
    ));
}

#[test]
fn free_fall_relocates_full_run_then_rests() {
    let grid = grid_of(&[
        &["b", "p", "b"],
        &["b", "a", "b"],
        &["b", "a", "b"],
        &["b", "a", "b"],
        &["b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();
    let mut script = always(2);

    let outcome = session.tick(&mut script).unwrap();
    assert_eq!(outcome, TickOutcome::Continuing);
    assert_eq!(session.position(), Position::new(3, 1));
    assert_eq!(session.grid().at(0, 1), Some(Cell::Air));
    assert_eq!(session.grid().at(3, 1), Some(Cell::Player));

    // Now resting on the barrier: no further vertical movement.
    let outcome = session.tick(&mut script).unwrap();
    assert_eq!(outcome, TickOutcome::Continuing);
    assert_eq!(session.position(), Position::new(3, 1));
    assert_eq!(session.tick_count(), 2);
}

#[test]
fn gravity_arrow_reorients_the_next_fall() {
    let grid = grid_of(&[
        &["b", "b", "b", "b", "b"],
        &["b", "p", "g→", "a", "b"],
        &["b", "b", "b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();

    // Step onto the arrow: gravity flips to Right for subsequent ticks.
    let outcome = session.tick(&mut always(1)).unwrap();
    assert_eq!(outcome, TickOutcome::Continuing);
    assert_eq!(session.gravity(), GravityDirection::Right);
    assert_eq!(session.position(), Position::new(1, 2));

    // Next tick the fall axis is Right: the player drops into the air cell.
    let outcome = session.tick(&mut always(1)).unwrap();
    assert_eq!(outcome, TickOutcome::Continuing);
    assert_eq!(session.position(), Position::new(1, 3));
}

#[test]
fn finish_yields_success_with_mutation_applied() {
    let grid = grid_of(&[
        &["b", "b", "b", "b"],
        &["b", "p", "f", "b"],
        &["b", "b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();

    let outcome = session.tick(&mut always(1)).unwrap();
    assert_eq!(outcome, TickOutcome::Success);
    // The relocation is applied before the outcome is reported.
    assert_eq!(session.grid().at(1, 1), Some(Cell::Air));
    assert_eq!(session.grid().at(1, 2), Some(Cell::Player));
    assert!(session.is_over());

    // A terminal session rejects further ticks.
    assert!(matches!(
        session.tick(&mut always(1)),
        Err(EngineError::SessionOver)
    ));
}

#[test]
fn kill_yields_failure() {
    let grid = grid_of(&[
        &["b", "b", "b", "b"],
        &["b", "p", "k", "b"],
        &["b", "b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();

    let outcome = session.tick(&mut always(1)).unwrap();
    assert_eq!(outcome, TickOutcome::Failure);
    assert_eq!(session.grid().at(1, 2), Some(Cell::Player));
    assert!(session.is_over());
}

#[test]
fn out_of_range_response_is_a_noop_with_diagnostic() {
    let grid = grid_of(&[
        &["b", "b", "b"],
        &["b", "p", "b"],
        &["b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();
    let before = session.grid().clone();

    let outcome = session.tick(&mut always(9)).unwrap();
    assert_eq!(outcome, TickOutcome::Continuing);
    assert_eq!(session.grid(), &before);
    assert_eq!(session.last_command(), None);
    assert_eq!(session.tick_count(), 1);

    let diagnostics = session.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("out-of-range"));
    assert!(session.take_diagnostics().is_empty());
}

#[test]
fn script_error_recovers_as_a_noop() {
    let grid = grid_of(&[
        &["b", "b", "b"],
        &["b", "p", "b"],
        &["b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();
    let mut script = |_view: &[Vec<Cell>], _cache: ScriptCache| -> Result<ScriptReply, String> {
        Err("boom".to_string())
    };

    let outcome = session.tick(&mut script).unwrap();
    assert_eq!(outcome, TickOutcome::Continuing);
    let diagnostics = session.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("boom"));
}

#[test]
fn cache_threads_through_accepted_ticks_only() {
    let grid = grid_of(&[
        &["b", "b", "b", "b", "b"],
        &["b", "p", "a", "a", "b"],
        &["b", "b", "b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();
    let mut counting = |_view: &[Vec<Cell>], cache: ScriptCache| -> Result<ScriptReply, String> {
        let n = cache.as_u64().unwrap_or(0);
        Ok(ScriptReply {
            response: 1,
            cached_data: ScriptCache::from(n + 1),
        })
    };

    session.tick(&mut counting).unwrap();
    session.tick(&mut counting).unwrap();
    assert_eq!(session.cache().as_u64(), Some(2));
    assert_eq!(session.last_command(), Some(Command::Right));

    // A violating tick leaves the cache alone.
    session.tick(&mut always(42)).unwrap();
    assert_eq!(session.cache().as_u64(), Some(2));
}

#[test]
fn script_view_is_windowed_and_fogged() {
    // Finish sits behind a barrier: in-window but not visible, so the
    // script must see Unknown there.
    let grid = grid_of(&[
        &["b", "b", "b", "b", "b", "b", "b"],
        &["b", "p", "b", "f", "a", "a", "b"],
        &["b", "b", "b", "b", "b", "b", "b"],
    ]);
    let mut session = SessionCore::new(grid).unwrap();

    let mut seen: Vec<Vec<Vec<Cell>>> = Vec::new();
    let mut script = |view: &[Vec<Cell>], cache: ScriptCache| -> Result<ScriptReply, String> {
        seen.push(view.to_vec());
        Ok(ScriptReply {
            response: 0,
            cached_data: cache,
        })
    };
    session.tick(&mut script).unwrap();

    let view = &seen[0];
    assert_eq!(view.len(), 7);
    assert_eq!(view[3][3], Cell::Player);
    // The wall itself is visible...
    assert_eq!(view[3][4], Cell::Barrier);
    // ...the finish behind it is fog.
    assert_eq!(view[3][5], Cell::Unknown);
    // Cells above the world edge pad with Unknown.
    assert_eq!(view[0][3], Cell::Unknown);
}

#[test]
fn builtin_session_and_default_settings() {
    let session = SessionCore::builtin_level(0).unwrap();
    assert_eq!((session.width(), session.height()), (9, 4));
    assert_eq!(session.gravity(), GravityDirection::Down);
    assert_eq!(session.settings().view_radius, DEFAULT_VIEW_RADIUS);
    assert_eq!(session.tick_count(), 0);
    assert!(!session.is_over());

    assert!(SessionCore::builtin_level(99).is_err());
}

#[test]
fn lateral_step_resolution_matches_movement_kind() {
    let mut grid = grid_of(&[
        &["b", "b", "b", "b"],
        &["b", "p", "a", "b"],
        &["b", "b", "b", "b"],
    ]);
    let pos = grid.find_player().unwrap();
    let res =
        movement::advance(&mut grid, pos, GravityDirection::Down, Command::Right).unwrap();
    assert_eq!(res.kind, MoveKind::Lateral);
}
