//! One atomic simulation tick
//!
//! A tick applies fully or not at all: the script violation path touches
//! neither grid nor cache, and the in-flight guard rejects a second trigger
//! arriving from inside the script callback.

use crate::core::error::EngineError;
use crate::domain::cells::Cell;
use crate::systems::movement::{self, Command, GravityDirection};

use super::{ScriptRunner, SessionCore, TickOutcome};

pub(super) fn tick(
    session: &mut SessionCore,
    runner: &mut dyn ScriptRunner,
) -> Result<TickOutcome, EngineError> {
    if session.in_tick {
        return Err(EngineError::TickInProgress);
    }
    if session.is_over() {
        return Err(EngineError::SessionOver);
    }

    session.in_tick = true;
    let result = run(session, runner);
    session.in_tick = false;
    result
}

fn run(session: &mut SessionCore, runner: &mut dyn ScriptRunner) -> Result<TickOutcome, EngineError> {
    if session.first_tick {
        // The loader already checked this; a live session must never lose
        // its player, so treat a miss as fatal rather than recoverable.
        if session.grid.player_count() != 1 {
            return Err(EngineError::NoPlayerFound);
        }
        session.first_tick = false;
    }

    let view = session.player_view();

    let reply = match runner.invoke(&view, session.cache.clone()) {
        Ok(reply) => reply,
        Err(msg) => {
            session
                .diagnostics
                .push(format!("script raised during invocation: {}", msg));
            session.tick_count += 1;
            return Ok(TickOutcome::Continuing);
        }
    };

    let command = match Command::from_response(reply.response) {
        Some(command) => command,
        None => {
            session.diagnostics.push(format!(
                "script returned out-of-range response {}",
                reply.response
            ));
            session.tick_count += 1;
            return Ok(TickOutcome::Continuing);
        }
    };

    // Reply accepted: the cache updates even when the move resolves to a
    // no-op, because the script already ran with the old cache.
    session.cache = reply.cached_data;
    session.last_command = Some(command);

    let resolution =
        movement::advance(&mut session.grid, session.position, session.gravity, command)?;
    session.position = resolution.position;

    let mut outcome = TickOutcome::Continuing;
    if let Some(entered) = resolution.entered {
        if let Some(direction) = GravityDirection::from_arrow(entered) {
            // Takes effect from the next tick; no same-tick re-fall in the
            // new orientation.
            session.gravity = direction;
        }
        outcome = match entered {
            Cell::Finish => TickOutcome::Success,
            Cell::Kill => TickOutcome::Failure,
            _ => TickOutcome::Continuing,
        };
    }

    session.outcome = outcome;
    session.tick_count += 1;
    Ok(outcome)
}
