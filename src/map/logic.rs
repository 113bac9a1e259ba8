//! Position bookkeeping on the session state.

use std::borrow::Cow;

use rand::Rng;
use tracing::debug;

use super::events::{generate_area_events, generate_upcoming_events};
use super::types::UpcomingEvent;
use crate::core::game_state::GameState;
use crate::rules::GameRules;

/// Moves one step forward and refreshes the lookahead from the unchanged
/// area events. No-op on the last step.
pub fn advance_step(state: &GameState) -> Cow<'_, GameState> {
    if state.is_last_step() {
        return Cow::Borrowed(state);
    }

    let step = state.current_step + 1;
    Cow::Owned(GameState {
        current_step: step,
        upcoming_events: generate_upcoming_events(&state.area_events, step),
        ..state.clone()
    })
}

/// Enters the next area with a freshly rolled event sequence.
///
/// The map is linear: the final area has no successor and is left unchanged.
pub fn advance_area<'a>(
    state: &'a GameState,
    rules: &GameRules,
    rng: &mut impl Rng,
) -> Cow<'a, GameState> {
    if rules.is_final_area(state.current_area) {
        return Cow::Borrowed(state);
    }

    let area = state.current_area + 1;
    let area_events = generate_area_events(rules, area, rng);
    debug!(area, "entering area");
    Cow::Owned(GameState {
        current_area: area,
        current_step: 1,
        upcoming_events: generate_upcoming_events(&area_events, 1),
        area_events,
        ..state.clone()
    })
}

/// The committed event on the current step.
pub fn current_event(state: &GameState) -> Option<UpcomingEvent> {
    let index = state.current_step.checked_sub(1)? as usize;
    state.area_events.get(index).copied()
}
