use bevy_ecs::prelude::*;
use bevy_time::Time;
use spotlight_common::PursuitEngine;
use tracing::info;

use crate::{
    constants::{CAUGHT_DURATION, INTRO_DURATION, SPOTLIGHT_ACTIVATION_DELAY},
    resources::{GameSession, GameState, Items, ScriptedPlayer},
};

// ============================================================================
// Session Timer System
// ============================================================================

pub fn session_timer_system(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut engine: ResMut<PursuitEngine>,
    mut player: ResMut<ScriptedPlayer>,
    mut items: ResMut<Items>,
) {
    session.state_time += time.delta_secs();

    match session.state {
        GameState::Intro => {
            if session.state_time >= INTRO_DURATION {
                session.enter(GameState::Playing);
            }
        }
        GameState::Playing => {
            if !engine.is_active() && session.state_time >= SPOTLIGHT_ACTIVATION_DELAY {
                engine.activate();
            }
        }
        GameState::Caught => {
            if session.state_time >= CAUGHT_DURATION {
                session.enter(GameState::GameOver);
            }
        }
        GameState::GameOver | GameState::Win => {
            if session.finished {
                return;
            }
            if session.restarts_left == 0 {
                session.finished = true;
                info!(
                    "simulation finished: {} sessions, {} captures, {} wins",
                    session.sessions, session.captures, session.wins
                );
                return;
            }

            session.restarts_left -= 1;
            session.sessions += 1;
            restart(&mut engine, &mut player, &mut items);
            session.enter(GameState::Intro);
        }
    }
}

// Back to the start of a session: light dark and parked, player at the
// entrance, every item back on the floor.
pub fn restart(engine: &mut PursuitEngine, player: &mut ScriptedPlayer, items: &mut Items) {
    engine.reset();
    engine.deactivate();
    player.reset();
    items.reset();
}
