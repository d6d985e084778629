use bevy_ecs::prelude::*;
use bevy_time::Time;
use spotlight_common::{OccluderSet, PursuitEngine, PursuitEvent};
use tracing::{info, trace};

use crate::resources::{EventInbox, GameSession, GameState, ScriptedPlayer};

// ============================================================================
// Pursuit Systems
// ============================================================================

// Advance the spotlight one frame. Only runs while the session is in play.
pub fn pursuit_tick_system(
    time: Res<Time>,
    session: Res<GameSession>,
    mut engine: ResMut<PursuitEngine>,
    mut player: ResMut<ScriptedPlayer>,
    occluders: Res<OccluderSet>,
) {
    if session.state != GameState::Playing {
        return;
    }

    let report = engine.tick(time.delta_secs(), &mut *player, &*occluders);
    trace!(
        "spotlight {:?} {:?}, progress {:.2}",
        report.mode,
        report.state,
        engine.detection_progress()
    );
}

// Drain the events the engine delivered this frame and move the session on.
pub fn pursuit_event_system(mut inbox: ResMut<EventInbox>, mut session: ResMut<GameSession>) {
    while let Ok(event) = inbox.try_recv() {
        match event {
            PursuitEvent::PlayerDetected(detected) => {
                session.detections += 1;
                info!(
                    "player detected at {:?} after {:.2}s",
                    detected.player_position, detected.detection_time
                );
            }
            PursuitEvent::PlayerEscaped(escaped) => {
                session.escapes += 1;
                info!("player escaped at {:?}", escaped.player_position);
            }
            PursuitEvent::PlayerCaptured(captured) => {
                session.captures += 1;
                info!(
                    "player captured at {:?} by light at {:?}",
                    captured.player_position, captured.light_position
                );
                if session.state == GameState::Playing {
                    session.enter(GameState::Caught);
                }
            }
        }
    }
}
