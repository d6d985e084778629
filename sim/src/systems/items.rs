use bevy_ecs::prelude::*;
use spotlight_common::PursuitEngine;
use tracing::info;

use crate::{
    constants::ITEM_COLLECTION_RADIUS,
    resources::{GameSession, GameState, Items, ScriptedPlayer},
};

// ============================================================================
// Item Collection System
// ============================================================================

// Each collected item raises the spotlight's difficulty tier to the number of
// items taken so far. Taking the last one wins the session.
pub fn item_collection_system(
    mut session: ResMut<GameSession>,
    mut items: ResMut<Items>,
    player: Res<ScriptedPlayer>,
    mut engine: ResMut<PursuitEngine>,
) {
    if session.state != GameState::Playing {
        return;
    }

    if items.collect_near(player.position, ITEM_COLLECTION_RADIUS) == 0 {
        return;
    }

    let collected = items.collected_count();
    info!("item collected ({}/{})", collected, items.len());
    let _ = engine.set_difficulty(collected as u32);

    if items.all_collected() {
        session.wins += 1;
        session.enter(GameState::Win);
    }
}
