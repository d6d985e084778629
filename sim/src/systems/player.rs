use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_time::Time;
use rand::Rng as _;
use spotlight_common::geometry::horizontal_distance;
use tracing::debug;

use crate::{
    constants::*,
    map::clamp_to_floor,
    resources::{GameSession, GameState, Items, ScriptedPlayer, SimRng},
};

const WALL_MARGIN: f32 = 0.3;

// ============================================================================
// Player Movement System
// ============================================================================

// Walk toward the nearest item with some sideways wobble, stopping now and
// then for a random pause.
pub fn player_movement_system(
    time: Res<Time>,
    session: Res<GameSession>,
    items: Res<Items>,
    mut player: ResMut<ScriptedPlayer>,
    mut rng: ResMut<SimRng>,
) {
    if session.state != GameState::Playing || !player.autopilot {
        return;
    }

    let delta = time.delta_secs();

    if player.pause_timer > 0.0 {
        player.pause_timer = (player.pause_timer - delta).max(0.0);
        return;
    }

    let Some(target) = items.nearest_uncollected(player.position) else {
        return;
    };

    if rng.0.random_bool(PLAYER_PAUSE_CHANCE) {
        player.pause_timer = rng.0.random_range(PLAYER_PAUSE_MIN..=PLAYER_PAUSE_MAX);
        debug!("player pausing for {:.1}s at {:?}", player.pause_timer, player.position);
        return;
    }

    let heading = (target - player.position).with_y(0.0).normalize_or_zero();
    let side = Vec3::new(-heading.z, 0.0, heading.x);
    let wobble = rng.0.random_range(-PLAYER_JITTER..=PLAYER_JITTER);

    // Never step past the item
    let remaining = horizontal_distance(player.position, target);
    let step = ((heading + side * wobble).normalize_or_zero() * PLAYER_WALK_SPEED * delta).clamp_length_max(remaining);

    player.position = clamp_to_floor(player.position + step, WALL_MARGIN);
}
