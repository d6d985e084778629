//! Headless driver for the spotlight engine: a fallback map, a scripted
//! player, three items and the intro/play/caught/game-over session loop.

pub mod config;
pub mod constants;
pub mod map;
pub mod resources;
pub mod systems;

use bevy_ecs::prelude::*;
use bevy_time::Time;
use spotlight_common::{OccluderSet, PursuitEngine, SpotlightConfig};
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{info, warn};

use crate::{
    constants::MAX_FRAME_DELTA,
    map::{fallback_occluders, item_positions},
    resources::{EventInbox, GameSession, Items, ScriptedPlayer, SimRng},
    systems::*,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SimOptions {
    pub seed: Option<u64>,
    pub restarts: u32,
}

// ============================================================================
// Simulation
// ============================================================================

pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    #[must_use]
    pub fn new(config: SpotlightConfig, options: SimOptions) -> Self {
        Self::with_occluders(config, options, fallback_occluders())
    }

    #[must_use]
    pub fn with_occluders(config: SpotlightConfig, options: SimOptions, occluders: OccluderSet) -> Self {
        let mut engine = PursuitEngine::new(config);
        // Dark until the session has been playing for a moment
        engine.deactivate();

        // Engine listeners run inside the tick; hand the events to a system
        let (to_inbox, from_engine) = unbounded_channel();
        let _ = engine.events().subscribe_all(move |event| {
            let _ = to_inbox.send(*event);
        });

        info!("map has {} occluders", occluders.len());

        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.insert_resource(engine);
        world.insert_resource(occluders);
        world.insert_resource(ScriptedPlayer::default());
        world.insert_resource(Items::new(item_positions()));
        world.insert_resource(GameSession::new(options.restarts));
        world.insert_resource(SimRng::new(options.seed));
        world.insert_resource(EventInbox::new(from_engine));

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                // Session timers first so state changes apply this frame
                session_timer_system,
                player_movement_system,
                item_collection_system,
                pursuit_tick_system,
                pursuit_event_system,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    // Run one frame. The delta is clamped to `MAX_FRAME_DELTA` so a stall does
    // not turn into one huge step.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            warn!("non-finite frame delta {dt}, using 0");
            0.0
        };

        self.world.resource_mut::<Time>().advance_by(Duration::from_secs_f32(dt));
        self.schedule.run(&mut self.world);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session().finished
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    #[must_use]
    pub fn engine(&self) -> &PursuitEngine {
        self.world.resource::<PursuitEngine>()
    }

    #[must_use]
    pub fn player(&self) -> &ScriptedPlayer {
        self.world.resource::<ScriptedPlayer>()
    }

    #[must_use]
    pub fn items(&self) -> &Items {
        self.world.resource::<Items>()
    }

    pub const fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
