use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use rand::{SeedableRng, rngs::StdRng};
use spotlight_common::{PlayerLink, PursuitEvent, geometry::horizontal_distance};
use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};
use tracing::info;

use crate::constants::{PLAYER_EYE_HEIGHT, PLAYER_START};

// ============================================================================
// Scripted Player
// ============================================================================

// Stand-in for a human player. With `autopilot` off it stays wherever it is
// put.
#[derive(Resource, Debug, Clone)]
pub struct ScriptedPlayer {
    pub position: Vec3,
    pub illuminated: bool,
    pub autopilot: bool,
    pub pause_timer: f32,
    // Frames spent in the light this session
    pub lit_frames: u64,
}

impl ScriptedPlayer {
    #[must_use]
    pub const fn start_position() -> Vec3 {
        Vec3::new(PLAYER_START[0], PLAYER_EYE_HEIGHT, PLAYER_START[1])
    }

    pub const fn reset(&mut self) {
        self.position = Self::start_position();
        self.illuminated = false;
        self.pause_timer = 0.0;
        self.lit_frames = 0;
    }
}

impl Default for ScriptedPlayer {
    fn default() -> Self {
        Self {
            position: Self::start_position(),
            illuminated: false,
            autopilot: true,
            pause_timer: 0.0,
            lit_frames: 0,
        }
    }
}

impl PlayerLink for ScriptedPlayer {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_illuminated(&mut self, illuminated: bool) {
        self.illuminated = illuminated;
        if illuminated {
            self.lit_frames += 1;
        }
    }
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub position: Vec3,
    pub collected: bool,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Items(pub Vec<Item>);

impl Items {
    #[must_use]
    pub fn new(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self(
            positions
                .into_iter()
                .map(|position| Item {
                    position,
                    collected: false,
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn collected_count(&self) -> usize {
        self.0.iter().filter(|item| item.collected).count()
    }

    #[must_use]
    pub fn all_collected(&self) -> bool {
        self.0.iter().all(|item| item.collected)
    }

    // Closest item still on the floor, measured in the horizontal plane.
    #[must_use]
    pub fn nearest_uncollected(&self, from: Vec3) -> Option<Vec3> {
        self.0
            .iter()
            .filter(|item| !item.collected)
            .map(|item| item.position)
            .min_by(|a, b| horizontal_distance(from, *a).total_cmp(&horizontal_distance(from, *b)))
    }

    // Mark every uncollected item within `radius`; returns how many were taken.
    pub fn collect_near(&mut self, position: Vec3, radius: f32) -> usize {
        let mut taken = 0;
        for item in self.0.iter_mut().filter(|item| !item.collected) {
            if horizontal_distance(position, item.position) <= radius {
                item.collected = true;
                taken += 1;
            }
        }
        taken
    }

    pub fn reset(&mut self) {
        for item in &mut self.0 {
            item.collected = false;
        }
    }
}

// ============================================================================
// Game Session
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Intro,
    Playing,
    Caught,
    GameOver,
    Win,
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub state: GameState,
    pub state_time: f32,
    pub restarts_left: u32,
    pub sessions: u32,
    pub detections: u32,
    pub escapes: u32,
    pub captures: u32,
    pub wins: u32,
    pub finished: bool,
}

impl GameSession {
    #[must_use]
    pub const fn new(restarts: u32) -> Self {
        Self {
            state: GameState::Intro,
            state_time: 0.0,
            restarts_left: restarts,
            sessions: 1,
            detections: 0,
            escapes: 0,
            captures: 0,
            wins: 0,
            finished: false,
        }
    }

    pub fn enter(&mut self, state: GameState) {
        info!("session {}: {:?} -> {:?}", self.sessions, self.state, state);
        self.state = state;
        self.state_time = 0.0;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(0)
    }
}

// ============================================================================
// Randomness and Channels
// ============================================================================

#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl SimRng {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64))
    }
}

// Resource wrapper for the channel the engine's event listeners feed.
#[derive(Resource)]
pub struct EventInbox(UnboundedReceiver<PursuitEvent>);

impl EventInbox {
    #[must_use]
    pub const fn new(receiver: UnboundedReceiver<PursuitEvent>) -> Self {
        Self(receiver)
    }

    pub fn try_recv(&mut self) -> Result<PursuitEvent, TryRecvError> {
        self.0.try_recv()
    }
}
