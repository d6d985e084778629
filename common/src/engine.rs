use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use tracing::{debug, info, trace, warn};

use crate::{
    agent::{Agent, clamp_cone_half_angle},
    alert::{AlertMachine, AlertSignal, AlertState, AlertThresholds},
    config::SpotlightConfig,
    detection::{self, DetectionResult},
    difficulty::{self, DifficultyTier, ParameterOverride},
    events::{EventBus, PlayerCaptured, PlayerDetected, PlayerEscaped, PursuitEvent},
    geometry::OcclusionQuery,
    patrol::PatrolRoute,
};

// ============================================================================
// Player Collaborator
// ============================================================================

// What the engine needs from the player controller.
pub trait PlayerLink {
    fn position(&self) -> Vec3;

    // Not used by detection; available to callers that want it.
    fn facing(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    fn set_illuminated(&mut self, illuminated: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionMode {
    Patrol,
    Chase,
}

// Summary of one tick, for callers that poll instead of subscribing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub detection: Option<DetectionResult>,
    pub mode: LocomotionMode,
    pub state: AlertState,
    pub events: usize,
}

// ============================================================================
// Pursuit Engine
// ============================================================================

/// The spotlight, its patrol loop, its alert state and its event bus.
///
/// [`PursuitEngine::tick`] runs one frame in a fixed order: locomotion,
/// detection at the post-move position, alert transitions, then side effects
/// (illumination flag and queued events).
#[derive(Resource, Debug)]
pub struct PursuitEngine {
    config: SpotlightConfig,
    agent: Agent,
    route: PatrolRoute,
    alert: AlertMachine,
    tier: DifficultyTier,
    overrides: ParameterOverride,
    active: bool,
    last_detection: Option<DetectionResult>,
    bus: EventBus,
}

impl PursuitEngine {
    #[must_use]
    pub fn new(config: SpotlightConfig) -> Self {
        let config = config.sanitized();
        let agent = Agent::new(&config);
        let route = build_route(&config);
        let alert = AlertMachine::new(AlertThresholds::from(&config));

        info!(
            "spotlight at {:?}, {} patrol waypoints, cone {:.3} rad",
            agent.position,
            route.points().len(),
            agent.cone_half_angle
        );

        Self {
            config,
            agent,
            route,
            alert,
            tier: DifficultyTier::BASELINE,
            overrides: ParameterOverride::BASELINE,
            active: true,
            last_detection: None,
            bus: EventBus::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------------

    pub fn tick<P, Q>(&mut self, dt: f32, player: &mut P, occluders: &Q) -> TickReport
    where
        P: PlayerLink + ?Sized,
        Q: OcclusionQuery + ?Sized,
    {
        let dt = sanitize_delta(dt, self.config.max_step);

        if !self.active {
            player.set_illuminated(false);
            return TickReport {
                detection: None,
                mode: self.locomotion_mode(),
                state: self.alert.state(),
                events: 0,
            };
        }

        let player_position = player.position();

        // 1. Locomotion
        let mode = self.locomotion_mode();
        match mode {
            LocomotionMode::Patrol => self.route.tick(&mut self.agent, dt),
            LocomotionMode::Chase => {
                let target = self.agent.mounted(player_position);
                let params = self.agent.chase_params();
                self.agent.steer_toward(target, params, dt);
            }
        }

        // 2. Detection at the post-move position
        let detection = detection::evaluate(&self.agent, player_position, occluders, self.config.occlusion_epsilon);
        trace!(
            "sight {:?} at {:.2}m, angle {:.3}",
            detection.outcome, detection.distance, detection.angle
        );

        // 3. Alert transitions
        let signals = self.alert.step(detection.visible, dt);
        for signal in signals {
            let event = self.event_for(signal, player_position);
            self.bus.enqueue(event);
        }

        // 4. Side effects
        player.set_illuminated(detection.visible);
        let events = self.bus.flush();
        self.last_detection = Some(detection);

        TickReport {
            detection: Some(detection),
            mode: self.locomotion_mode(),
            state: self.alert.state(),
            events,
        }
    }

    fn event_for(&self, signal: AlertSignal, player_position: Vec3) -> PursuitEvent {
        let light_position = self.agent.position;
        match signal {
            AlertSignal::Detected => PursuitEvent::PlayerDetected(PlayerDetected {
                light_position,
                player_position,
                detection_time: self.alert.detection_timer(),
            }),
            AlertSignal::Escaped => PursuitEvent::PlayerEscaped(PlayerEscaped {
                light_position,
                player_position,
            }),
            AlertSignal::Captured => PursuitEvent::PlayerCaptured(PlayerCaptured {
                light_position,
                player_position,
                detection_time: self.alert.detection_timer(),
            }),
        }
    }

    // ------------------------------------------------------------------------
    // Session control
    // ------------------------------------------------------------------------

    // Full restart in one step: timers, alert state, patrol index, difficulty,
    // light position. Subscriptions survive; undelivered events do not.
    pub fn reset(&mut self) {
        self.alert.reset();
        self.route.rewind();
        self.tier = DifficultyTier::BASELINE;
        self.overrides = ParameterOverride::BASELINE;
        self.apply_overrides();
        self.agent.position = self.config.start_position();
        self.agent.velocity = Vec3::ZERO;
        self.last_detection = None;
        self.bus.discard_queued();
        info!("pursuit engine reset");
    }

    pub fn activate(&mut self) {
        if !self.active {
            info!("spotlight activated");
        }
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    // ------------------------------------------------------------------------
    // Difficulty
    // ------------------------------------------------------------------------

    // Returns false when the (clamped) tier is already in effect.
    pub fn set_difficulty(&mut self, tier: impl Into<DifficultyTier>) -> bool {
        let requested = tier.into();
        let tier = requested.clamped();
        if requested != tier {
            debug!("difficulty tier {} clamped to {}", requested.0, tier.0);
        }
        if tier == self.tier {
            return false;
        }

        self.tier = tier;
        self.overrides = difficulty::apply(tier);
        self.apply_overrides();

        info!(
            "difficulty tier {}: patrol speed {:.2}, cone {:.3} rad, forced chase {}",
            tier.0, self.agent.patrol_speed, self.agent.cone_half_angle, self.overrides.force_chase
        );
        true
    }

    fn apply_overrides(&mut self) {
        self.agent.patrol_speed = self.agent.base_patrol_speed() * self.overrides.speed_multiplier;
        self.agent.cone_half_angle =
            clamp_cone_half_angle(self.agent.base_cone_half_angle() * self.overrides.cone_angle_multiplier);
    }

    #[must_use]
    pub const fn difficulty(&self) -> DifficultyTier {
        self.tier
    }

    #[must_use]
    pub const fn overrides(&self) -> ParameterOverride {
        self.overrides
    }

    // ------------------------------------------------------------------------
    // Runtime tuning
    // ------------------------------------------------------------------------

    pub fn set_patrol_points(&mut self, points: &[[f32; 2]]) {
        let height = self.agent.mount_height();
        let waypoints: Vec<Vec3> = points.iter().map(|[x, z]| Vec3::new(*x, height, *z)).collect();
        if !self.route.set_points(waypoints) {
            warn!("ignoring empty patrol route");
        }
    }

    pub fn set_patrol_speed(&mut self, speed: f32) {
        self.agent.set_base_patrol_speed(speed);
        self.apply_overrides();
    }

    pub fn set_chase_speed(&mut self, speed: f32) {
        self.agent.chase_speed = speed.max(0.0);
    }

    pub fn set_cone_half_angle(&mut self, angle: f32) {
        self.agent.set_base_cone_half_angle(angle);
        self.apply_overrides();
    }

    pub fn set_position(&mut self, x: f32, z: f32) {
        self.agent.position = self.agent.mounted(Vec3::new(x, 0.0, z));
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    #[must_use]
    pub const fn locomotion_mode(&self) -> LocomotionMode {
        if self.overrides.force_chase || self.alert.state().is_alerted() {
            LocomotionMode::Chase
        } else {
            LocomotionMode::Patrol
        }
    }

    #[must_use]
    pub const fn alert_state(&self) -> AlertState {
        self.alert.state()
    }

    #[must_use]
    pub const fn alert(&self) -> &AlertMachine {
        &self.alert
    }

    #[must_use]
    pub const fn is_captured(&self) -> bool {
        self.alert.is_captured()
    }

    #[must_use]
    pub fn detection_progress(&self) -> f32 {
        self.alert.detection_progress()
    }

    #[must_use]
    pub const fn light_color(&self) -> u32 {
        if self.alert.state().is_alerted() {
            self.config.alert_color
        } else {
            self.config.normal_color
        }
    }

    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub const fn route(&self) -> &PatrolRoute {
        &self.route
    }

    #[must_use]
    pub const fn config(&self) -> &SpotlightConfig {
        &self.config
    }

    #[must_use]
    pub const fn last_detection(&self) -> Option<DetectionResult> {
        self.last_detection
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.bus
    }
}

impl Default for PursuitEngine {
    fn default() -> Self {
        Self::new(SpotlightConfig::default())
    }
}

fn build_route(config: &SpotlightConfig) -> PatrolRoute {
    let threshold = config.arrival_threshold;
    PatrolRoute::new(config.patrol_waypoints(), threshold)
        .unwrap_or_else(|| PatrolRoute::around(config.start_position(), threshold))
}

// Negative or non-finite frame deltas count as a zero-length frame; long ones
// are cut to `max_step` so one stall cannot throw the light off the map.
fn sanitize_delta(dt: f32, max_step: f32) -> f32 {
    if !(dt.is_finite() && dt >= 0.0) {
        warn!("invalid frame delta {dt}, treating as 0");
        return 0.0;
    }
    if dt > max_step {
        debug!("frame delta {dt} capped to {max_step}");
        return max_step;
    }
    dt
}
