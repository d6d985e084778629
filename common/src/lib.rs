//! Spotlight pursuit and detection engine.
//!
//! A light mounted above the scene patrols a waypoint loop, lights the player
//! when they stand inside its cone with a clear line of sight, and escalates
//! from patrol to pursuit to capture. Everything advances through
//! [`PursuitEngine::tick`], once per frame.

pub mod agent;
pub mod alert;
pub mod config;
pub mod constants;
pub mod detection;
pub mod difficulty;
pub mod engine;
pub mod events;
pub mod geometry;
pub mod patrol;
pub mod steering;

pub use agent::Agent;
pub use alert::{AlertMachine, AlertSignal, AlertState, AlertThresholds};
pub use config::SpotlightConfig;
pub use detection::{DetectionResult, SightOutcome};
pub use difficulty::{DifficultyTier, ParameterOverride};
pub use engine::{LocomotionMode, PlayerLink, PursuitEngine, TickReport};
pub use events::{EventBus, EventKind, PursuitEvent, SubscriptionId};
pub use geometry::{OcclusionQuery, Occluder, OccluderSet};
