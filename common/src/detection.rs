use bevy_math::Vec3;

use crate::{
    agent::Agent,
    geometry::{OcclusionQuery, angle_between},
};

// ============================================================================
// Detection Engine
// ============================================================================

// Why the player is or is not lit this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SightOutcome {
    Visible,
    OutOfRange,
    OutsideCone,
    Occluded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionResult {
    pub visible: bool,
    pub distance: f32,
    // Angle between the light's facing and the direction to the player (radians)
    pub angle: f32,
    pub outcome: SightOutcome,
}

impl DetectionResult {
    const fn new(outcome: SightOutcome, distance: f32, angle: f32) -> Self {
        Self {
            visible: matches!(outcome, SightOutcome::Visible),
            distance,
            angle,
            outcome,
        }
    }
}

/// Decide whether `player` is lit by `agent`.
///
/// Range is checked first, then the cone, and only a player inside both costs
/// an occlusion query. A hit counts as blocking only when it lies more than
/// `epsilon` in front of the player, so geometry at the player's own position
/// does not hide them.
#[must_use]
pub fn evaluate<Q>(agent: &Agent, player: Vec3, occluders: &Q, epsilon: f32) -> DetectionResult
where
    Q: OcclusionQuery + ?Sized,
{
    let to_player = player - agent.position;
    let distance = to_player.length();
    let direction = to_player.normalize_or_zero();
    let angle = angle_between(direction, agent.facing());

    if distance > agent.illumination_radius() {
        return DetectionResult::new(SightOutcome::OutOfRange, distance, angle);
    }

    if angle > agent.cone_half_angle {
        return DetectionResult::new(SightOutcome::OutsideCone, distance, angle);
    }

    let blocked = occluders
        .nearest_hit(agent.position, direction, distance)
        .is_some_and(|hit| hit < distance - epsilon);

    if blocked {
        DetectionResult::new(SightOutcome::Occluded, distance, angle)
    } else {
        DetectionResult::new(SightOutcome::Visible, distance, angle)
    }
}
