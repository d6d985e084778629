// ============================================================================
// Floating-Point Comparisons
// ============================================================================

// Small value for floating-point comparisons (near-zero checks, division guards).
pub const PHYSICS_EPSILON: f32 = 1e-6;

// ============================================================================
// Spotlight
// ============================================================================

// Mounting and reach (meters)
pub const SPOTLIGHT_MOUNT_HEIGHT: f32 = 5.0;
pub const SPOTLIGHT_ILLUMINATION_RADIUS: f32 = 30.0;
pub const SPOTLIGHT_CONE_HALF_ANGLE: f32 = std::f32::consts::PI / 12.0; // radians

// Cone half-angle is kept strictly inside (0, PI/2)
pub const MIN_CONE_HALF_ANGLE: f32 = 1e-3;
pub const MAX_CONE_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

// Locomotion
pub const SPOTLIGHT_PATROL_SPEED: f32 = 1.5; // meters per second
pub const SPOTLIGHT_CHASE_SPEED: f32 = 2.5; // meters per second
pub const SPOTLIGHT_ACCELERATION: f32 = 15.0; // steering gain per second
pub const SPOTLIGHT_DAMPING: f32 = 0.92; // per-tick velocity retention (0.0-1.0)

// Damping is kept strictly inside (0, 1)
pub const MIN_DAMPING: f32 = 1e-3;
pub const MAX_DAMPING: f32 = 1.0 - 1e-3;

// Colors (0xRRGGBB)
pub const SPOTLIGHT_NORMAL_COLOR: u32 = 0x00FF_FFFF;
pub const SPOTLIGHT_ALERT_COLOR: u32 = 0x00FF_0000;

// Offsets of the default patrol pattern around the start position (x, z)
pub const DEFAULT_PATROL_OFFSETS: [[f32; 2]; 5] = [[0.0, 0.0], [8.0, 5.0], [8.0, -5.0], [-8.0, -5.0], [-8.0, 5.0]];

// ============================================================================
// Patrol
// ============================================================================

pub const PATROL_ARRIVAL_THRESHOLD: f32 = 0.5; // meters, horizontal

// ============================================================================
// Detection
// ============================================================================

// Hits closer than (distance - epsilon) block the light; keeps the player's own
// geometry from occluding itself.
pub const OCCLUSION_EPSILON: f32 = 0.1;

// ============================================================================
// Frame Step
// ============================================================================

// Longest frame one tick simulates; longer deltas are cut down to this.
pub const SPOTLIGHT_MAX_STEP: f32 = 0.25; // seconds

// ============================================================================
// Alert Timers (seconds)
// ============================================================================

pub const ALERT_THRESHOLD: f32 = 0.5;
pub const CAPTURE_THRESHOLD: f32 = 3.0;
pub const ESCAPE_THRESHOLD: f32 = 5.0;
