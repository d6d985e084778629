// ============================================================================
// Simulator Constants
// ============================================================================

// Frame loop
pub const DEFAULT_LOOP_FREQUENCY: u32 = 60;
pub const MAX_FRAME_DELTA: f32 = 0.1; // seconds, clamp after stalls

// Session timing
pub const INTRO_DURATION: f32 = 1.0; // seconds before play starts
pub const SPOTLIGHT_ACTIVATION_DELAY: f32 = 2.0; // seconds after play starts
pub const CAUGHT_DURATION: f32 = 2.0; // seconds before caught becomes game over

// Player settings
pub const PLAYER_EYE_HEIGHT: f32 = 1.6;
pub const PLAYER_START: [f32; 2] = [0.0, 5.0]; // [x, z]
pub const PLAYER_WALK_SPEED: f32 = 5.0;
pub const PLAYER_JITTER: f32 = 0.35; // max sideways wobble, fraction of walk direction
pub const PLAYER_PAUSE_CHANCE: f64 = 0.01; // per frame while walking
pub const PLAYER_PAUSE_MIN: f32 = 0.5; // seconds
pub const PLAYER_PAUSE_MAX: f32 = 4.0; // seconds

// Item settings
pub const ITEM_COLLECTION_RADIUS: f32 = 1.0;

// Fallback map
pub const FLOOR_SIZE: f32 = 50.0;
pub const WALL_HEIGHT: f32 = 5.0;
pub const WALL_THICKNESS: f32 = 0.5;
