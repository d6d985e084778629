pub mod items;
pub mod player;
pub mod pursuit;
pub mod session;

pub use items::item_collection_system;
pub use player::player_movement_system;
pub use pursuit::{pursuit_event_system, pursuit_tick_system};
pub use session::session_timer_system;
