mod look;
mod movement;
mod toggles;

pub use look::{input_look_system, look_input_from_motion};
pub use movement::{input_movement_system, move_input_from_keys};
pub use toggles::{cursor_apply_system, input_cursor_toggle_system};
