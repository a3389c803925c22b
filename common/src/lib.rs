pub mod config;
pub mod constants;
pub mod cursor;
pub mod look;
pub mod movement;
pub mod net;
pub mod protocol;
pub mod session;
