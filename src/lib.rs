pub mod config;
pub mod drive;
pub mod gamepad;
pub mod gate;
pub mod hardware;
pub mod messages;
pub mod robot;
pub mod runtime;
