pub mod alert;
pub mod conditions;
pub mod handler;
pub mod renderer;
pub mod watch;
