//! Application state for one widget window.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;

pub use self::core::WeldApp;
