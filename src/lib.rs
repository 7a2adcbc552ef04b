// ABOUTME: Library crate for tmass, saving and restoring tmux session layouts

pub mod config;
pub mod error;
pub mod layout;
pub mod session;
pub mod tmux;
pub mod version;

pub use error::Error;
