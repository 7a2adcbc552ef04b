// ABOUTME: tmux integration: command building, process execution, capture
// Everything that talks to the tmux binary goes through TmuxExecutor

pub mod capture;
pub mod command;
pub mod env;
pub mod error;
pub mod executor;

pub use capture::SessionCapture;
pub use command::TmuxCommand;
pub use env::{session_exists, CommandFilter, TmuxEnvironment};
pub use error::TmuxError;
pub use executor::{ProcessExecutor, TmuxExecutor};
