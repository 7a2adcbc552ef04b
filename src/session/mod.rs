// ABOUTME: Session construction and layout persistence
// Builds live tmux sessions from layouts and stores captured layouts on disk

pub mod builder;
pub mod persistence;

pub use builder::{BuildOptions, BuiltSession, SessionBuilder, SplitAnchor};
pub use persistence::{DocumentFormat, LayoutStore, StoreError};
