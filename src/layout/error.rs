// ABOUTME: Validation errors for layout documents and session models

use thiserror::Error;

/// Structural problems that make a layout unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("each session must have at least one window")]
    NoWindows,

    #[error("each window must have at least one pane (window {index} {name:?} has none)")]
    EmptyWindow { index: usize, name: String },
}
