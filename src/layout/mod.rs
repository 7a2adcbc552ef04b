// ABOUTME: Layout documents and the strict session model
// Raw documents stay separate from the model; normalize() is the only bridge

pub mod document;
pub mod error;
pub mod model;
pub mod normalize;

pub use document::{PaneDocument, PaneEntry, SessionDocument, WindowDocument};
pub use error::ValidationError;
pub use model::{Pane, Session, Window};
pub use normalize::{normalize, PathContext};
