// ABOUTME: Strict in-memory session model shared by construction and capture
// Built once from a document or a live session, used once, then dropped

use std::path::PathBuf;

use crate::layout::document::{PaneDocument, PaneEntry, SessionDocument, WindowDocument};
use crate::layout::error::ValidationError;

/// A session layout with every path resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Generated at construction time when absent.
    pub name: Option<String>,
    pub windows: Vec<Window>,
    /// On a name collision, draw a fresh generated name instead of failing.
    pub rename: bool,
    /// On a name collision, add the windows to the live session.
    pub attach: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    pub name: String,
    /// tmux layout string or preset name, passed verbatim to `select-layout`.
    pub layout: String,
    pub panes: Vec<Pane>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pane {
    pub commands: Vec<String>,
    pub focus: bool,
    pub root: PathBuf,
}

impl Session {
    /// Fails when there are no windows or any window has no panes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.windows.is_empty() {
            return Err(ValidationError::NoWindows);
        }
        self.windows
            .iter()
            .enumerate()
            .find(|(_, w)| w.panes.is_empty())
            .map_or(Ok(()), |(index, w)| {
                Err(ValidationError::EmptyWindow {
                    index,
                    name: w.name.clone(),
                })
            })
    }

    pub fn pane_count(&self) -> usize {
        self.windows.iter().map(|w| w.panes.len()).sum()
    }

    /// Persistable form. Panes are always written as records and the
    /// transient flags are dropped.
    pub fn to_document(&self) -> SessionDocument {
        SessionDocument {
            name: self.name.clone(),
            windows: self.windows.iter().map(Window::to_document).collect(),
        }
    }
}

impl Window {
    fn to_document(&self) -> WindowDocument {
        WindowDocument {
            name: self.name.clone(),
            root: None,
            layout: self.layout.clone(),
            panes: self
                .panes
                .iter()
                .map(|p| PaneEntry::Record(p.to_document()))
                .collect(),
        }
    }
}

impl Pane {
    pub fn new(commands: Vec<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            commands,
            focus: false,
            root: root.into(),
        }
    }

    #[must_use]
    pub const fn focused(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    /// Commands as a single line for `send-keys`.
    pub fn command_line(&self) -> String {
        self.commands.join(";")
    }

    fn to_document(&self) -> PaneDocument {
        PaneDocument {
            commands: self.commands.clone(),
            focus: self.focus,
            root: Some(self.root.to_string_lossy().into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn window(name: &str, panes: usize) -> Window {
        Window {
            name: name.into(),
            layout: "tiled".into(),
            panes: (0..panes).map(|_| Pane::new(vec!["ls".into()], "/tmp")).collect(),
        }
    }

    #[test]
    fn test_validate_requires_windows_and_panes() {
        let mut session = Session::default();
        assert_eq!(session.validate(), Err(ValidationError::NoWindows));

        session.windows = vec![window("one", 1), window("two", 0)];
        assert_eq!(
            session.validate(),
            Err(ValidationError::EmptyWindow {
                index: 1,
                name: "two".into()
            })
        );

        session.windows[1] = window("two", 3);
        assert_eq!(session.validate(), Ok(()));
        assert_eq!(session.pane_count(), 4);
    }

    #[test]
    fn test_to_document_drops_transient_flags() {
        let session = Session {
            name: Some("demo".into()),
            windows: vec![Window {
                name: "main".into(),
                layout: "even-horizontal".into(),
                panes: vec![Pane::new(vec!["htop".into()], "/var/log").focused(true)],
            }],
            rename: true,
            attach: true,
        };
        let doc = session.to_document();
        assert_eq!(
            doc,
            SessionDocument {
                name: Some("demo".into()),
                windows: vec![WindowDocument {
                    name: "main".into(),
                    root: None,
                    layout: "even-horizontal".into(),
                    panes: vec![PaneEntry::Record(PaneDocument {
                        commands: vec!["htop".into()],
                        focus: true,
                        root: Some("/var/log".into()),
                    })],
                }],
            }
        );
    }

    #[test]
    fn test_command_line_joins_with_semicolon() {
        let pane = Pane::new(vec!["cd src".into(), "make".into()], "/");
        assert_eq!(pane.command_line(), "cd src;make");
    }
}
