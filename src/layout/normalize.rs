// ABOUTME: Turns a raw layout document into a validated session model
// Resolves pane roots against the current directory and the home directory

use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::layout::document::{PaneEntry, SessionDocument};
use crate::layout::error::ValidationError;
use crate::layout::model::{Pane, Session, Window};

/// Directories used to resolve pane roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    pub cwd: PathBuf,
    pub home: PathBuf,
}

impl PathContext {
    pub fn new(cwd: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home: home.into(),
        }
    }

    /// Reads the current directory and the home directory of this process.
    pub fn from_process() -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let home = dirs::home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "unable to determine home directory")
        })?;
        Ok(Self { cwd, home })
    }

    /// Empty or absent → current directory; a leading `~` is replaced by
    /// the home directory; anything else passes through.
    pub fn resolve_root(&self, root: Option<&str>) -> PathBuf {
        match root {
            None | Some("") => self.cwd.clone(),
            Some(root) => root.strip_prefix('~').map_or_else(
                || PathBuf::from(root),
                |rest| PathBuf::from(format!("{}{rest}", self.home.display())),
            ),
        }
    }
}

/// Turns a parsed document into a validated [`Session`].
pub fn normalize(doc: SessionDocument, paths: &PathContext) -> Result<Session, ValidationError> {
    let windows = doc
        .windows
        .into_iter()
        .enumerate()
        .map(|(index, window)| {
            let panes: Vec<Pane> = window
                .panes
                .into_iter()
                .map(|entry| normalize_pane(entry, paths))
                .collect();
            if panes.is_empty() {
                return Err(ValidationError::EmptyWindow {
                    index,
                    name: window.name,
                });
            }
            if window.root.is_some() {
                debug!("Ignoring window-level root for {:?}", window.name);
            }
            Ok(Window {
                name: window.name,
                layout: window.layout,
                panes,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if windows.is_empty() {
        return Err(ValidationError::NoWindows);
    }

    Ok(Session {
        name: doc.name.filter(|n| !n.is_empty()),
        windows,
        rename: false,
        attach: false,
    })
}

fn normalize_pane(entry: PaneEntry, paths: &PathContext) -> Pane {
    match entry {
        PaneEntry::Command(command) => Pane::new(vec![command], paths.cwd.clone()),
        PaneEntry::Record(record) => Pane {
            root: paths.resolve_root(record.root.as_deref()),
            commands: record.commands,
            focus: record.focus,
        },
    }
}
