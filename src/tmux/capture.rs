// ABOUTME: Captures the window/pane topology of a live tmux session
//
// Lists the windows of a session, then the panes of each window, and rebuilds
// the session model from the `|`-delimited rows. Malformed rows are skipped;
// a failing tmux query aborts the capture.

use tracing::{debug, warn};

use crate::layout::{Pane, Session, Window};
use crate::tmux::command::TmuxCommand;
use crate::tmux::env::CommandFilter;
use crate::tmux::error::TmuxError;
use crate::tmux::executor::TmuxExecutor;

/// Row format for `list-windows`: target, name and layout.
pub const WINDOW_FORMAT: &str = "#S:#I|#{window_name}|#{window_layout}";
pub const PANE_FORMAT: &str = "#{pane_current_path}|#{pane_current_command}|#{pane_active}";

const FIELD_COUNT: usize = 3;

/// One row of `list-windows` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRow {
    /// `session:index`, used to target the window's panes.
    pub target: String,
    pub name: String,
    pub layout: String,
}

/// One row of `list-panes` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneRow {
    pub path: String,
    pub command: String,
    pub active: bool,
}

fn split_row<'a>(kind: &'static str, row: &'a str) -> Result<Vec<&'a str>, TmuxError> {
    let fields: Vec<&str> = row.split('|').collect();
    if fields.len() == FIELD_COUNT {
        Ok(fields)
    } else {
        Err(TmuxError::MalformedRow {
            kind,
            row: row.to_string(),
            expected: FIELD_COUNT,
            found: fields.len(),
        })
    }
}

pub fn parse_window_row(row: &str) -> Result<WindowRow, TmuxError> {
    let fields = split_row("window", row)?;
    Ok(WindowRow {
        target: fields[0].to_string(),
        name: fields[1].to_string(),
        layout: fields[2].to_string(),
    })
}

pub fn parse_pane_row(row: &str) -> Result<PaneRow, TmuxError> {
    let fields = split_row("pane", row)?;
    Ok(PaneRow {
        path: fields[0].to_string(),
        command: fields[1].to_string(),
        active: fields[2] == "1",
    })
}

/// Rebuilds a session model from a live tmux session.
pub struct SessionCapture<'a, E: ?Sized> {
    executor: &'a E,
    filter: &'a CommandFilter,
}

impl<'a, E: TmuxExecutor + ?Sized> SessionCapture<'a, E> {
    pub const fn new(executor: &'a E, filter: &'a CommandFilter) -> Self {
        Self { executor, filter }
    }

    /// Reads windows and panes of `session` into a layout.
    pub fn capture(&self, session: &str) -> Result<Session, TmuxError> {
        let output = TmuxCommand::list_windows(session, WINDOW_FORMAT).execute(self.executor)?;

        let mut windows = Vec::new();
        for line in output.lines() {
            let row = match parse_window_row(line) {
                Ok(row) => row,
                Err(e) => {
                    warn!("Ignoring window: {}", e);
                    continue;
                }
            };
            windows.push(self.capture_window(row)?);
        }

        debug!("Captured {} windows from session {}", windows.len(), session);
        Ok(Session {
            name: Some(session.to_string()),
            windows,
            rename: false,
            attach: false,
        })
    }

    fn capture_window(&self, row: WindowRow) -> Result<Window, TmuxError> {
        let output = TmuxCommand::list_panes(&row.target, PANE_FORMAT).execute(self.executor)?;

        let panes = output
            .lines()
            .filter_map(|line| match parse_pane_row(line) {
                Ok(pane) => Some(pane),
                Err(e) => {
                    warn!("Ignoring pane in {}: {}", row.target, e);
                    None
                }
            })
            .map(|pane| {
                Pane::new(vec![self.filter.apply(&pane.command)], pane.path).focused(pane.active)
            })
            .collect();

        Ok(Window {
            name: row.name,
            layout: row.layout,
            panes,
        })
    }
}
