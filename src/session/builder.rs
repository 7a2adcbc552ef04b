// ABOUTME: Replays a session model into a live tmux server
// Creates the session and its windows, splits panes, applies layouts, injects
// commands and sets focus, in the order tmux needs identifiers back

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::layout::{Pane, Session, Window};
use crate::tmux::command::TmuxCommand;
use crate::tmux::env::session_exists;
use crate::tmux::error::TmuxError;
use crate::tmux::executor::TmuxExecutor;

/// Prefix of names drawn for unnamed or renamed sessions.
pub const GENERATED_NAME_PREFIX: &str = "tmass-session-";

/// Which pane `split-window` targets when creating the next pane of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitAnchor {
    /// Always split the window's first pane.
    #[default]
    FirstPane,
    /// Split the pane created just before.
    PreviousPane,
}

/// Knobs that change how panes are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub split_anchor: SplitAnchor,
}

/// Position of a pane inside the session model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneKey {
    pub window: usize,
    pub pane: usize,
}

/// Result of a construction run. Pane identifiers live here, keyed by model
/// position, and die with the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSession {
    pub name: String,
    pub attached: bool,
    pane_ids: HashMap<PaneKey, String>,
}

impl BuiltSession {
    /// tmux id of the pane at `pane` in layout window `window`.
    pub fn pane_id(&self, window: usize, pane: usize) -> Option<&str> {
        self.pane_ids
            .get(&PaneKey { window, pane })
            .map(String::as_str)
    }

    pub fn pane_count(&self) -> usize {
        self.pane_ids.len()
    }
}

pub fn generate_session_name() -> String {
    format!("{GENERATED_NAME_PREFIX}{}", rand::random::<u32>())
}

/// Applies a [`Session`] to tmux through a [`TmuxExecutor`].
pub struct SessionBuilder<'a, E: ?Sized> {
    executor: &'a E,
    options: BuildOptions,
}

impl<'a, E: TmuxExecutor + ?Sized> SessionBuilder<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self {
            executor,
            options: BuildOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Creates (or extends) the session, then lays out panes, sends commands and restores focus.
    pub fn build(&self, session: &Session) -> Result<BuiltSession, Error> {
        session.validate()?;
        let (name, attached) = self.resolve_name(session)?;
        info!(
            "Building session {} ({} windows, attach: {})",
            name,
            session.windows.len(),
            attached
        );

        let mut pane_ids = HashMap::new();
        for (index, window) in session.windows.iter().enumerate() {
            let first_pane = &window.panes[0];
            let first_id = if index == 0 && !attached {
                self.create_session(&name, window, first_pane)?
            } else {
                self.create_window(&name, window, &first_pane.root)?
            };
            pane_ids.insert(
                PaneKey {
                    window: index,
                    pane: 0,
                },
                first_id,
            );
            self.build_panes(&name, index, window, &mut pane_ids)?;
        }

        Ok(BuiltSession {
            name,
            attached,
            pane_ids,
        })
    }

    fn resolve_name(&self, session: &Session) -> Result<(String, bool), Error> {
        let requested = session.name.clone().filter(|n| !n.is_empty());
        let generated = requested.is_none();
        let mut name = requested.unwrap_or_else(generate_session_name);

        if !session_exists(self.executor, &name) {
            return Ok((name, false));
        }
        if session.attach {
            info!("Session {} exists, adding windows to it", name);
            return Ok((name, true));
        }
        if session.rename || generated {
            while session_exists(self.executor, &name) {
                name = generate_session_name();
            }
            info!("Session name taken, using {} instead", name);
            return Ok((name, false));
        }
        Err(Error::NamingConflict(name))
    }

    fn create_session(&self, name: &str, window: &Window, pane: &Pane) -> Result<String, TmuxError> {
        let output = TmuxCommand::new_session(name, &window.name, &pane.root).execute(self.executor)?;
        let id = output.trim();
        if id.is_empty() {
            // Nothing printed: assume the default base-index.
            Ok(format!("{name}:0.0"))
        } else {
            Ok(id.to_string())
        }
    }

    fn create_window(&self, session: &str, window: &Window, root: &Path) -> Result<String, TmuxError> {
        let output = TmuxCommand::new_window(session, &window.name, root).execute(self.executor)?;
        Ok(output.trim().to_string())
    }

    fn build_panes(
        &self,
        session: &str,
        window_index: usize,
        window: &Window,
        pane_ids: &mut HashMap<PaneKey, String>,
    ) -> Result<(), Error> {
        let first_key = PaneKey {
            window: window_index,
            pane: 0,
        };
        let first_id = pane_ids.get(&first_key).cloned().unwrap_or_default();
        let mut previous_id = first_id.clone();
        let mut focus_target = None;

        for (pane_index, pane) in window.panes.iter().enumerate() {
            // A previous split may have squeezed the window; re-lay it out first.
            self.apply_layout(&first_id, &window.layout);

            let id = if pane_index == 0 {
                first_id.clone()
            } else {
                let anchor = match self.options.split_anchor {
                    SplitAnchor::FirstPane => &first_id,
                    SplitAnchor::PreviousPane => &previous_id,
                };
                self.split_pane(session, window, pane, anchor, &first_id)?
            };

            self.send_commands(&id, pane)?;
            if pane.focus {
                focus_target = Some(id.clone());
            }
            pane_ids.insert(
                PaneKey {
                    window: window_index,
                    pane: pane_index,
                },
                id.clone(),
            );
            previous_id = id;
        }

        // Layouts may move focus, so select the pane only afterwards.
        self.apply_layout(&first_id, &window.layout);
        if let Some(target) = focus_target {
            if let Err(e) = TmuxCommand::select_pane(&target).execute(self.executor) {
                warn!("Failed to focus pane {}: {}", target, e);
            }
        }
        Ok(())
    }

    fn split_pane(
        &self,
        session: &str,
        window: &Window,
        pane: &Pane,
        anchor: &str,
        first_id: &str,
    ) -> Result<String, TmuxError> {
        match TmuxCommand::split_window(anchor, &pane.root).execute(self.executor) {
            Ok(output) => Ok(output.trim().to_string()),
            Err(e) => {
                warn!(
                    "Split of {} failed, opening a new window instead: {}",
                    anchor, e
                );
                self.apply_layout(first_id, &window.layout);
                self.create_window(session, window, &pane.root)
            }
        }
    }

    fn send_commands(&self, target: &str, pane: &Pane) -> Result<(), TmuxError> {
        if pane.commands.is_empty() {
            debug!("No commands for pane {}", target);
            return Ok(());
        }
        TmuxCommand::send_keys(target, &pane.command_line()).execute(self.executor)?;
        TmuxCommand::send_keys(target, "Enter").execute(self.executor)?;
        Ok(())
    }

    /// Best effort: a failed layout only costs cosmetics.
    fn apply_layout(&self, target: &str, layout: &str) {
        if layout.is_empty() {
            return;
        }
        if let Err(e) = TmuxCommand::select_layout(target, layout).execute(self.executor) {
            warn!("Failed to apply layout {} to {}: {}", layout, target, e);
        }
    }
}
