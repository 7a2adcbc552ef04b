// ABOUTME: Builder for single tmux invocations
// Accumulates argument tokens and knows the tmux vocabulary used by the session engines

use std::fmt;
use std::path::Path;

use crate::tmux::error::TmuxError;
use crate::tmux::executor::TmuxExecutor;

/// Format printed by every pane-creating command. `%N` pane ids survive the
/// renumbering tmux does when a split lands between existing panes, and do
/// not depend on the server's `base-index`.
pub const PANE_ID_FORMAT: &str = "#{pane_id}";

/// Argument tokens for one tmux invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmuxCommand {
    parts: Vec<String>,
}

impl TmuxCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends arguments in place.
    pub fn add<I, S>(&mut self, parts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parts.extend(parts.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, part: impl Into<String>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn clear(&mut self) {
        self.parts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Run the accumulated tokens. Errors already carry the full invocation.
    pub fn execute<E: TmuxExecutor + ?Sized>(&self, executor: &E) -> Result<String, TmuxError> {
        executor.run(&self.parts)
    }

    // -----------------------------------------------------------------
    // Vocabulary
    // -----------------------------------------------------------------

    pub fn new_session(session: &str, window: &str, root: &Path) -> Self {
        Self::new()
            .arg("new-session")
            .arg("-d")
            .arg("-P")
            .arg("-F")
            .arg(PANE_ID_FORMAT)
            .arg("-s")
            .arg(session)
            .arg("-n")
            .arg(window)
            .arg("-c")
            .arg(root.to_string_lossy())
    }

    pub fn new_window(session: &str, window: &str, root: &Path) -> Self {
        Self::new()
            .arg("new-window")
            .arg("-P")
            .arg("-F")
            .arg(PANE_ID_FORMAT)
            .arg("-t")
            .arg(session)
            .arg("-n")
            .arg(window)
            .arg("-c")
            .arg(root.to_string_lossy())
    }

    pub fn split_window(target: &str, root: &Path) -> Self {
        Self::new()
            .arg("split-window")
            .arg("-P")
            .arg("-F")
            .arg(PANE_ID_FORMAT)
            .arg("-t")
            .arg(target)
            .arg("-c")
            .arg(root.to_string_lossy())
    }

    pub fn select_layout(target: &str, layout: &str) -> Self {
        Self::new()
            .arg("select-layout")
            .arg("-t")
            .arg(target)
            .arg(layout)
    }

    pub fn select_pane(target: &str) -> Self {
        Self::new().arg("select-pane").arg("-t").arg(target)
    }

    /// Types `keys` into the pane without pressing Enter.
    pub fn send_keys(target: &str, keys: &str) -> Self {
        Self::new().arg("send-keys").arg("-t").arg(target).arg(keys)
    }

    pub fn list_sessions() -> Self {
        Self::new().arg("ls")
    }

    pub fn list_windows(session: &str, format: &str) -> Self {
        Self::new()
            .arg("list-windows")
            .arg("-t")
            .arg(session)
            .arg("-F")
            .arg(format)
    }

    pub fn list_panes(window: &str, format: &str) -> Self {
        Self::new()
            .arg("list-panes")
            .arg("-t")
            .arg(window)
            .arg("-F")
            .arg(format)
    }
}

impl fmt::Display for TmuxCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}
