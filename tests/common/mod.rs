// ABOUTME: In-memory tmux server used by the integration tests
// Understands the subset of tmux subcommands tmass issues and records every call.
// Panes get stable `%N` ids; splits insert right after the target pane so
// positional indexes shift the way they do on a real server.

#![allow(dead_code)]

use std::cell::RefCell;

use tmass::tmux::{TmuxError, TmuxExecutor};

pub const SHELL: &str = "bash";

#[derive(Debug, Clone)]
pub struct FakePane {
    pub id: usize,
    pub path: String,
    pub command: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub index: usize,
    pub name: String,
    pub layout: String,
    pub panes: Vec<FakePane>,
}

#[derive(Debug, Clone)]
pub struct FakeSession {
    pub name: String,
    pub windows: Vec<FakeWindow>,
}

#[derive(Debug, Default)]
struct State {
    sessions: Vec<FakeSession>,
    calls: Vec<Vec<String>>,
    next_pane_id: usize,
    fail_splits: bool,
}

/// Position of a pane: session, window and pane offsets into the state.
#[derive(Debug, Clone, Copy)]
struct Slot {
    session: usize,
    window: usize,
    pane: Option<usize>,
}

#[derive(Debug, Default)]
pub struct FakeTmux {
    state: RefCell<State>,
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn fail(args: &[String], output: &str) -> TmuxError {
    TmuxError::execution("tmux", args, "exit status: 1", output)
}

impl FakeTmux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_splits(self) -> Self {
        self.state.borrow_mut().fail_splits = true;
        self
    }

    pub fn with_session(self, name: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let pane = state.new_pane("/");
            state.sessions.push(FakeSession {
                name: name.to_string(),
                windows: vec![FakeWindow {
                    index: 0,
                    name: SHELL.to_string(),
                    layout: String::new(),
                    panes: vec![pane],
                }],
            });
        }
        self
    }

    pub fn session(&self, name: &str) -> Option<FakeSession> {
        self.state
            .borrow()
            .sessions
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    pub fn session_names(&self) -> Vec<String> {
        self.state.borrow().sessions.iter().map(|s| s.name.clone()).collect()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.borrow().calls.clone()
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls().into_iter().filter_map(|c| c.into_iter().next()).collect()
    }
}

impl State {
    fn new_pane(&mut self, path: &str) -> FakePane {
        let id = self.next_pane_id;
        self.next_pane_id += 1;
        FakePane {
            id,
            path: path.to_string(),
            command: SHELL.to_string(),
            active: true,
        }
    }

    /// Resolves `%N`, `session:window.pane` or `session:window`.
    fn resolve(&self, target: &str) -> Option<Slot> {
        if let Some(id) = target.strip_prefix('%') {
            let id: usize = id.parse().ok()?;
            for (si, session) in self.sessions.iter().enumerate() {
                for (wi, window) in session.windows.iter().enumerate() {
                    if let Some(pi) = window.panes.iter().position(|p| p.id == id) {
                        return Some(Slot {
                            session: si,
                            window: wi,
                            pane: Some(pi),
                        });
                    }
                }
            }
            return None;
        }

        let (session, rest) = target.rsplit_once(':')?;
        let (window, pane) = match rest.split_once('.') {
            Some((w, p)) => (w.parse::<usize>().ok()?, Some(p.parse::<usize>().ok()?)),
            None => (rest.parse::<usize>().ok()?, None),
        };
        let si = self.sessions.iter().position(|s| s.name == session)?;
        let wi = self.sessions[si]
            .windows
            .iter()
            .position(|w| w.index == window)?;
        if pane.is_some_and(|p| p >= self.sessions[si].windows[wi].panes.len()) {
            return None;
        }
        Some(Slot {
            session: si,
            window: wi,
            pane,
        })
    }

    fn window_at(&mut self, slot: Slot) -> &mut FakeWindow {
        &mut self.sessions[slot.session].windows[slot.window]
    }

    fn dispatch(&mut self, args: &[String]) -> Result<String, TmuxError> {
        let sub = args.first().map(String::as_str).unwrap_or_default();
        match sub {
            "ls" => self.list_sessions(args),
            "new-session" => self.new_session(args),
            "new-window" => self.new_window(args),
            "split-window" => self.split_window(args),
            "select-layout" => self.select_layout(args),
            "select-pane" => self.select_pane(args),
            "send-keys" => self.send_keys(args),
            "list-windows" => self.list_windows(args),
            "list-panes" => self.list_panes(args),
            _ => Err(fail(args, &format!("unknown command: {sub}"))),
        }
    }

    fn target(&self, args: &[String]) -> Result<Slot, TmuxError> {
        let target = flag(args, "-t").unwrap_or_default();
        self.resolve(target)
            .ok_or_else(|| fail(args, &format!("can't find pane: {target}")))
    }

    fn list_sessions(&self, args: &[String]) -> Result<String, TmuxError> {
        if self.sessions.is_empty() {
            return Err(fail(args, "no server running on /tmp/tmux-1000/default"));
        }
        Ok(self
            .sessions
            .iter()
            .map(|s| format!("{}: {} windows (created Thu Jan  1 00:00:00 1970)", s.name, s.windows.len()))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn new_session(&mut self, args: &[String]) -> Result<String, TmuxError> {
        let name = flag(args, "-s").unwrap_or("0").to_string();
        if self.sessions.iter().any(|s| s.name == name) {
            return Err(fail(args, &format!("duplicate session: {name}")));
        }
        let pane = self.new_pane(flag(args, "-c").unwrap_or("/"));
        let id = pane.id;
        self.sessions.push(FakeSession {
            name,
            windows: vec![FakeWindow {
                index: 0,
                name: flag(args, "-n").unwrap_or(SHELL).to_string(),
                layout: String::new(),
                panes: vec![pane],
            }],
        });
        Ok(format!("%{id}"))
    }

    fn new_window(&mut self, args: &[String]) -> Result<String, TmuxError> {
        let target = flag(args, "-t").unwrap_or_default();
        let si = self
            .sessions
            .iter()
            .position(|s| s.name == target)
            .ok_or_else(|| fail(args, &format!("can't find session: {target}")))?;
        let pane = self.new_pane(flag(args, "-c").unwrap_or("/"));
        let id = pane.id;
        let session = &mut self.sessions[si];
        let index = session.windows.iter().map(|w| w.index + 1).max().unwrap_or(0);
        session.windows.push(FakeWindow {
            index,
            name: flag(args, "-n").unwrap_or(SHELL).to_string(),
            layout: String::new(),
            panes: vec![pane],
        });
        Ok(format!("%{id}"))
    }

    fn split_window(&mut self, args: &[String]) -> Result<String, TmuxError> {
        if self.fail_splits {
            return Err(fail(args, "create pane failed: pane too small"));
        }
        let slot = self.target(args)?;
        let pane = self.new_pane(flag(args, "-c").unwrap_or("/"));
        let id = pane.id;
        let window = self.window_at(slot);
        let at = slot.pane.unwrap_or_else(|| {
            window.panes.iter().position(|p| p.active).unwrap_or(0)
        });
        for p in &mut window.panes {
            p.active = false;
        }
        window.panes.insert(at + 1, pane);
        Ok(format!("%{id}"))
    }

    fn select_layout(&mut self, args: &[String]) -> Result<String, TmuxError> {
        let slot = self.target(args)?;
        let layout = args.last().cloned().unwrap_or_default();
        self.window_at(slot).layout = layout;
        Ok(String::new())
    }

    fn select_pane(&mut self, args: &[String]) -> Result<String, TmuxError> {
        let slot = self.target(args)?;
        let selected = slot.pane.unwrap_or(0);
        for (i, p) in self.window_at(slot).panes.iter_mut().enumerate() {
            p.active = i == selected;
        }
        Ok(String::new())
    }

    /// The pane's foreground command becomes the first word typed into it.
    fn send_keys(&mut self, args: &[String]) -> Result<String, TmuxError> {
        let slot = self.target(args)?;
        let keys = args.last().cloned().unwrap_or_default();
        let index = slot.pane.unwrap_or(0);
        let pane = &mut self.window_at(slot).panes[index];
        if keys != "Enter" {
            if let Some(word) = keys.split_whitespace().next() {
                pane.command = word.trim_end_matches(';').to_string();
            }
        }
        Ok(String::new())
    }

    fn list_windows(&self, args: &[String]) -> Result<String, TmuxError> {
        let target = flag(args, "-t").unwrap_or_default();
        let session = self
            .sessions
            .iter()
            .find(|s| s.name == target)
            .ok_or_else(|| fail(args, &format!("can't find session: {target}")))?;
        Ok(session
            .windows
            .iter()
            .map(|w| format!("{}:{}|{}|{}", session.name, w.index, w.name, w.layout))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn list_panes(&self, args: &[String]) -> Result<String, TmuxError> {
        let slot = self.target(args)?;
        let window = &self.sessions[slot.session].windows[slot.window];
        Ok(window
            .panes
            .iter()
            .map(|p| format!("{}|{}|{}", p.path, p.command, u8::from(p.active)))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl TmuxExecutor for FakeTmux {
    fn run(&self, args: &[String]) -> Result<String, TmuxError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(args.to_vec());
        state.dispatch(args)
    }
}
