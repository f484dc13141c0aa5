//! Terminal Environment
//!
//! Main entry point for driving the system. Ties together the shared world,
//! the command dispatcher and a set of windows, each holding its own session.
//! Exactly one window is active and receives key events; the others keep
//! their state untouched until switched to.

use tracing::debug;

use crate::commands::Dispatcher;
use crate::session::Session;
use crate::world::World;

/// A discrete input event for the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Up,
    Down,
    Tab,
}

pub struct Terminal {
    pub world: World,
    dispatcher: Dispatcher,
    windows: Vec<Session>,
    active: usize,
}

impl Terminal {
    /// Create a terminal with one window open.
    pub fn new(world: World) -> Self {
        let first = Session::new(&world);
        Self {
            world,
            dispatcher: Dispatcher::new(),
            windows: vec![first],
            active: 0,
        }
    }

    /// Open a new window at the login prompt and make it active. Returns its
    /// index.
    pub fn open_window(&mut self) -> usize {
        self.windows.push(Session::new(&self.world));
        self.active = self.windows.len() - 1;
        debug!(window = self.active, "window opened");
        self.active
    }

    /// Make window `index` active. Returns false when no such window exists.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index >= self.windows.len() {
            return false;
        }
        self.active = index;
        debug!(window = index, "window activated");
        true
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_session(&self) -> &Session {
        &self.windows[self.active]
    }

    pub fn session(&self, index: usize) -> Option<&Session> {
        self.windows.get(index)
    }

    /// Prompt of the active window, e.g. `guest@terminalos:/home/guest$ `.
    pub fn prompt(&self) -> String {
        self.active_session().prompt(&self.world)
    }

    /// Deliver one key event to the active window.
    pub fn key(&mut self, key: Key) {
        let session = &mut self.windows[self.active];
        match key {
            Key::Char(c) => session.push_char(c),
            Key::Backspace => session.backspace(),
            Key::Up => session.history_previous(),
            Key::Down => session.history_next(),
            Key::Tab => session.complete(&self.world, &self.dispatcher.verbs()),
            Key::Enter => session.submit(&mut self.world, &self.dispatcher),
        }
    }

    /// Type `line` into the active window and press Enter.
    pub fn submit_line(&mut self, line: &str) {
        self.windows[self.active].set_input(line);
        self.key(Key::Enter);
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(World::default())
    }
}
