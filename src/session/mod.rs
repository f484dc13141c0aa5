//! Session State Machine
//!
//! One session per window. A session walks through
//! `AwaitingUsername -> AwaitingPassword -> Authenticated` and back on
//! logout or a failed password. Once authenticated it owns the working
//! directory (as a stack of directory frames from the root), the input and
//! output buffers, and a bounded command history. The output buffer keeps
//! at most `Config::output_capacity` lines, dropping the oldest.

pub mod completion;
pub mod history;

use tracing::{debug, info, warn};

use crate::commands::Dispatcher;
use crate::fs::{resolve, EntryId, FsError, Resolved, Tree};
use crate::world::World;

pub use history::{History, Recall};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    AwaitingUsername,
    AwaitingPassword { candidate: String },
    Authenticated { username: String },
}

/// One step of the working-directory stack. `name` is the name the directory
/// was entered through, so a symlinked directory shows its link name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFrame {
    pub id: EntryId,
    pub name: String,
}

pub struct Session {
    state: AuthState,
    path: Vec<PathFrame>,
    input: String,
    output: Vec<String>,
    output_capacity: usize,
    printed: u64,
    history: History,
    generation: u64,
}

impl Session {
    pub fn new(world: &World) -> Self {
        Self {
            state: AuthState::AwaitingUsername,
            path: root_stack(&world.tree),
            input: String::new(),
            output: vec![world.config.banner.clone()],
            output_capacity: world.config.output_capacity.max(1),
            printed: 1,
            history: History::new(world.config.history_capacity),
            generation: world.generation(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { username } => Some(username),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    pub fn cwd(&self) -> EntryId {
        self.path[self.path.len() - 1].id
    }

    pub fn path_stack(&self) -> &[PathFrame] {
        &self.path
    }

    /// Display form of the working directory, e.g. `/home/guest`.
    pub fn cwd_path(&self) -> String {
        let names: Vec<&str> = self.path[1..].iter().map(|f| f.name.as_str()).collect();
        format!("/{}", names.join("/"))
    }

    pub fn prompt(&self, world: &World) -> String {
        match &self.state {
            AuthState::AwaitingUsername => "login: ".to_string(),
            AuthState::AwaitingPassword { .. } => "Password: ".to_string(),
            AuthState::Authenticated { username } => {
                format!("{}@{}:{}$ ", username, world.config.hostname, self.cwd_path())
            }
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Lines appended since the session started, including any that were
    /// cleared or dropped from the buffer since.
    pub fn lines_printed(&self) -> u64 {
        self.printed
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn print(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
        self.printed += 1;
        if self.output.len() > self.output_capacity {
            let excess = self.output.len() - self.output_capacity;
            self.output.drain(..excess);
        }
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn history_previous(&mut self) {
        if let Recall::Entry(line) = self.history.previous() {
            self.input = line.to_string();
        }
    }

    pub fn history_next(&mut self) {
        match self.history.next() {
            Recall::Entry(line) => self.input = line.to_string(),
            Recall::Empty => self.input.clear(),
            Recall::Unchanged => {}
        }
    }

    /// Complete the last token against verb names, then the current
    /// directory's children, in their listing order.
    pub fn complete(&mut self, world: &World, verbs: &[&str]) {
        if !self.is_authenticated() {
            return;
        }
        self.sync(world);
        let mut candidates: Vec<&str> = verbs.to_vec();
        candidates.extend(world.tree.list_names(self.cwd()));
        if let Some(completed) = completion::complete(&self.input, candidates) {
            self.input = completed;
        }
    }

    /// Submit the input buffer to the state machine.
    pub fn submit(&mut self, world: &mut World, dispatcher: &Dispatcher) {
        self.sync(world);
        let prompt = self.prompt(world);
        let line = std::mem::take(&mut self.input);
        self.history.reset_cursor();

        match self.state.clone() {
            AuthState::AwaitingUsername => {
                self.print(format!("{}{}", prompt, line));
                let name = line.trim();
                if name.is_empty() {
                    return;
                }
                if world.users.contains(name) {
                    self.state = AuthState::AwaitingPassword { candidate: name.to_string() };
                } else {
                    warn!(user = name, "login attempt for unknown user");
                    self.print(format!("Login incorrect: unknown user '{}'", name));
                }
            }
            AuthState::AwaitingPassword { candidate } => {
                self.print(prompt.trim_end());
                let accepted = world.users.get(&candidate).map_or(false, |u| u.verify(&line));
                if accepted {
                    self.authenticate(world, &candidate);
                    self.print(format!("Welcome, {}.", candidate));
                } else {
                    warn!(user = %candidate, "login failed");
                    self.state = AuthState::AwaitingUsername;
                    self.print("Login incorrect");
                }
            }
            AuthState::Authenticated { .. } => {
                self.print(format!("{}{}", prompt, line));
                let command = line.trim();
                if command.is_empty() {
                    return;
                }
                self.history.push(command);
                for line in dispatcher.dispatch(command, self, world) {
                    self.print(line);
                }
            }
        }
    }

    /// Enter the authenticated state as `username`, starting in the user's
    /// home directory or at the root when the home path does not resolve.
    pub(crate) fn authenticate(&mut self, world: &World, username: &str) {
        let home = world.users.get(username).map(|u| u.home_path.clone()).unwrap_or_default();
        let root = root_stack(&world.tree);
        self.path = match walk_frames(&world.tree, root.clone(), &home) {
            Ok(frames) => frames,
            Err(err) => {
                warn!(user = username, home = %home, error = %err, "home directory unavailable, starting at /");
                root
            }
        };
        self.generation = world.generation();
        self.state = AuthState::Authenticated { username: username.to_string() };
        info!(user = username, "login");
    }

    /// Back to the username prompt; the active user is forgotten.
    pub fn logout(&mut self, world: &World) {
        if let Some(user) = self.username() {
            info!(user = user, "logout");
        }
        self.state = AuthState::AwaitingUsername;
        self.path = root_stack(&world.tree);
    }

    /// Move the working directory along `path`.
    pub fn change_dir(&mut self, tree: &Tree, path: &str) -> Result<(), FsError> {
        self.path = walk_frames(tree, self.path.clone(), path)?;
        Ok(())
    }

    /// Re-derive the path stack after the world's tree was replaced.
    pub(crate) fn sync(&mut self, world: &World) {
        if self.generation == world.generation() {
            return;
        }
        let logical = self.cwd_path();
        let root = root_stack(&world.tree);
        self.path = walk_frames(&world.tree, root.clone(), &logical).unwrap_or(root);
        self.generation = world.generation();
        debug!(cwd = %self.cwd_path(), "path stack rebased onto reloaded tree");
    }
}

fn root_stack(tree: &Tree) -> Vec<PathFrame> {
    vec![PathFrame { id: tree.root(), name: String::new() }]
}

/// Apply `path` to a frame stack: `/` restarts at the root, `..` pops (never
/// past the root), `.` stays, names are looked up and dereferenced to
/// directories. Relative symlink targets resolve from the stack's starting
/// directory, the same base every other command uses.
fn walk_frames(tree: &Tree, mut frames: Vec<PathFrame>, path: &str) -> Result<Vec<PathFrame>, FsError> {
    let base = frames[frames.len() - 1].id;
    if path.starts_with('/') {
        frames.truncate(1);
    }
    for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if segment == ".." {
            if frames.len() > 1 {
                frames.pop();
            }
            continue;
        }
        let top = frames[frames.len() - 1].id;
        let child = tree.lookup(top, segment).map_err(|_| FsError::NotFound { path: path.to_string() })?;
        match resolve(tree, child, base)? {
            Resolved::Directory(dir) => frames.push(PathFrame { id: dir, name: segment.to_string() }),
            Resolved::File(_) => return Err(FsError::NotADirectory { path: path.to_string() }),
        }
    }
    Ok(frames)
}
