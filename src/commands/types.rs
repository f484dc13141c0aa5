// src/commands/types.rs
use crate::fs::EntryId;
use crate::session::Session;
use crate::world::World;

/// Output of one command: lines for the session buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub lines: Vec<String>,
    pub failed: bool,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn success(lines: Vec<String>) -> Self {
        Self { lines, failed: false }
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self { lines: vec![line.into()], failed: false }
    }

    pub fn error(line: impl Into<String>) -> Self {
        Self { lines: vec![line.into()], failed: true }
    }
}

/// Everything a handler may read or change.
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub session: &'a mut Session,
    pub world: &'a mut World,
    /// Set when invoked through `sudo`.
    pub elevated: bool,
}

impl CommandContext<'_> {
    pub fn cwd(&self) -> EntryId {
        self.session.cwd()
    }

    /// Effective user: `root` under sudo, otherwise the logged-in user.
    pub fn user(&self) -> String {
        if self.elevated {
            return "root".to_string();
        }
        self.session.username().unwrap_or_default().to_string()
    }
}

pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult;
}
