// src/commands/dispatcher.rs
use tracing::{debug, warn};

use super::registry::{create_default_registry, CommandRegistry};
use super::types::{CommandContext, CommandResult};
use crate::session::Session;
use crate::world::World;

const SUDO: &str = "sudo";

/// Maps a command line to its handler. `sudo` is handled here as a wrapper
/// around the other verbs rather than as a registered command.
pub struct Dispatcher {
    registry: CommandRegistry,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_registry(create_default_registry())
    }

    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Every verb the dispatcher accepts, in listing order.
    pub fn verbs(&self) -> Vec<&str> {
        let mut verbs = self.registry.names();
        verbs.push(SUDO);
        verbs
    }

    /// Run one command line and return the lines it produced. Never fails:
    /// problems come back as text.
    pub fn dispatch(&self, line: &str, session: &mut Session, world: &mut World) -> Vec<String> {
        let text = line.trim();
        let words: Vec<String> = text.split_whitespace().map(String::from).collect();
        if words.is_empty() {
            return Vec::new();
        }
        self.run(text, words, session, world, false).lines
    }

    /// `text` is the trimmed line as typed, echoed verbatim for unknown verbs.
    fn run(
        &self,
        text: &str,
        mut words: Vec<String>,
        session: &mut Session,
        world: &mut World,
        elevated: bool,
    ) -> CommandResult {
        let verb = words.remove(0);
        if verb == SUDO {
            return self.elevate(after_verb(text), words, session, world);
        }
        let cmd = match self.registry.get(&verb) {
            Some(cmd) => cmd,
            None => return CommandResult::error(format!("Unknown command: {}", text)),
        };
        debug!(verb = %verb, args = ?words, elevated, "dispatch");
        let mut ctx = CommandContext { args: words, session, world, elevated };
        let result = cmd.execute(&mut ctx);
        if result.failed {
            debug!(verb = %verb, "command reported failure");
        }
        result
    }

    /// All-or-nothing elevation: allowed for uid 0 or the configured admin
    /// account, and the wrapped handler runs unchanged.
    fn elevate(&self, text: &str, words: Vec<String>, session: &mut Session, world: &mut World) -> CommandResult {
        if words.is_empty() {
            return CommandResult::error("usage: sudo <command> [args...]");
        }
        let user = session.username().unwrap_or_default().to_string();
        if !world.is_admin(&user) {
            warn!(user = %user, command = %words[0], "sudo denied");
            return CommandResult::error(format!("sudo: {} is not in the sudoers file.", user));
        }
        self.run(text, words, session, world, true)
    }
}

/// The rest of the line after its first word, leading blanks removed.
fn after_verb(text: &str) -> &str {
    text.split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest.trim_start())
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::fixture_as;

    #[test]
    fn test_unknown_command() {
        let (mut world, mut session) = fixture_as("guest");
        let out = Dispatcher::new().dispatch("frobnicate  now", &mut session, &mut world);
        assert_eq!(out, vec!["Unknown command: frobnicate  now"]);
    }

    #[test]
    fn test_unknown_command_echoes_line_as_typed() {
        let dispatcher = Dispatcher::new();
        let (mut world, mut session) = fixture_as("admin");
        let out = dispatcher.dispatch("  frob  a\t  b ", &mut session, &mut world);
        assert_eq!(out, vec!["Unknown command: frob  a\t  b"]);
        let out = dispatcher.dispatch("sudo   nope  x", &mut session, &mut world);
        assert_eq!(out, vec!["Unknown command: nope  x"]);
    }

    #[test]
    fn test_verbs_cover_command_surface() {
        let dispatcher = Dispatcher::new();
        let verbs = dispatcher.verbs();
        for verb in [
            "help", "clear", "ls", "cd", "mkdir", "touch", "cat", "whoami", "logout", "save",
            "load", "ps", "kill", "top", "pkg", "ping", "ifconfig", "curl", "mount", "umount",
            "chmod", "chown", "sudo", "df", "du", "ln",
        ] {
            assert!(verbs.contains(&verb), "missing verb {}", verb);
        }
    }

    #[test]
    fn test_sudo_denied_for_regular_user() {
        let (mut world, mut session) = fixture_as("guest");
        let out = Dispatcher::new().dispatch("sudo whoami", &mut session, &mut world);
        assert_eq!(out, vec!["sudo: guest is not in the sudoers file."]);
    }

    #[test]
    fn test_sudo_allowed_for_admin_and_root() {
        let dispatcher = Dispatcher::new();
        let (mut world, mut session) = fixture_as("admin");
        assert_eq!(dispatcher.dispatch("sudo whoami", &mut session, &mut world), vec!["root"]);
        assert_eq!(dispatcher.dispatch("whoami", &mut session, &mut world), vec!["admin"]);

        let (mut world, mut session) = fixture_as("root");
        assert_eq!(dispatcher.dispatch("sudo whoami", &mut session, &mut world), vec!["root"]);
    }

    #[test]
    fn test_sudo_usage_and_unknown_inner() {
        let dispatcher = Dispatcher::new();
        let (mut world, mut session) = fixture_as("admin");
        assert_eq!(
            dispatcher.dispatch("sudo", &mut session, &mut world),
            vec!["usage: sudo <command> [args...]"]
        );
        assert_eq!(
            dispatcher.dispatch("sudo nope x", &mut session, &mut world),
            vec!["Unknown command: nope x"]
        );
    }
}
