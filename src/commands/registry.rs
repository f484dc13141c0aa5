// src/commands/registry.rs
use indexmap::IndexMap;
use super::types::Command;

/// Verb to handler, kept in registration order so listings and completion
/// are stable.
pub struct CommandRegistry {
    commands: IndexMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: IndexMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::cat::CatCommand;
use super::cd_cmd::CdCommand;
use super::chmod::ChmodCommand;
use super::chown_cmd::ChownCommand;
use super::clear_cmd::ClearCommand;
use super::df_cmd::DfCommand;
use super::du_cmd::DuCommand;
use super::echo::EchoCommand;
use super::help_cmd::HelpCommand;
use super::history_cmd::HistoryCommand;
use super::ln::LnCommand;
use super::logout_cmd::LogoutCommand;
use super::ls::LsCommand;
use super::mkdir::MkdirCommand;
use super::persist_cmd::{LoadCommand, SaveCommand};
use super::quota_cmd::QuotaCommand;
use super::simulated::{
    CurlCommand, IfconfigCommand, KillCommand, MountCommand, PingCommand, PkgCommand, PsCommand,
    TopCommand, UmountCommand,
};
use super::touch::TouchCommand;
use super::whoami_cmd::WhoamiCommand;

/// Register the file system and session commands.
pub fn register_shell_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(HelpCommand));
    registry.register(Box::new(ClearCommand));
    registry.register(Box::new(LsCommand));
    registry.register(Box::new(CdCommand));
    registry.register(Box::new(MkdirCommand));
    registry.register(Box::new(TouchCommand));
    registry.register(Box::new(CatCommand));
    registry.register(Box::new(WhoamiCommand));
    registry.register(Box::new(LogoutCommand));
    registry.register(Box::new(SaveCommand));
    registry.register(Box::new(LoadCommand));
}

/// Register the text-only system and network commands.
pub fn register_simulated_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(PsCommand));
    registry.register(Box::new(KillCommand));
    registry.register(Box::new(TopCommand));
    registry.register(Box::new(PkgCommand));
    registry.register(Box::new(PingCommand));
    registry.register(Box::new(IfconfigCommand));
    registry.register(Box::new(CurlCommand));
    registry.register(Box::new(MountCommand));
    registry.register(Box::new(UmountCommand));
}

/// Register permission, link and usage commands.
pub fn register_admin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(ChmodCommand));
    registry.register(Box::new(ChownCommand));
    registry.register(Box::new(DfCommand));
    registry.register(Box::new(DuCommand));
    registry.register(Box::new(LnCommand));
    registry.register(Box::new(QuotaCommand));
    registry.register(Box::new(EchoCommand));
    registry.register(Box::new(HistoryCommand));
}

/// Registry with every built-in command.
pub fn create_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_shell_commands(&mut registry);
    register_simulated_commands(&mut registry);
    register_admin_commands(&mut registry);
    registry
}
