// src/commands/mkdir/mod.rs
use crate::commands::utils::describe;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{parent_and_name, Entry};

pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let dir = match ctx.args.first() {
            Some(dir) => dir.clone(),
            None => return CommandResult::error("mkdir: missing operand"),
        };

        let owner = ctx.user();
        let cwd = ctx.cwd();
        let tree = &mut ctx.world.tree;
        let created = parent_and_name(tree, cwd, &dir)
            .and_then(|(parent, name)| tree.insert(parent, Entry::directory(&name, &owner)));

        match created {
            Ok(_) => CommandResult::ok(),
            Err(e) => CommandResult::error(format!(
                "mkdir: cannot create directory '{}': {}",
                dir,
                describe(&e)
            )),
        }
    }
}
