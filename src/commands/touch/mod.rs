// src/commands/touch/mod.rs
use crate::commands::utils::describe;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{parent_and_name, Entry, FsError};

pub struct TouchCommand;

impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let file = match ctx.args.first() {
            Some(file) => file.clone(),
            None => return CommandResult::error("touch: missing file operand"),
        };

        let owner = ctx.user();
        let cwd = ctx.cwd();
        let tree = &mut ctx.world.tree;
        let created = parent_and_name(tree, cwd, &file)
            .and_then(|(parent, name)| tree.insert(parent, Entry::file(&name, &owner, Vec::new())));

        match created {
            // An existing entry is left as it is; a File's size is always
            // derived from its content.
            Ok(_) | Err(FsError::NameConflict { .. }) => CommandResult::ok(),
            Err(e) => CommandResult::error(format!("touch: cannot touch '{}': {}", file, describe(&e))),
        }
    }
}
