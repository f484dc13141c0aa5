// src/commands/cat/mod.rs
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{resolve_path, FsError, Resolved};

pub struct CatCommand;

impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let file = match ctx.args.first() {
            Some(file) => file,
            None => return CommandResult::error("cat: missing file operand"),
        };

        let tree = &ctx.world.tree;
        match resolve_path(tree, ctx.session.cwd(), file) {
            Ok(Resolved::File(id)) => {
                let text = String::from_utf8_lossy(tree.content(id).unwrap_or_default());
                let mut lines: Vec<String> = text.lines().map(String::from).collect();
                if lines.is_empty() {
                    lines.push(String::new());
                }
                CommandResult::success(lines)
            }
            Ok(Resolved::Directory(_)) => CommandResult::error(format!("cat: {}: Is a directory", file)),
            Err(FsError::Unresolved { .. }) => {
                CommandResult::error(format!("cat: {}: Unresolved symbolic link", file))
            }
            Err(_) => CommandResult::error(format!("cat: {}: No such file", file)),
        }
    }
}
