// src/commands/ls/mod.rs
use crate::commands::utils::{describe, split_flags};
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::mode::render;
use crate::fs::usage::entry_size;
use crate::fs::{lookup_path, EntryId, EntryKind, Tree};

pub struct LsCommand;

fn long_line(tree: &Tree, id: EntryId, name: &str) -> String {
    let entry = tree.get(id);
    let suffix = match &entry.kind {
        EntryKind::Symlink { target } => format!(" -> {}", target),
        EntryKind::Hardlink { file } => format!(" => {}", tree.get(*file).name),
        _ => String::new(),
    };
    format!(
        "{} {:<8} {:>6} {}{}",
        render(entry.type_glyph(), entry.mode),
        entry.owner,
        entry_size(tree, id),
        name,
        suffix
    )
}

impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let (flags, operands) = split_flags(&ctx.args);
        let mut long_format = false;
        for flag in flags {
            match flag {
                "-l" => long_format = true,
                _ => return CommandResult::error(format!("ls: invalid option -- '{}'", &flag[1..])),
            }
        }
        let target = operands.first().copied().unwrap_or("");

        let tree = &ctx.world.tree;
        let id = match lookup_path(tree, ctx.session.cwd(), target) {
            Ok(id) => id,
            Err(e) => {
                return CommandResult::error(format!("ls: cannot access '{}': {}", target, describe(&e)));
            }
        };

        // Only a real directory is listed; anything else names itself.
        if !tree.get(id).is_directory() {
            let line = if long_format { long_line(tree, id, target) } else { target.to_string() };
            return CommandResult::line(line);
        }

        let mut children: Vec<(&str, EntryId)> = tree.children(id).collect();
        children.sort_by(|a, b| a.0.cmp(b.0));

        if long_format {
            let lines = children.iter().map(|(name, child)| long_line(tree, *child, name)).collect();
            return CommandResult::success(lines);
        }
        let names: Vec<&str> = children.iter().map(|(name, _)| *name).collect();
        CommandResult::line(names.join("  "))
    }
}
