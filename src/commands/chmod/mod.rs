// src/commands/chmod/mod.rs
use crate::commands::utils::{describe, split_flags};
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::mode::parse_mode;
use crate::fs::resolve_path;

pub struct ChmodCommand;

impl Command for ChmodCommand {
    fn name(&self) -> &'static str {
        "chmod"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        // Symbolic modes such as `-x` look like flags; only `-v` is one.
        let mut verbose = false;
        let mut operands: Vec<&str> = Vec::new();
        let (flags, rest) = split_flags(&ctx.args);
        for flag in flags {
            if flag == "-v" {
                verbose = true;
            } else {
                operands.push(flag);
            }
        }
        operands.extend(rest);

        if operands.len() < 2 {
            return CommandResult::error("chmod: missing operand");
        }
        let (mode_arg, file) = (operands[0].to_string(), operands[1].to_string());

        let cwd = ctx.cwd();
        let tree = &mut ctx.world.tree;
        let id = match resolve_path(tree, cwd, &file) {
            Ok(resolved) => resolved.id(),
            Err(e) => return CommandResult::error(format!("chmod: cannot access '{}': {}", file, describe(&e))),
        };

        let old = tree.get(id).mode;
        let new = match parse_mode(&mode_arg, old) {
            Ok(mode) => mode,
            Err(e) => return CommandResult::error(format!("chmod: {}", e)),
        };
        tree.get_mut(id).mode = new;

        if verbose {
            return CommandResult::line(format!("mode of '{}' changed from {:04o} to {:04o}", file, old, new));
        }
        CommandResult::ok()
    }
}
