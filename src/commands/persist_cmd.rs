use std::path::Path;

use tracing::error;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct SaveCommand;

impl Command for SaveCommand {
    fn name(&self) -> &'static str {
        "save"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let target = ctx.args.first().map(Path::new);
        match ctx.world.save(target) {
            Ok(path) => CommandResult::line(format!("Filesystem saved to {}", path.display())),
            Err(e) => {
                error!(error = %e, "save failed");
                CommandResult::error(format!("save: {}", e))
            }
        }
    }
}

pub struct LoadCommand;

impl Command for LoadCommand {
    fn name(&self) -> &'static str {
        "load"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let target = ctx.args.first().map(Path::new);
        match ctx.world.load(target) {
            Ok(path) => {
                ctx.session.sync(ctx.world);
                CommandResult::line(format!("Filesystem loaded from {}", path.display()))
            }
            Err(e) => {
                error!(error = %e, "load failed");
                CommandResult::error(format!("load: {}", e))
            }
        }
    }
}
