use crate::commands::{Command, CommandContext, CommandResult};

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        CommandResult::line(ctx.user())
    }
}
