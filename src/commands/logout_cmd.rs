use crate::commands::{Command, CommandContext, CommandResult};

pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        ctx.session.logout(ctx.world);
        CommandResult::line("Logged out.")
    }
}
