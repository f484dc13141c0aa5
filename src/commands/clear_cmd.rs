use crate::commands::{Command, CommandContext, CommandResult};

pub struct ClearCommand;

impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        ctx.session.clear_output();
        CommandResult::ok()
    }
}
