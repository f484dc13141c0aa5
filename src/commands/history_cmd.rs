use crate::commands::{Command, CommandContext, CommandResult};

pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let history = ctx.session.history();
        let count = match ctx.args.first() {
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) => n.min(history.len()),
                Err(_) => return CommandResult::error(format!("history: {}: numeric argument required", arg)),
            },
            None => history.len(),
        };

        let start = history.len().saturating_sub(count);
        let lines = history
            .iter()
            .enumerate()
            .skip(start)
            .map(|(i, cmd)| format!("{:5}  {}", i + 1, cmd))
            .collect();
        CommandResult::success(lines)
    }
}
