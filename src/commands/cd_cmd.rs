use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::FsError;

pub struct CdCommand;

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let home = || {
            let user = ctx.session.username().unwrap_or_default();
            ctx.world.users.get(user).map(|u| u.home_path.clone()).unwrap_or_else(|| "/".to_string())
        };
        let target = match ctx.args.first().map(String::as_str) {
            None | Some("~") => home(),
            Some(path) if path.starts_with("~/") => format!("{}/{}", home(), &path[2..]),
            Some(path) => path.to_string(),
        };

        match ctx.session.change_dir(&ctx.world.tree, &target) {
            Ok(()) => CommandResult::ok(),
            Err(FsError::NotADirectory { .. }) => {
                CommandResult::error(format!("cd: not a directory: {}", target))
            }
            Err(FsError::Unresolved { .. }) => {
                CommandResult::error(format!("cd: unresolved symbolic link: {}", target))
            }
            Err(_) => CommandResult::error(format!("cd: no such directory: {}", target)),
        }
    }
}
