use crate::commands::utils::describe;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{resolve_path, Resolved, UsageReport};

/// `quota DIR [BYTES|none]`: show, set or clear a directory's advisory limit.
pub struct QuotaCommand;

impl Command for QuotaCommand {
    fn name(&self) -> &'static str {
        "quota"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let dir_arg = match ctx.args.first() {
            Some(dir) => dir.clone(),
            None => return CommandResult::error("quota: missing operand"),
        };
        let limit = match ctx.args.get(1).map(String::as_str) {
            None => None,
            Some("none") => Some(None),
            Some(bytes) => match bytes.parse::<u64>() {
                Ok(n) => Some(Some(n)),
                Err(_) => return CommandResult::error(format!("quota: invalid size: '{}'", bytes)),
            },
        };

        let cwd = ctx.cwd();
        let tree = &mut ctx.world.tree;
        let dir = match resolve_path(tree, cwd, &dir_arg) {
            Ok(Resolved::Directory(dir)) => dir,
            Ok(Resolved::File(_)) => return CommandResult::error(format!("quota: {}: Not a directory", dir_arg)),
            Err(e) => return CommandResult::error(format!("quota: {}: {}", dir_arg, describe(&e))),
        };

        if let Some(limit) = limit {
            if let Err(e) = tree.set_quota(dir, limit) {
                return CommandResult::error(format!("quota: {}: {}", dir_arg, describe(&e)));
            }
            tracing::debug!(dir = %tree.path_of(dir), ?limit, "quota updated");
        }

        let report = UsageReport::for_dir(tree, dir);
        match report.quota {
            Some(q) => CommandResult::line(format!("{}: {} of {} bytes used", report.path, report.used, q)),
            None => CommandResult::line(format!("{}: no quota ({} bytes used)", report.path, report.used)),
        }
    }
}
