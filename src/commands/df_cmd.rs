use crate::commands::utils::{describe, format_size};
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{resolve_path, Resolved, Tree, UsageReport};

pub struct DfCommand;

fn row(report: &UsageReport) -> String {
    let quota = report.quota.map(format_size).unwrap_or_else(|| "-".to_string());
    let avail = report.available().map(format_size).unwrap_or_else(|| "-".to_string());
    let percent = report.percent_used().map(|p| format!("{}%", p)).unwrap_or_else(|| "-".to_string());
    format!("{:<20} {:>8} {:>8} {:>8} {:>5}", report.path, format_size(report.used), quota, avail, percent)
}

fn reports(tree: &Tree) -> Vec<UsageReport> {
    tree.directories()
        .into_iter()
        .filter(|dir| *dir == tree.root() || tree.quota(*dir).is_some())
        .map(|dir| UsageReport::for_dir(tree, dir))
        .collect()
}

impl Command for DfCommand {
    fn name(&self) -> &'static str {
        "df"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let tree = &ctx.world.tree;
        let selected = match ctx.args.first() {
            None => reports(tree),
            Some(path) => match resolve_path(tree, ctx.session.cwd(), path) {
                Ok(Resolved::Directory(dir)) => vec![UsageReport::for_dir(tree, dir)],
                Ok(Resolved::File(_)) => return CommandResult::error(format!("df: {}: Not a directory", path)),
                Err(e) => return CommandResult::error(format!("df: {}: {}", path, describe(&e))),
            },
        };

        let mut lines = vec![format!("{:<20} {:>8} {:>8} {:>8} {:>5}", "Directory", "Used", "Quota", "Avail", "Use%")];
        lines.extend(selected.iter().map(row));
        CommandResult::success(lines)
    }
}
