use crate::commands::utils::{describe, split_flags};
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::usage::{entry_size, UsageReport};
use crate::fs::{resolve_path, Resolved};

pub struct DuCommand;

impl Command for DuCommand {
    fn name(&self) -> &'static str {
        "du"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let (flags, operands) = split_flags(&ctx.args);
        let mut summarize = false;
        for flag in flags {
            match flag {
                "-s" => summarize = true,
                _ => return CommandResult::error(format!("du: invalid option -- '{}'", &flag[1..])),
            }
        }
        let path = operands.first().copied().unwrap_or("");
        let label = if path.is_empty() { "." } else { path };

        let tree = &ctx.world.tree;
        let dir = match resolve_path(tree, ctx.session.cwd(), path) {
            Ok(Resolved::Directory(dir)) => dir,
            Ok(Resolved::File(file)) => return CommandResult::line(format!("{}\t{}", entry_size(tree, file), label)),
            Err(e) => return CommandResult::error(format!("du: cannot access '{}': {}", label, describe(&e))),
        };

        let mut lines = Vec::new();
        if !summarize {
            for (name, child) in tree.children(dir) {
                if tree.get(child).is_directory() {
                    lines.push(format!("{}\t{}/{}", entry_size(tree, child), label, name));
                }
            }
        }

        let report = UsageReport::for_dir(tree, dir);
        lines.push(format!("{}\t{}", report.used, label));
        if let Some(quota) = report.quota {
            lines.push(format!("quota: {} of {} bytes used", report.used, quota));
        }
        CommandResult::success(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{fixture, run};
    use crate::fs::Entry;

    #[test]
    fn test_du_hardlinked_file_counted_once() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        let a = world.tree.insert(cwd, Entry::file("a", "guest", b"hello".to_vec())).unwrap();
        world.tree.insert(cwd, Entry::hardlink("b", "guest", a)).unwrap();
        world.tree.insert(cwd, Entry::symlink("s", "guest", "a")).unwrap();
        let result = run(&DuCommand, &[], &mut world, &mut session);
        assert_eq!(result.lines, vec!["5\t."]);
    }

    #[test]
    fn test_du_lists_child_directories() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        let docs = world.tree.insert(cwd, Entry::directory("docs", "guest")).unwrap();
        world.tree.insert(docs, Entry::file("x", "guest", b"abc".to_vec())).unwrap();
        world.tree.insert(cwd, Entry::file("y", "guest", b"de".to_vec())).unwrap();
        let result = run(&DuCommand, &[], &mut world, &mut session);
        assert_eq!(result.lines, vec!["3\t./docs", "5\t."]);
        let result = run(&DuCommand, &["-s"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["5\t."]);
    }

    #[test]
    fn test_du_reports_quota() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        world.tree.insert(cwd, Entry::file("f", "guest", b"1234".to_vec())).unwrap();
        world.tree.set_quota(cwd, Some(10)).unwrap();
        let result = run(&DuCommand, &["-s"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["4\t.", "quota: 4 of 10 bytes used"]);
    }

    #[test]
    fn test_du_missing_path() {
        let (mut world, mut session) = fixture();
        let result = run(&DuCommand, &["nope"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["du: cannot access 'nope': No such file or directory"]);
    }
}
