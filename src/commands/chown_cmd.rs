use crate::commands::utils::describe;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::resolve_path;

pub struct ChownCommand;

impl Command for ChownCommand {
    fn name(&self) -> &'static str {
        "chown"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        if ctx.args.len() < 2 {
            return CommandResult::error("chown: missing operand");
        }
        let spec = ctx.args[0].clone();
        let file = ctx.args[1].clone();

        // Groups are not modelled; anything after ':' is accepted and dropped.
        let owner = spec.split(':').next().unwrap_or_default();
        if !ctx.world.users.contains(owner) {
            return CommandResult::error(format!("chown: invalid user: '{}'", spec));
        }

        let cwd = ctx.cwd();
        let tree = &mut ctx.world.tree;
        match resolve_path(tree, cwd, &file) {
            Ok(resolved) => {
                tree.get_mut(resolved.id()).owner = owner.to_string();
                CommandResult::ok()
            }
            Err(e) => CommandResult::error(format!("chown: cannot access '{}': {}", file, describe(&e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{fixture, run};
    use crate::fs::Entry;

    #[test]
    fn test_chown_sets_owner() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        let f = world.tree.insert(cwd, Entry::file("f", "guest", vec![])).unwrap();
        let result = run(&ChownCommand, &["admin:staff", "f"], &mut world, &mut session);
        assert!(!result.failed);
        assert_eq!(world.tree.get(f).owner, "admin");
    }

    #[test]
    fn test_chown_follows_hardlink() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        let f = world.tree.insert(cwd, Entry::file("f", "guest", vec![])).unwrap();
        let h = world.tree.insert(cwd, Entry::hardlink("h", "guest", f)).unwrap();
        run(&ChownCommand, &["root", "h"], &mut world, &mut session);
        assert_eq!(world.tree.get(f).owner, "root");
        assert_eq!(world.tree.get(h).owner, "guest");
    }

    #[test]
    fn test_chown_errors() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        world.tree.insert(cwd, Entry::file("f", "guest", vec![])).unwrap();
        assert_eq!(
            run(&ChownCommand, &["mallory", "f"], &mut world, &mut session).lines,
            vec!["chown: invalid user: 'mallory'"]
        );
        assert_eq!(run(&ChownCommand, &["root"], &mut world, &mut session).lines, vec!["chown: missing operand"]);
        assert_eq!(
            run(&ChownCommand, &["root", "nope"], &mut world, &mut session).lines,
            vec!["chown: cannot access 'nope': No such file or directory"]
        );
    }
}
