// src/commands/echo/mod.rs
use crate::commands::utils::describe;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{parent_and_name, resolve_path, Entry, EntryId, FsError, Resolved, Tree};

pub struct EchoCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redirect {
    Truncate,
    Append,
}

/// Find the File a redirect writes to, creating an empty one when the name
/// is free. Links are followed so writes land on the shared content.
fn redirect_target(tree: &mut Tree, cwd: EntryId, path: &str, owner: &str) -> Result<EntryId, FsError> {
    match resolve_path(tree, cwd, path) {
        Ok(Resolved::File(id)) => Ok(id),
        Ok(Resolved::Directory(_)) => Err(FsError::IsADirectory { path: path.to_string() }),
        Err(FsError::NotFound { .. }) => {
            let (parent, name) = parent_and_name(tree, cwd, path)?;
            tree.insert(parent, Entry::file(&name, owner, Vec::new()))
        }
        Err(e) => Err(e),
    }
}

impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let split = ctx.args.iter().position(|a| a == ">" || a == ">>");
        let (words, redirect) = match split {
            None => (&ctx.args[..], None),
            Some(pos) => {
                let mode = if ctx.args[pos] == ">>" { Redirect::Append } else { Redirect::Truncate };
                match ctx.args.get(pos + 1) {
                    Some(file) if pos + 2 == ctx.args.len() => (&ctx.args[..pos], Some((mode, file.clone()))),
                    _ => return CommandResult::error("echo: syntax error near redirection"),
                }
            }
        };
        let text = words.join(" ");

        let (mode, file) = match redirect {
            None => return CommandResult::line(text),
            Some(r) => r,
        };

        let owner = ctx.user();
        let cwd = ctx.cwd();
        let tree = &mut ctx.world.tree;
        let data = format!("{}\n", text).into_bytes();
        let written = redirect_target(tree, cwd, &file, &owner).and_then(|id| match mode {
            Redirect::Truncate => tree.write_content(id, data),
            Redirect::Append => tree.append_content(id, &data),
        });

        match written {
            Ok(()) => CommandResult::ok(),
            Err(e) => CommandResult::error(format!("echo: {}: {}", file, describe(&e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{fixture, run};
    use crate::fs::lookup_path;

    #[test]
    fn test_echo_prints() {
        let (mut world, mut session) = fixture();
        let result = run(&EchoCommand, &["hello", "world"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["hello world"]);
    }

    #[test]
    fn test_echo_redirect_creates_and_appends() {
        let (mut world, mut session) = fixture();
        run(&EchoCommand, &["one", ">", "f"], &mut world, &mut session);
        run(&EchoCommand, &["two", ">>", "f"], &mut world, &mut session);
        let id = lookup_path(&world.tree, session.cwd(), "f").unwrap();
        assert_eq!(world.tree.content(id).unwrap(), b"one\ntwo\n");
        assert_eq!(world.tree.get(id).owner, "guest");

        run(&EchoCommand, &["three", ">", "f"], &mut world, &mut session);
        assert_eq!(world.tree.content(id).unwrap(), b"three\n");
    }

    #[test]
    fn test_echo_writes_through_links() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        let a = world.tree.insert(cwd, Entry::file("a", "guest", vec![])).unwrap();
        world.tree.insert(cwd, Entry::hardlink("h", "guest", a)).unwrap();
        world.tree.insert(cwd, Entry::symlink("s", "guest", "a")).unwrap();
        run(&EchoCommand, &["via-h", ">", "h"], &mut world, &mut session);
        run(&EchoCommand, &["via-s", ">>", "s"], &mut world, &mut session);
        assert_eq!(world.tree.content(a).unwrap(), b"via-h\nvia-s\n");
        assert_eq!(world.tree.list_names(cwd), vec!["a", "h", "s"]);
    }

    #[test]
    fn test_echo_ignores_quota() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        world.tree.set_quota(cwd, Some(1)).unwrap();
        let result = run(&EchoCommand, &["too", "big", ">", "f"], &mut world, &mut session);
        assert!(!result.failed);
    }

    #[test]
    fn test_echo_redirect_errors() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        world.tree.insert(cwd, Entry::directory("d", "guest")).unwrap();
        let result = run(&EchoCommand, &["x", ">", "d"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["echo: d: Is a directory"]);
        let result = run(&EchoCommand, &["x", ">"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["echo: syntax error near redirection"]);
        let result = run(&EchoCommand, &["x", ">", "no/such"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["echo: no/such: No such file or directory"]);
    }
}
