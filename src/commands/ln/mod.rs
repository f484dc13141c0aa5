// src/commands/ln/mod.rs
use crate::commands::utils::{describe, split_flags};
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{lookup_path, parent_and_name, resolve, Entry, EntryId, FsError, Resolved, Tree};

pub struct LnCommand;

/// The File a new hardlink should alias. Links in the target are followed so
/// every hardlink points straight at a File.
fn hardlink_source(tree: &Tree, cwd: EntryId, target: &str) -> Result<EntryId, String> {
    let entry = lookup_path(tree, cwd, target)
        .map_err(|e| format!("ln: failed to access '{}': {}", target, describe(&e)))?;
    match resolve(tree, entry, cwd) {
        Ok(Resolved::File(file)) => Ok(file),
        Ok(Resolved::Directory(_)) => Err(format!("ln: '{}': hard link not allowed for directory", target)),
        Err(e) => Err(format!("ln: failed to access '{}': {}", target, describe(&e))),
    }
}

impl Command for LnCommand {
    fn name(&self) -> &'static str {
        "ln"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let (flags, operands) = split_flags(&ctx.args);
        let mut symbolic = false;
        for flag in flags {
            match flag {
                "-s" => symbolic = true,
                _ => return CommandResult::error(format!("ln: invalid option -- '{}'", &flag[1..])),
            }
        }
        if operands.len() < 2 {
            return CommandResult::error("ln: missing file operand");
        }
        let (target, link) = (operands[0].to_string(), operands[1].to_string());

        let owner = ctx.user();
        let cwd = ctx.cwd();
        let tree = &mut ctx.world.tree;

        let entry = if symbolic {
            // Stored verbatim; a dangling target is only noticed on use.
            Entry::symlink("", &owner, &target)
        } else {
            match hardlink_source(tree, cwd, &target) {
                Ok(file) => Entry::hardlink("", &owner, file),
                Err(message) => return CommandResult::error(message),
            }
        };

        let created = parent_and_name(tree, cwd, &link).and_then(|(parent, name)| {
            let mut entry = entry;
            entry.name = name;
            tree.insert(parent, entry)
        });

        match created {
            Ok(_) => CommandResult::ok(),
            Err(e @ FsError::NameConflict { .. }) => {
                let kind = if symbolic { "symbolic link" } else { "hard link" };
                CommandResult::error(format!("ln: failed to create {} '{}': {}", kind, link, describe(&e)))
            }
            Err(e) => CommandResult::error(format!("ln: cannot create '{}': {}", link, describe(&e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{fixture, run};
    use crate::fs::resolve_path;
    use crate::fs::usage::subtree_size;

    #[test]
    fn test_ln_symbolic_stores_target_verbatim() {
        let (mut world, mut session) = fixture();
        let result = run(&LnCommand, &["-s", "missing", "dangling"], &mut world, &mut session);
        assert!(!result.failed);
        let id = lookup_path(&world.tree, session.cwd(), "dangling").unwrap();
        match &world.tree.get(id).kind {
            crate::fs::EntryKind::Symlink { target } => assert_eq!(target, "missing"),
            other => panic!("expected symlink, got {:?}", other),
        }
        assert!(matches!(
            resolve_path(&world.tree, session.cwd(), "dangling"),
            Err(FsError::Unresolved { .. })
        ));
    }

    #[test]
    fn test_ln_hard_shares_content_and_counts_once() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        let a = world.tree.insert(cwd, Entry::file("a", "guest", b"hello".to_vec())).unwrap();
        run(&LnCommand, &["a", "b"], &mut world, &mut session);
        let b = lookup_path(&world.tree, cwd, "b").unwrap();
        assert!(world.tree.get(b).is_hardlink());
        assert_eq!(resolve_path(&world.tree, cwd, "b").unwrap(), Resolved::File(a));
        assert_eq!(subtree_size(&world.tree, cwd), 5);
    }

    #[test]
    fn test_ln_hard_through_symlink_points_at_file() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        let a = world.tree.insert(cwd, Entry::file("a", "guest", vec![])).unwrap();
        world.tree.insert(cwd, Entry::symlink("s", "guest", "a")).unwrap();
        run(&LnCommand, &["s", "h"], &mut world, &mut session);
        let h = lookup_path(&world.tree, cwd, "h").unwrap();
        assert!(matches!(world.tree.get(h).kind, crate::fs::EntryKind::Hardlink { file } if file == a));
    }

    #[test]
    fn test_ln_errors() {
        let (mut world, mut session) = fixture();
        let cwd = session.cwd();
        world.tree.insert(cwd, Entry::directory("d", "guest")).unwrap();
        world.tree.insert(cwd, Entry::file("f", "guest", vec![])).unwrap();
        assert_eq!(
            run(&LnCommand, &["d", "x"], &mut world, &mut session).lines,
            vec!["ln: 'd': hard link not allowed for directory"]
        );
        assert_eq!(
            run(&LnCommand, &["-s", "f", "d"], &mut world, &mut session).lines,
            vec!["ln: failed to create symbolic link 'd': File exists"]
        );
        assert_eq!(
            run(&LnCommand, &["f", "d"], &mut world, &mut session).lines,
            vec!["ln: failed to create hard link 'd': File exists"]
        );
        assert_eq!(run(&LnCommand, &["f"], &mut world, &mut session).lines, vec!["ln: missing file operand"]);
    }

    #[test]
    fn test_ln_symlink_cycle_is_unresolved() {
        let (mut world, mut session) = fixture();
        run(&LnCommand, &["-s", "x", "y"], &mut world, &mut session);
        run(&LnCommand, &["-s", "y", "x"], &mut world, &mut session);
        let cwd = session.cwd();
        assert!(matches!(resolve_path(&world.tree, cwd, "x"), Err(FsError::Unresolved { .. })));
        assert!(matches!(resolve_path(&world.tree, cwd, "y"), Err(FsError::Unresolved { .. })));
    }
}
