use crate::commands::{Command, CommandContext, CommandResult};

pub struct HelpCommand;

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Files", &["ls", "cd", "mkdir", "touch", "cat", "echo", "ln"]),
    ("Permissions", &["chmod", "chown", "sudo"]),
    ("Disk usage", &["df", "du", "quota", "mount", "umount"]),
    ("Processes", &["ps", "kill", "top"]),
    ("Packages & network", &["pkg", "ping", "ifconfig", "curl"]),
    ("Session", &["help", "clear", "history", "whoami", "logout", "save", "load"]),
];

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn execute(&self, _ctx: &mut CommandContext<'_>) -> CommandResult {
        let mut lines = vec!["Available commands:".to_string()];
        for (category, cmds) in CATEGORIES {
            lines.push(format!("  {}: {}", category, cmds.join(", ")));
        }
        CommandResult::success(lines)
    }
}
