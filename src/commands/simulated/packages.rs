use crate::commands::{Command, CommandContext, CommandResult};

const REGISTRY: &[(&str, &str, &str)] = &[
    ("editor", "2.1.0", "A small modal text editor"),
    ("htop", "3.2.2", "Interactive process viewer"),
    ("netcat", "1.10", "TCP/IP swiss army knife"),
    ("python", "3.11.4", "Python interpreter"),
    ("rustc", "1.72.0", "The Rust compiler"),
    ("tree", "2.1.1", "Recursive directory listing"),
];

pub struct PkgCommand;

impl Command for PkgCommand {
    fn name(&self) -> &'static str {
        "pkg"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let sub = ctx.args.first().map(String::as_str);
        let operand = ctx.args.get(1).map(String::as_str);
        match (sub, operand) {
            (Some("list"), _) => CommandResult::success(
                REGISTRY.iter().map(|(name, version, _)| format!("{:<10} {}", name, version)).collect(),
            ),
            (Some("search"), Some(term)) => {
                let hits: Vec<String> = REGISTRY
                    .iter()
                    .filter(|(name, _, desc)| name.contains(term) || desc.to_lowercase().contains(&term.to_lowercase()))
                    .map(|(name, _, desc)| format!("{} - {}", name, desc))
                    .collect();
                if hits.is_empty() {
                    return CommandResult::line(format!("No packages found matching '{}'", term));
                }
                CommandResult::success(hits)
            }
            (Some("install"), Some(name)) => match REGISTRY.iter().find(|(n, _, _)| *n == name) {
                Some((n, version, _)) => CommandResult::success(vec![
                    format!("Fetching {}-{}...", n, version),
                    format!("Installed {} {}", n, version),
                ]),
                None => CommandResult::error(format!("pkg: package '{}' not found", name)),
            },
            (Some(cmd @ ("search" | "install")), None) => {
                CommandResult::error(format!("pkg: {}: missing package name", cmd))
            }
            _ => CommandResult::error("usage: pkg list | search TERM | install NAME"),
        }
    }
}
