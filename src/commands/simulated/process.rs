use chrono::Local;
use rand::Rng;

use crate::commands::{Command, CommandContext, CommandResult};

struct Process {
    pid: u32,
    user: &'static str,
    command: &'static str,
}

const PROCESSES: &[Process] = &[
    Process { pid: 1, user: "root", command: "init" },
    Process { pid: 42, user: "root", command: "syslogd" },
    Process { pid: 77, user: "root", command: "crond" },
    Process { pid: 101, user: "root", command: "sshd" },
    Process { pid: 230, user: "admin", command: "httpd" },
    Process { pid: 314, user: "guest", command: "tosh" },
];

fn find(pid: u32) -> Option<&'static Process> {
    PROCESSES.iter().find(|p| p.pid == pid)
}

pub struct PsCommand;

impl Command for PsCommand {
    fn name(&self) -> &'static str {
        "ps"
    }

    fn execute(&self, _ctx: &mut CommandContext<'_>) -> CommandResult {
        let mut lines = vec![format!("{:>5} {:<8} {}", "PID", "USER", "COMMAND")];
        lines.extend(PROCESSES.iter().map(|p| format!("{:>5} {:<8} {}", p.pid, p.user, p.command)));
        CommandResult::success(lines)
    }
}

pub struct KillCommand;

impl Command for KillCommand {
    fn name(&self) -> &'static str {
        "kill"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let arg = match ctx.args.iter().find(|a| !a.starts_with('-')) {
            Some(arg) => arg,
            None => return CommandResult::error("kill: usage: kill PID"),
        };
        let pid = match arg.parse::<u32>() {
            Ok(pid) => pid,
            Err(_) => return CommandResult::error(format!("kill: {}: arguments must be process ids", arg)),
        };
        match find(pid) {
            Some(p) => CommandResult::line(format!("Sent SIGTERM to {} ({})", p.pid, p.command)),
            None => CommandResult::error(format!("kill: ({}) - No such process", pid)),
        }
    }
}

pub struct TopCommand;

impl Command for TopCommand {
    fn name(&self) -> &'static str {
        "top"
    }

    fn execute(&self, _ctx: &mut CommandContext<'_>) -> CommandResult {
        let mut rng = rand::thread_rng();
        let mut lines = vec![
            format!("top - {}  {} tasks", Local::now().format("%H:%M:%S"), PROCESSES.len()),
            format!("{:>5} {:<8} {:>5} {:>5} {}", "PID", "USER", "%CPU", "%MEM", "COMMAND"),
        ];
        for p in PROCESSES {
            let cpu: f64 = rng.gen_range(0.0..25.0);
            let mem: f64 = rng.gen_range(0.1..5.0);
            lines.push(format!("{:>5} {:<8} {:>5.1} {:>5.1} {}", p.pid, p.user, cpu, mem, p.command));
        }
        CommandResult::success(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{fixture, run};

    #[test]
    fn test_ps_table() {
        let (mut world, mut session) = fixture();
        let result = run(&PsCommand, &[], &mut world, &mut session);
        assert_eq!(result.lines.len(), PROCESSES.len() + 1);
        assert!(result.lines[1].contains("init"));
    }

    #[test]
    fn test_kill_lookup() {
        let (mut world, mut session) = fixture();
        let result = run(&KillCommand, &["42"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["Sent SIGTERM to 42 (syslogd)"]);
        let result = run(&KillCommand, &["9999"], &mut world, &mut session);
        assert_eq!(result.lines, vec!["kill: (9999) - No such process"]);
        let result = run(&KillCommand, &["abc"], &mut world, &mut session);
        assert!(result.failed);
    }

    #[test]
    fn test_top_has_row_per_process() {
        let (mut world, mut session) = fixture();
        let result = run(&TopCommand, &[], &mut world, &mut session);
        assert!(result.lines[0].starts_with("top - "));
        assert_eq!(result.lines.len(), PROCESSES.len() + 2);
    }
}
