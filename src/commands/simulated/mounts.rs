use crate::commands::{Command, CommandContext, CommandResult};

const MOUNTS: &[(&str, &str, &str)] = &[
    ("/dev/sda1", "/", "ext4"),
    ("tmpfs", "/tmp", "tmpfs"),
    ("proc", "/proc", "proc"),
    ("/dev/sdb1", "/mnt/data", "ext4"),
];

pub struct MountCommand;

impl Command for MountCommand {
    fn name(&self) -> &'static str {
        "mount"
    }

    fn execute(&self, _ctx: &mut CommandContext<'_>) -> CommandResult {
        CommandResult::success(
            MOUNTS
                .iter()
                .map(|(device, point, fs)| format!("{} on {} type {}", device, point, fs))
                .collect(),
        )
    }
}

pub struct UmountCommand;

impl Command for UmountCommand {
    fn name(&self) -> &'static str {
        "umount"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let point = match ctx.args.first() {
            Some(point) => point,
            None => return CommandResult::error("umount: missing mount point"),
        };
        if *point == "/" {
            return CommandResult::error("umount: /: target is busy");
        }
        match MOUNTS.iter().find(|(device, p, _)| p == point || device == point) {
            Some((_, p, _)) => CommandResult::line(format!("umount: {} unmounted", p)),
            None => CommandResult::error(format!("umount: {}: not mounted", point)),
        }
    }
}
