// src/commands/utils/mod.rs
use crate::fs::FsError;

/// Shell-style reason text for a file system error.
pub fn describe(err: &FsError) -> &'static str {
    match err {
        FsError::NameConflict { .. } => "File exists",
        FsError::NotFound { .. } => "No such file or directory",
        FsError::NotADirectory { .. } => "Not a directory",
        FsError::IsADirectory { .. } => "Is a directory",
        FsError::NotAFile { .. } => "Not a regular file",
        FsError::Unresolved { .. } => "Unresolved symbolic link",
    }
}

/// Byte count with a K/M/G suffix once it passes 1024.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return bytes.to_string();
    }
    if bytes < 1024 * 1024 {
        return format!("{:.1}K", bytes as f64 / 1024.0);
    }
    if bytes < 1024 * 1024 * 1024 {
        return format!("{:.1}M", bytes as f64 / (1024.0 * 1024.0));
    }
    format!("{:.1}G", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

/// Split leading `-x` style flags from operands. `--` ends flag parsing.
pub fn split_flags(args: &[String]) -> (Vec<&str>, Vec<&str>) {
    let mut flags = Vec::new();
    let mut operands = Vec::new();
    let mut only_operands = false;
    for arg in args {
        if only_operands {
            operands.push(arg.as_str());
        } else if arg == "--" {
            only_operands = true;
        } else if arg.starts_with('-') && arg.len() > 1 {
            flags.push(arg.as_str());
        } else {
            operands.push(arg.as_str());
        }
    }
    (flags, operands)
}
