use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use terminal_os::{Config, Terminal, World};

#[derive(Parser)]
#[command(name = "terminal-os")]
#[command(about = "A simulated multi-user shell over an in-memory file system")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Snapshot file used by `save` and `load`
    #[arg(long = "snapshot")]
    snapshot: Option<PathBuf>,

    /// Load the snapshot before the first prompt
    #[arg(long = "load")]
    load: bool,

    /// Number of windows to open at start
    #[arg(long = "windows", default_value_t = 1)]
    windows: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = snapshot;
    }

    let mut world = World::new(config);
    if cli.load {
        if let Err(e) = world.load(None) {
            error!(error = %e, "initial load failed, starting with the default tree");
        }
    }

    let mut terminal = Terminal::new(world);
    for _ in 1..cli.windows.max(1) {
        terminal.open_window();
    }
    terminal.switch_to(0);
    info!(windows = terminal.window_count(), "terminal started");

    run(&mut terminal);
}

/// Line-oriented front end: each stdin line is typed into the active window.
/// `:new`, `:win N` and `:quit` control windows.
fn run(terminal: &mut Terminal) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut shown = vec![0u64; terminal.window_count()];

    loop {
        let active = terminal.active_index();
        if shown.len() < terminal.window_count() {
            shown.resize(terminal.window_count(), 0);
        }
        let session = terminal.active_session();
        let output = session.output();
        // Only the tail of the buffer is new; lines dropped or cleared before
        // they were shown are skipped.
        let fresh = session.lines_printed().saturating_sub(shown[active]);
        let start = output.len().saturating_sub(usize::try_from(fresh).unwrap_or(usize::MAX));
        for line in &output[start..] {
            let _ = writeln!(stdout, "{}", line);
        }
        shown[active] = session.lines_printed();

        let _ = write!(stdout, "[{}] {}", active, terminal.prompt());
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "stdin read failed");
                break;
            }
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match line.trim() {
            ":quit" => break,
            ":new" => {
                terminal.open_window();
            }
            meta if meta.starts_with(":win ") => {
                let switched = meta[5..].trim().parse().map_or(false, |n| terminal.switch_to(n));
                if !switched {
                    let _ = writeln!(stdout, "no such window: {}", &meta[5..]);
                }
            }
            _ => terminal.submit_line(line),
        }
    }
    let _ = writeln!(stdout);
}
