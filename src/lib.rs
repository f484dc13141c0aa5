//! terminal-os - A simulated multi-user shell over an in-memory file system
//!
//! The library holds the virtual file system engine (entries, link
//! resolution, permission bits, usage accounting, snapshots), per-window
//! session state machines, and the command dispatcher that connects them.

pub mod commands;
pub mod config;
pub mod fs;
pub mod session;
pub mod terminal;
pub mod users;
pub mod world;

pub use commands::Dispatcher;
pub use config::{Config, ConfigError};
pub use session::{AuthState, Session};
pub use terminal::{Key, Terminal};
pub use users::{UserRecord, UserTable};
pub use world::World;
