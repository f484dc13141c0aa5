//! Simulated system commands.
//!
//! These produce plausible text from fixed tables or random numbers and never
//! touch the tree or the session beyond returning lines.

mod mounts;
mod network;
mod packages;
mod process;

pub use mounts::{MountCommand, UmountCommand};
pub use network::{CurlCommand, IfconfigCommand, PingCommand};
pub use packages::PkgCommand;
pub use process::{KillCommand, PsCommand, TopCommand};
