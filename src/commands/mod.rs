// src/commands/mod.rs
pub mod cat;
pub mod cd_cmd;
pub mod chmod;
pub mod chown_cmd;
pub mod clear_cmd;
pub mod df_cmd;
pub mod dispatcher;
pub mod du_cmd;
pub mod echo;
pub mod help_cmd;
pub mod history_cmd;
pub mod ln;
pub mod logout_cmd;
pub mod ls;
pub mod mkdir;
pub mod persist_cmd;
pub mod quota_cmd;
pub mod registry;
pub mod simulated;
pub mod touch;
pub mod types;
pub mod utils;
pub mod whoami_cmd;

pub use dispatcher::Dispatcher;
pub use registry::CommandRegistry;
pub use types::{Command, CommandContext, CommandResult};

#[cfg(test)]
pub(crate) mod test_support {
    use super::{Command, CommandContext, CommandResult};
    use crate::session::Session;
    use crate::world::World;

    /// Default world with `user` logged in at their home directory.
    pub fn fixture_as(user: &str) -> (World, Session) {
        let world = World::default();
        let mut session = Session::new(&world);
        session.authenticate(&world, user);
        (world, session)
    }

    pub fn fixture() -> (World, Session) {
        fixture_as("guest")
    }

    pub fn run(cmd: &dyn Command, args: &[&str], world: &mut World, session: &mut Session) -> CommandResult {
        let mut ctx = CommandContext {
            args: args.iter().map(|s| s.to_string()).collect(),
            session,
            world,
            elevated: false,
        };
        cmd.execute(&mut ctx)
    }
}
