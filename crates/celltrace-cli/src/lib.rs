// celltrace CLI
//
// Sessions are recorded elsewhere (an acquisition loop drives `BenchMonitor`
// and persists `SessionRecord`s); this binary only reads stored records and
// replays them through the engine. Nothing here mutates a recorded session.

mod args;
mod commands;
mod handlers;
pub mod types;
pub mod views;

pub use args::{ChemistryCommand, Cli, Commands, ConfigCommand, SessionCommand};
pub use commands::run;
