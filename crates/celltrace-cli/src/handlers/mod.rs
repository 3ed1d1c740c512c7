pub mod chemistry;
pub mod config;
pub mod session_compare;
pub mod session_export;
pub mod session_import;
pub mod session_list;
pub mod session_stats;

use anyhow::Result;
use is_terminal::IsTerminal;
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn color_enabled() -> bool {
    std::io::stdout().is_terminal()
}
