use super::print_json;
use crate::types::OutputFormat;
use anyhow::Result;
use celltrace_runtime::SessionStore;

pub fn handle(store: &SessionStore, format: OutputFormat) -> Result<()> {
    let names = store.list()?;

    match format {
        OutputFormat::Json => print_json(&names)?,
        OutputFormat::Plain => {
            if names.is_empty() {
                println!("No sessions in {}", store.root().display());
                println!("Import one with: celltrace session import <file>");
                return Ok(());
            }
            for name in &names {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
