use super::print_json;
use crate::types::OutputFormat;
use anyhow::Result;
use celltrace_runtime::Config;
use std::path::Path;

pub fn show(config_path: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load_from(config_path)?;

    match format {
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Plain => {
            println!("# {}", config_path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

pub fn set_bench(config_path: &Path, name: String, group: String) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    config.set_bench(name, group);
    config.save_to(config_path)?;

    log::info!("updated bench in {}", config_path.display());
    println!(
        "Bench set to {} (group {})",
        config.bench.name, config.bench.group
    );
    Ok(())
}
