use super::print_json;
use crate::types::OutputFormat;
use crate::views::ChemistryViewModel;
use anyhow::Result;
use celltrace_types::POLICY_TABLE;

pub fn handle(format: OutputFormat) -> Result<()> {
    let model = ChemistryViewModel {
        chemistries: POLICY_TABLE.iter().collect(),
    };

    match format {
        OutputFormat::Json => print_json(&model)?,
        OutputFormat::Plain => print!("{}", model),
    }

    Ok(())
}
