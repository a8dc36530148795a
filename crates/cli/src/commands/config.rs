use anyhow::Result;

use crate::cli::ConfigArgs;

pub fn config_command(args: &ConfigArgs) -> Result<()> {
    let config = args.resolve(None)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
