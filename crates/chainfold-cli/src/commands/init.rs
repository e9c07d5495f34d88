use crate::cli::InitArgs;
use crate::config::{DefaultsConfig, FileConfig};
use crate::error::{CliError, Result};
use tracing::info;

pub fn run(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::Argument(format!(
            "'{}' already exists. Use --force to overwrite it.",
            args.path.display()
        )));
    }

    let content = FileConfig::from(&DefaultsConfig::default()).to_toml()?;
    info!("Writing default configuration to {:?}", &args.path);
    std::fs::write(&args.path, content)?;

    println!("✓ Default configuration written to: {}", args.path.display());
    Ok(())
}
