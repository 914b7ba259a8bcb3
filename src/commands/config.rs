//! Config command - show configuration location or contents

use crate::{PhotoEaseError, cli::ConfigCommands, config::PhotoEaseConfig};

type Result<T> = std::result::Result<T, PhotoEaseError>;

/// Execute a config subcommand against the effective configuration
///
/// # Errors
///
/// Returns `PhotoEaseError` if the config path cannot be determined or the
/// configuration cannot be serialized.
pub fn execute(config: &PhotoEaseConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", PhotoEaseConfig::config_path()?.display());
        }
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| PhotoEaseError::InvalidInput(format!("Cannot render config: {e}")))?;
            print!("{rendered}");
            println!("# favorites database: {}", config.resolve_database_path()?.display());
        }
    }
    Ok(())
}
