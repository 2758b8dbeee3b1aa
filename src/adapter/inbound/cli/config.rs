//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
///
/// Prints the effective configuration, defaults and environment overrides
/// applied, as TOML.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    println!("{}", render(&config)?);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");
    output::field("Project", display_or(&config.google.project_id, "(unset)"));
    output::field("Dry run", config.dry_run);
    output::field("Watching", &config.notifier.source_collection);
    output::field("Writing to", &config.notifier.notification_collection);
    output::field("Topic", &config.notifier.topic);
    Ok(())
}

fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| {
        ConfigError::InvalidValue {
            field: "config",
            reason: e.to_string(),
        }
        .into()
    })
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
