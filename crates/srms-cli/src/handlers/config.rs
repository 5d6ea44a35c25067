//! Config command handler

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat};
use crate::config::Config;
use crate::error::{ErrorContext, Result};
use crate::output::OutputWriter;
use tracing::{info, instrument};

/// Handle the config command
#[instrument(skip(config, output))]
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init) => {
            if init.path.exists() && !init.force {
                output.warning(&format!(
                    "Config file already exists: {} (use --force to overwrite)",
                    init.path.display()
                ))?;
                return Ok(());
            }

            Config::default()
                .save(&init.path)
                .context("Failed to write config file")?;
            info!(path = %init.path.display(), "Wrote default configuration");
            output.success(&format!("Created config file: {}", init.path.display()))?;
        }
        ConfigAction::Show(show) => {
            let mut effective = config.clone();
            effective.operations = config.header_requirements();

            let rendered = match show.format {
                ConfigFormat::Toml => toml::to_string_pretty(&effective)?,
                ConfigFormat::Json => serde_json::to_string_pretty(&effective)?,
                ConfigFormat::Yaml => serde_yaml::to_string(&effective)?,
            };
            output.write(&rendered)?;
            if !rendered.ends_with('\n') {
                output.writeln("")?;
            }
        }
        ConfigAction::Path => {
            output.section("Configuration search paths")?;
            for path in Config::default_config_paths() {
                let marker = if path.exists() { "✓" } else { " " };
                output.writeln(&format!("  [{}] {}", marker, path.display()))?;
            }
        }
    }

    Ok(())
}
