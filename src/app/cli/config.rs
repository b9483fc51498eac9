//! TOML configuration file parsing and loading
//!
//! This module handles loading and parsing of TOML configuration files,
//! including default config file discovery and validation of config values.

use std::path::PathBuf;

use crate::generator::types::GenerationMode;

use super::args::Args;

const CONFIG_DIR_NAME: &str = "Buildver";
const CONFIG_FILE_NAME: &str = "buildver.toml";

impl Args {
    /// Load the configuration file and fold its values into `args`.
    ///
    /// An explicitly given file must exist; the default location is used only
    /// when present. Configuration errors are fatal at startup.
    pub fn parse_config_file(args: &mut Self, config_file: Option<PathBuf>) {
        let config_path = match config_file {
            Some(path) => {
                // User specified a config file - it must exist
                if !path.exists() {
                    eprintln!(
                        "Error: The specified configuration file does not exist: {}",
                        path.display()
                    );
                    std::process::exit(1);
                }
                Some(path)
            }
            None => {
                // Use default config path if it exists
                let default_path =
                    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
                match default_path {
                    Some(path) if path.exists() => Some(path),
                    _ => None, // No config file to load
                }
            }
        };

        if let Some(path) = config_path {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match contents.parse::<toml::Table>() {
                    Ok(config) => {
                        if let Err(e) = Self::apply_toml_values(args, &config) {
                            eprintln!(
                                "Error in configuration file {}: {}",
                                path.display(),
                                e
                            );
                            std::process::exit(1);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error parsing configuration file {}: {}", path.display(), e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("Error reading configuration file {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
    }

    /// Apply TOML configuration values to Args. CLI values win, so only
    /// fields still unset are filled in.
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> Result<(), String> {
        if args.mode.is_none() {
            if let Some(value) = config.get("mode") {
                let mode_str = value.as_str().ok_or("'mode' must be a string")?;
                args.mode = Some(match mode_str {
                    "simple" => GenerationMode::Simple,
                    "tracked" => GenerationMode::Tracked,
                    other => {
                        return Err(format!(
                            "invalid mode '{}', expected 'simple' or 'tracked'",
                            other
                        ))
                    }
                });
            }
        }

        Self::apply_path_field(config, "target-dir", &mut args.target_dir)?;
        Self::apply_path_field(config, "template-dir", &mut args.template_dir)?;
        Self::apply_path_field(config, "search-root", &mut args.search_root)?;
        Self::apply_path_field(config, "manifest", &mut args.manifest)?;
        Self::apply_path_field(config, "log-file", &mut args.log_file)?;
        Self::apply_string_field(config, "class-name", &mut args.class_name)?;
        Self::apply_string_field(config, "bundle-identifier", &mut args.bundle_id)?;
        Self::apply_string_field(config, "log-level", &mut args.log_level)?;
        Self::apply_string_field(config, "log-format", &mut args.log_format)?;

        if let Some(level) = &args.log_level {
            let valid = ["trace", "debug", "info", "warn", "error", "off"];
            if !valid.contains(&level.as_str()) {
                return Err(format!("invalid log-level '{}'", level));
            }
        }
        if let Some(format) = &args.log_format {
            let valid = ["text", "ext", "json"];
            if !valid.contains(&format.as_str()) {
                return Err(format!("invalid log-format '{}'", format));
            }
        }

        Ok(())
    }

    fn apply_string_field(
        config: &toml::Table,
        key: &str,
        target: &mut Option<String>,
    ) -> Result<(), String> {
        if target.is_none() {
            if let Some(value) = config.get(key) {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("'{}' must be a string", key))?;
                *target = Some(s.to_string());
            }
        }
        Ok(())
    }

    fn apply_path_field(
        config: &toml::Table,
        key: &str,
        target: &mut Option<PathBuf>,
    ) -> Result<(), String> {
        if target.is_none() {
            if let Some(value) = config.get(key) {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("'{}' must be a string path", key))?;
                *target = Some(PathBuf::from(s));
            }
        }
        Ok(())
    }
}
