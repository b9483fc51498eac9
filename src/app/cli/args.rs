//! Core CLI arguments structure and basic functionality
//!
//! This module contains the main Args struct definition and basic methods.
//! Configuration-file loading is handled by a separate module.

use clap::Parser;
use std::path::PathBuf;

use crate::generator::types::GenerationMode;

/// Global arguments for the single "run now" operation.
///
/// Values left unset here may still be filled in from the TOML configuration
/// file before defaults apply; CLI values always win.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "buildver")]
#[command(about = "Maintains a generated source file exposing the build version")]
#[command(version)]
pub struct Args {
    /// Generation policy: current label only, or full version history
    #[arg(short = 'm', long = "mode", value_enum, value_name = "MODE")]
    pub mode: Option<GenerationMode>,

    /// Directory where the artifact and its state file are written
    #[arg(short = 't', long = "target-dir", value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Directory holding the version-info template (skips the search)
    #[arg(short = 'T', long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Root directory searched for the template when --template-dir is unset
    #[arg(short = 's', long = "search-root", value_name = "DIR")]
    pub search_root: Option<PathBuf>,

    /// Name of the generated struct (defaults per mode)
    #[arg(short = 'n', long = "class-name", value_name = "NAME")]
    pub class_name: Option<String>,

    /// Manifest supplying the version label and bundle identifier
    #[arg(long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Version label override (takes precedence over the manifest)
    #[arg(long = "version-label", value_name = "LABEL")]
    pub version_label: Option<String>,

    /// Bundle identifier override (takes precedence over the manifest)
    #[arg(long = "bundle-id", value_name = "ID")]
    pub bundle_id: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print build information for this tool and exit
    #[arg(long = "build-info")]
    pub build_info: bool,
}

impl Args {
    /// Mode after config merge; tracked is the default.
    pub fn effective_mode(&self) -> GenerationMode {
        self.mode.unwrap_or(GenerationMode::Tracked)
    }

    /// Configured class name, or the mode's default.
    pub fn effective_class_name(&self) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| self.effective_mode().default_class_name().to_string())
    }
}
