//! Application startup

use std::path::PathBuf;

use clap::Parser;

use crate::app::cli::args::Args;
use crate::app::manifest::resolve_version_source;
use crate::core::logging::init_logging;
use crate::core::version;
use crate::generator::driver::GenerationDriver;
use crate::generator::policy::policy_for_mode;
use crate::generator::publisher::FilePublisher;
use crate::generator::reader::SidecarReader;
use crate::generator::template::FileTemplateProvisioner;
use crate::generator::types::GenerationRequest;

/// Parse arguments and configuration, then execute one generation run.
/// Returns the process exit code.
pub fn startup() -> i32 {
    use std::io::IsTerminal;

    let mut args = Args::parse();
    let config_file = args.config_file.clone();
    Args::parse_config_file(&mut args, config_file);

    let use_color = (args.color || std::io::stdout().is_terminal()) && !args.no_color;
    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        return 1;
    }

    if args.build_info {
        println!(
            "buildver {} ({}, built {}, {})",
            env!("CARGO_PKG_VERSION"),
            version::git_hash(),
            version::build_time(),
            version::tool_bundle_identifier()
        );
        return 0;
    }

    log::debug!("buildver: build version artifact generator starting");

    let manifest = args
        .manifest
        .clone()
        .unwrap_or_else(|| PathBuf::from("Cargo.toml"));
    let source = match resolve_version_source(
        &manifest,
        args.version_label.as_deref(),
        args.bundle_id.as_deref(),
    ) {
        Ok(source) => source,
        Err(e) => {
            log::error!("FATAL: {}", e);
            return 1;
        }
    };

    let target_dir = match args.target_dir.clone() {
        Some(target_dir) => target_dir,
        None => {
            log::error!(
                "FATAL: No target directory configured, pass --target-dir or set 'target-dir' in the configuration file"
            );
            return 1;
        }
    };

    let class_name = args.effective_class_name();
    let request = GenerationRequest {
        class_name: class_name.clone(),
        new_version_label: source.version_label,
        bundle_identifier: source.bundle_identifier,
        mode: args.effective_mode(),
    };

    let search_root = args.search_root.clone().unwrap_or_else(|| PathBuf::from("."));
    let provisioner = Box::new(FileTemplateProvisioner::new(
        target_dir.clone(),
        args.template_dir.clone(),
        search_root,
    ));
    let driver = GenerationDriver::new(
        class_name.clone(),
        Box::new(SidecarReader::new(target_dir.clone())),
        policy_for_mode(request, provisioner),
        Box::new(FilePublisher::new(target_dir)),
    );

    match driver.run() {
        Ok(result) if result.written => {
            log::info!("Regenerated \"{}\"", class_name);
            0
        }
        Ok(_) => {
            log::info!("\"{}\" unchanged, nothing written", class_name);
            0
        }
        Err(e) => {
            log::error!("FATAL: {}", e);
            1
        }
    }
}
