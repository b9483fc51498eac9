//! Host build metadata extraction.
//!
//! The version label and bundle identifier normally come from the host
//! project's Cargo.toml: `package.version` and
//! `package.metadata.bundle-identifier` (falling back to `package.name`).
//! Explicit overrides bypass the manifest entirely.

use std::path::Path;

/// The two strings a generation run is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSource {
    pub version_label: String,
    pub bundle_identifier: String,
}

pub fn resolve_version_source(
    manifest_path: &Path,
    version_override: Option<&str>,
    bundle_override: Option<&str>,
) -> Result<VersionSource, String> {
    if let (Some(version), Some(bundle)) = (version_override, bundle_override) {
        return Ok(VersionSource {
            version_label: version.to_string(),
            bundle_identifier: bundle.to_string(),
        });
    }

    let contents = std::fs::read_to_string(manifest_path).map_err(|e| {
        format!(
            "Cannot read manifest {}: {}",
            manifest_path.display(),
            e
        )
    })?;
    let table = contents.parse::<toml::Table>().map_err(|e| {
        format!(
            "Cannot parse manifest {}: {}",
            manifest_path.display(),
            e
        )
    })?;
    let package = table
        .get("package")
        .and_then(|p| p.as_table())
        .ok_or_else(|| {
            format!(
                "Manifest {} has no [package] section",
                manifest_path.display()
            )
        })?;

    let version_label = match version_override {
        Some(version) => version.to_string(),
        None => package
            .get("version")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                format!(
                    "Manifest {} has no package.version",
                    manifest_path.display()
                )
            })?,
    };

    let bundle_identifier = match bundle_override {
        Some(bundle) => bundle.to_string(),
        None => package
            .get("metadata")
            .and_then(|m| m.as_table())
            .and_then(|m| m.get("bundle-identifier"))
            .and_then(|v| v.as_str())
            .or_else(|| package.get("name").and_then(|v| v.as_str()))
            .map(str::to_string)
            .ok_or_else(|| {
                format!(
                    "Manifest {} has neither package.metadata.bundle-identifier nor package.name",
                    manifest_path.display()
                )
            })?,
    };

    Ok(VersionSource {
        version_label,
        bundle_identifier,
    })
}
