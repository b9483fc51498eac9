//! Build metadata accessors for the tool itself.
//! This includes the generated version.rs from the build script into a core module,
//! providing a single source of truth.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// The bundle identifier recorded in this tool's own manifest metadata
pub fn tool_bundle_identifier() -> &'static str {
    TOOL_BUNDLE_IDENTIFIER
}
