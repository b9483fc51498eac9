//! Pure string transformations for generated identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix applied to every per-version constant in tracked artifacts.
pub const VERSION_CONSTANT_PREFIX: &str = "Version_";

static NON_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-zA-Z0-9_]").unwrap());

/// Derive a name-safe constant identifier from a version label.
///
/// `"1.0 beta"` becomes `"Version_1_0_beta"`: the label is trimmed, dots and
/// spaces are replaced with underscores, then every remaining character
/// outside `[A-Za-z0-9_]` is stripped. Distinct labels can normalize to the
/// same identifier; they are emitted as-is and the last one wins in the
/// generated artifact.
pub fn constant_name_for_label(label: &str) -> String {
    let trimmed = label.trim();
    let no_dots = trimmed.replace('.', "_");
    let no_blanks = no_dots.replace(' ', "_");
    let alpha_num = NON_IDENTIFIER.replace_all(&no_blanks, "");
    format!("{}{}", VERSION_CONSTANT_PREFIX, alpha_num)
}

/// Convert an artifact class name to the snake_case stem used for its files,
/// e.g. `"TrackedBuildVersion"` -> `"tracked_build_version"`.
pub fn module_name_for_class(class_name: &str) -> String {
    let mut out = String::with_capacity(class_name.len() + 4);
    for (i, c) in class_name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
