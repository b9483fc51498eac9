//! First-run provisioning of the auxiliary version-info type.
//!
//! Tracked artifacts reference a `TrackedVersionInfo` type that is not
//! generated but copied verbatim from a static template shipped with the
//! tool. The copy happens once; later runs find the file already in place.

use std::path::PathBuf;

/// File name of the auxiliary module inside the target directory.
pub const TRACKED_VERSION_INFO_MODULE: &str = "tracked_version_info.rs";

/// File name of the shipped template. The `.tmpl` suffix keeps it out of any
/// module tree until it is copied.
pub const TEMPLATE_FILE_NAME: &str = "tracked_version_info.rs.tmpl";

pub trait TemplateProvisioner {
    /// True when the auxiliary type is present, either because it already
    /// existed or because it was copied now. Failures are logged as warnings
    /// and reported as `false`; the caller aborts its render.
    fn ensure(&self) -> bool;
}

/// Locates the template on disk and copies it into the target directory.
pub struct FileTemplateProvisioner {
    target_dir: PathBuf,
    template_dir: Option<PathBuf>,
    search_root: PathBuf,
}

impl FileTemplateProvisioner {
    pub fn new(
        target_dir: impl Into<PathBuf>,
        template_dir: Option<PathBuf>,
        search_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target_dir: target_dir.into(),
            template_dir,
            search_root: search_root.into(),
        }
    }

    /// An explicitly configured template directory must contain the template;
    /// otherwise the search root is globbed for exactly one match.
    fn locate_template(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.template_dir {
            let candidate = dir.join(TEMPLATE_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            log::warn!(
                "No {} in template directory {}",
                TEMPLATE_FILE_NAME,
                dir.display()
            );
            return None;
        }

        let pattern = format!("{}/**/{}", self.search_root.display(), TEMPLATE_FILE_NAME);
        let mut matches: Vec<PathBuf> = match glob::glob(&pattern) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(e) => {
                log::warn!("Invalid template search pattern {}: {}", pattern, e);
                return None;
            }
        };
        match matches.len() {
            1 => Some(matches.remove(0)),
            0 => {
                log::warn!(
                    "Could not find {} under {}! Check your buildver installation or pass an explicit template directory",
                    TEMPLATE_FILE_NAME,
                    self.search_root.display()
                );
                None
            }
            n => {
                log::warn!(
                    "Found {} copies of {} under {}, pass an explicit template directory to disambiguate",
                    n,
                    TEMPLATE_FILE_NAME,
                    self.search_root.display()
                );
                None
            }
        }
    }
}

impl TemplateProvisioner for FileTemplateProvisioner {
    fn ensure(&self) -> bool {
        let target = self.target_dir.join(TRACKED_VERSION_INFO_MODULE);
        if target.is_file() {
            return true;
        }
        let template = match self.locate_template() {
            Some(template) => template,
            None => return false,
        };
        if let Err(e) = std::fs::create_dir_all(&self.target_dir) {
            log::warn!(
                "Could not create target directory {}: {}",
                self.target_dir.display(),
                e
            );
            return false;
        }
        match std::fs::copy(&template, &target) {
            Ok(_) => {
                log::info!(
                    "Copied version-info template to {}",
                    target.display()
                );
                true
            }
            Err(e) => {
                log::warn!(
                    "Could not copy template {} to {}: {}",
                    template.display(),
                    target.display(),
                    e
                );
                false
            }
        }
    }
}
