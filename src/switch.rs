//! Profile switching logic.
//!
//! This module implements the core mechanism of `yarnrc`: keeping the active
//! link pointed at exactly one file in the store. It handles:
//! - Detecting what currently lives at the link path.
//! - Refusing to touch a regular file sitting where the link should be.
//! - Swapping the link to a new profile file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::paths::Paths;
use crate::profiles::profile_exists;

/// Represents the status of the ~/.yarnrc link path
#[derive(Debug, PartialEq, Eq)]
pub enum LinkStatus {
    Missing,
    RegularFile,
    Symlink { target: PathBuf },
    BrokenSymlink { target: PathBuf },
}

impl LinkStatus {
    pub fn detect(path: &Path) -> Self {
        // symlink_metadata does not follow the link
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let target = fs::read_link(path).unwrap_or_else(|_| PathBuf::from("?"));
                if path.exists() {
                    Self::Symlink { target }
                } else {
                    Self::BrokenSymlink { target }
                }
            }
            Ok(_) => Self::RegularFile,
            Err(_) => Self::Missing,
        }
    }

    /// Link target, for either kind of symlink
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Symlink { target } | Self::BrokenSymlink { target } => Some(target),
            _ => None,
        }
    }
}

/// Result of a successful activation, for reporting
#[derive(Debug, PartialEq, Eq)]
pub struct Activation {
    /// Base name of the link target that was removed, if any
    pub removed: Option<String>,
    /// Name of the profile now active
    pub activated: String,
}

/// Base name of the file the active link points to
pub fn current_target(paths: &Paths) -> Option<String> {
    LinkStatus::detect(&paths.active_link)
        .target()
        .and_then(base_name)
}

/// Check whether `name` is already the active profile.
///
/// Returns `Ok(true)` when the link already points at `<store>/<name>`, in which
/// case the caller should stop without touching anything.
pub fn ensure_not_already_active(paths: &Paths, name: &str) -> Result<bool> {
    match LinkStatus::detect(&paths.active_link) {
        LinkStatus::RegularFile => Err(not_a_symlink(paths).into()),
        LinkStatus::Symlink { target } => Ok(!name.is_empty() && target == paths.profile_path(name)),
        LinkStatus::BrokenSymlink { .. } | LinkStatus::Missing => Ok(false),
    }
}

/// Point the active link at the profile `name`.
pub fn activate(paths: &Paths, name: &str) -> Result<Activation> {
    if !profile_exists(paths, name) {
        return Err(ProfileError::ProfileNotFound(name.to_string()).into());
    }
    let profile = paths.profile_path(name);

    let removed = match LinkStatus::detect(&paths.active_link) {
        LinkStatus::RegularFile => return Err(not_a_symlink(paths).into()),
        LinkStatus::Missing => None,
        LinkStatus::Symlink { target } | LinkStatus::BrokenSymlink { target } => {
            // remove_file removes the symlink itself
            fs::remove_file(&paths.active_link).with_context(|| {
                format!("Failed to remove old link: {}", paths.active_link.display())
            })?;
            base_name(&target)
        }
    };

    make_symlink(&profile, &paths.active_link)?;

    Ok(Activation {
        removed,
        activated: name.to_string(),
    })
}

fn not_a_symlink(paths: &Paths) -> ProfileError {
    ProfileError::NotASymlink {
        link: paths.active_link.clone(),
        store: paths.store_dir.clone(),
    }
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

pub(crate) fn make_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link).with_context(|| {
        format!(
            "Failed to create symlink from {} to {}",
            link.display(),
            target.display()
        )
    })?;

    #[cfg(windows)]
    std::os::windows::fs::symlink_file(target, link).with_context(|| {
        format!(
            "Failed to create symlink from {} to {}",
            link.display(),
            target.display()
        )
    })?;

    Ok(())
}
