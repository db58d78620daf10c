//! Core profile store logic.
//!
//! This module handles the "data model" of profiles:
//! - Bootstrapping the store on first use
//! - Listing available profiles
//! - Validating profile names
//! - Creating new empty profiles
//!
//! It interacts directly with the filesystem to manage the `~/.yarnrcs/` directory.
//! Profiles are never deleted here.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::error::ProfileError;
use crate::paths::Paths;
use crate::switch::{Activation, LinkStatus, activate};

/// Name of the profile seeded on first run
pub const DEFAULT_PROFILE: &str = "default";

/// What `initialize` did, so the caller can report it
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// The store directory was created by this call
    pub created_store: bool,
    /// A pre-existing config file was moved into the store as `default`
    pub adopted_legacy: bool,
    /// Activation of `default`, when the store was created
    pub activation: Option<Activation>,
}

/// Set up the store if it doesn't exist yet.
///
/// A no-op when the store is already a directory.
pub fn initialize(paths: &Paths) -> Result<InitReport> {
    match fs::metadata(&paths.store_dir) {
        Ok(meta) if meta.is_dir() => return Ok(InitReport::default()),
        Ok(_) => return Err(ProfileError::NotADirectory(paths.store_dir.clone()).into()),
        Err(_) => {}
    }

    fs::create_dir_all(&paths.store_dir).with_context(|| {
        format!(
            "Failed to create store directory: {}",
            paths.store_dir.display()
        )
    })?;

    let default = paths.profile_path(DEFAULT_PROFILE);
    let adopted_legacy = adopt_legacy(&paths.active_link, &default)?;
    if !adopted_legacy {
        fs::write(&default, "")
            .with_context(|| format!("Failed to create {}", default.display()))?;
    }

    let activation = activate(paths, DEFAULT_PROFILE)?;

    Ok(InitReport {
        created_store: true,
        adopted_legacy,
        activation: Some(activation),
    })
}

/// Move whatever sits at the link path into the store as `default`.
///
/// Returns false when there was nothing to adopt.
fn adopt_legacy(legacy: &Path, default: &Path) -> Result<bool> {
    match LinkStatus::detect(legacy) {
        LinkStatus::Missing => Ok(false),
        LinkStatus::RegularFile => {
            if fs::rename(legacy, default).is_err() {
                // e.g. store on another filesystem
                fs::copy(legacy, default).with_context(|| {
                    format!(
                        "Failed to copy {} to {}",
                        legacy.display(),
                        default.display()
                    )
                })?;
                fs::remove_file(legacy)
                    .with_context(|| format!("Failed to remove {}", legacy.display()))?;
            }
            Ok(true)
        }
        LinkStatus::Symlink { .. } => {
            // keep the contents, not a link to a link
            fs::copy(legacy, default).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    legacy.display(),
                    default.display()
                )
            })?;
            fs::remove_file(legacy)
                .with_context(|| format!("Failed to remove {}", legacy.display()))?;
            Ok(true)
        }
        LinkStatus::BrokenSymlink { .. } => {
            fs::remove_file(legacy)
                .with_context(|| format!("Failed to remove {}", legacy.display()))?;
            Ok(false)
        }
    }
}

/// List available profiles, sorted by name, skipping dotfiles
pub fn list_profiles(paths: &Paths) -> Result<Vec<String>> {
    let mut profiles = Vec::new();
    let entries = fs::read_dir(&paths.store_dir).with_context(|| {
        format!(
            "Failed to read store directory: {}",
            paths.store_dir.display()
        )
    })?;

    for entry in entries {
        let file_name = entry?.file_name();
        match file_name.to_str() {
            Some(name) if !name.starts_with('.') => profiles.push(name.to_string()),
            _ => {}
        }
    }
    profiles.sort();
    Ok(profiles)
}

/// Check if `name` is a profile file inside the store.
///
/// Absolute paths, `..` and anything with a separator never count, even when
/// such a file exists elsewhere on disk.
pub fn profile_exists(paths: &Paths, name: &str) -> bool {
    if validate_profile_name(name).is_err() {
        return false;
    }
    let path = paths.profile_path(name);
    paths.is_in_store(&path) && path.is_file()
}

/// Validate profile name
///
/// Names must be a single path component so the store stays flat.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name cannot be empty"
    } else if name == "." || name == ".." {
        "name cannot be a relative directory"
    } else if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        "name cannot contain a path separator"
    } else {
        return Ok(());
    };

    Err(ProfileError::InvalidName {
        name: name.to_string(),
        reason,
    }
    .into())
}

/// Create a new, empty profile. Does not activate it.
pub fn create_profile(paths: &Paths, name: &str) -> Result<()> {
    validate_profile_name(name)?;

    let path = paths.profile_path(name);
    if fs::symlink_metadata(&path).is_ok() {
        return Err(ProfileError::AlreadyExists {
            name: name.to_string(),
            path,
        }
        .into());
    }

    if !paths.store_dir.is_dir() {
        bail!("Store directory missing: {}", paths.store_dir.display());
    }

    fs::write(&path, "").with_context(|| format!("Failed to create profile: {}", path.display()))
}
