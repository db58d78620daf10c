//! Error types surfaced to the user.
//!
//! Filesystem plumbing errors travel as `anyhow::Error` with context attached;
//! the variants here are the failures the user is expected to act on.

use std::path::PathBuf;

/// Failures raised by the profile store, link manager and registry rewriter.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("yarnrc file \"{name}\" already exists ({})", .path.display())]
    AlreadyExists { name: String, path: PathBuf },

    #[error("Couldn't find yarnrc file \"{0}\".")]
    ProfileNotFound(String),

    #[error("{0} value is not a valid registry name")]
    UnknownMirror(String),

    #[error(
        "Current .yarnrc ({}) is not a symlink. You may want to copy it into {}.",
        .link.display(),
        .store.display()
    )]
    NotASymlink { link: PathBuf, store: PathBuf },

    #[error("Make sure a .yarnrc file exists at {}.", .0.display())]
    ActiveConfigMissing(PathBuf),

    #[error("Invalid profile name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}

impl ProfileError {
    /// Reported with the WARN label instead of ERROR
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ProfileError::NotASymlink { .. } | ProfileError::ActiveConfigMissing(_)
        )
    }

    /// Usage text follows the diagnostic
    pub fn shows_usage(&self) -> bool {
        matches!(self, ProfileError::UnknownMirror(_))
    }
}

/// Problems with the command line itself. Always followed by usage text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("What do you want to call your new yarnrc profile?")]
    MissingProfileName,

    #[error("Specify the registry you want to use")]
    MissingMirror,

    #[error("Conflicting actions: {} cannot be combined", .0.join(", "))]
    ConflictingActions(Vec<&'static str>),

    #[error("{}", unknown_option_lines(.0))]
    UnknownOptions(Vec<String>),
}

fn unknown_option_lines(options: &[String]) -> String {
    options
        .iter()
        .map(|o| format!("Unknown option: {o}"))
        .collect::<Vec<_>>()
        .join("\n")
}
