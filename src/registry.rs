//! Registry mirror selection for the active profile.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::str::FromStr;

use crate::error::ProfileError;
use crate::paths::Paths;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Known npm registry mirrors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    Au,
    Eu,
    Cn,
    Default,
}

impl Mirror {
    /// Get all available mirrors
    pub fn all() -> [Mirror; 4] {
        [Mirror::Au, Mirror::Eu, Mirror::Cn, Mirror::Default]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Mirror::Au => "au",
            Mirror::Eu => "eu",
            Mirror::Cn => "cn",
            Mirror::Default => "default",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Mirror::Au => "http://registry.npmjs.org.au/",
            Mirror::Eu => "http://registry.npmjs.eu/",
            Mirror::Cn => "http://r.cnpmjs.org/",
            Mirror::Default => "https://registry.npmjs.org/",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mirror::Au => "Australian registry mirror",
            Mirror::Eu => "European registry mirror",
            Mirror::Cn => "Chinese registry mirror",
            Mirror::Default => "Default registry",
        }
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mirror {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "au" => Ok(Mirror::Au),
            "eu" => Ok(Mirror::Eu),
            "cn" => Ok(Mirror::Cn),
            "default" | "slow" => Ok(Mirror::Default),
            _ => Err(ProfileError::UnknownMirror(s.to_string())),
        }
    }
}

/// Replace the first line mentioning `registry`, or insert one at the top.
pub fn rewrite_registry(contents: &str, url: &str) -> String {
    let directive = format!("registry = {url}");
    let mut lines: Vec<&str> = contents.split(LINE_ENDING).collect();

    match lines.iter().position(|line| line.contains("registry")) {
        Some(idx) => lines[idx] = &directive,
        None => lines.insert(0, &directive),
    }

    lines.join(LINE_ENDING)
}

/// Point the active profile at `mirror`, writing through the active link.
pub fn set_registry(paths: &Paths, mirror: Mirror) -> Result<()> {
    let active = &paths.active_link;
    if !active.is_file() {
        return Err(ProfileError::ActiveConfigMissing(active.clone()).into());
    }

    let contents = fs::read_to_string(active)
        .with_context(|| format!("Failed to read {}", active.display()))?;
    let rewritten = rewrite_registry(&contents, mirror.url());

    fs::write(active, rewritten).with_context(|| format!("Failed to write {}", active.display()))
}
