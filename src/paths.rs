use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// All computed paths used by yarnrc
#[derive(Debug, Clone)]
pub struct Paths {
    /// ~/.yarnrcs
    pub store_dir: PathBuf,
    /// ~/.yarnrc
    pub active_link: PathBuf,
}

impl Paths {
    /// Resolve paths from optional overrides, falling back to the home directory.
    ///
    /// Empty overrides are treated as absent, so `YARNRC_STORE=` behaves the same
    /// as an unset variable. Relative overrides are made absolute against the
    /// working directory.
    pub fn resolve(store: Option<PathBuf>, link: Option<PathBuf>) -> Result<Self> {
        let store = store.filter(|p| !p.as_os_str().is_empty());
        let link = link.filter(|p| !p.as_os_str().is_empty());

        let (store_dir, active_link) = match (store, link) {
            (Some(store_dir), Some(active_link)) => (store_dir, active_link),
            (store, link) => {
                let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
                let home = base_dirs.home_dir();
                (
                    store.unwrap_or_else(|| home.join(".yarnrcs")),
                    link.unwrap_or_else(|| home.join(".yarnrc")),
                )
            }
        };

        // link targets are resolved relative to the link, not the working directory
        let store_dir = std::path::absolute(&store_dir)
            .with_context(|| format!("Failed to resolve {}", store_dir.display()))?;
        let active_link = std::path::absolute(&active_link)
            .with_context(|| format!("Failed to resolve {}", active_link.display()))?;

        Ok(Self {
            store_dir,
            active_link,
        })
    }

    /// Get the path of a profile file inside the store
    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.store_dir.join(name)
    }

    /// Check if a path is within the store directory
    pub fn is_in_store(&self, path: &Path) -> bool {
        path.starts_with(&self.store_dir)
    }

    /// Base name of the active link, used in messages (".yarnrc")
    pub fn link_name(&self) -> String {
        self.active_link
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.active_link.display().to_string())
    }
}
