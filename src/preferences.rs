use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Likes shown before this browser's own vote.
pub const BASE_LIKES: u32 = 156;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    platform_liked: bool,
}

/// The persisted "liked" flag: read once on load, written on every toggle.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    liked: bool,
}

impl PreferenceStore {
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let stored = if path.exists() {
            let content = fs::read_to_string(&path)
                .context(format!("failed to read preferences {}", path.display()))?;
            serde_json::from_str(&content)
                .context(format!("preferences {} are not valid", path.display()))?
        } else {
            StoredPreferences::default()
        };

        Ok(Self {
            path,
            liked: stored.platform_liked,
        })
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn likes_count(&self) -> u32 {
        BASE_LIKES + u32::from(self.liked)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flips the flag and persists it, returning the new value.
    pub fn toggle_like(&mut self) -> anyhow::Result<bool> {
        let liked = !self.liked;
        let content = serde_json::to_string(&StoredPreferences {
            platform_liked: liked,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)
            .context(format!("failed to write preferences {}", self.path.display()))?;

        self.liked = liked;
        Ok(liked)
    }
}
