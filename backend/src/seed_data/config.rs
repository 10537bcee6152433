//! Seed dataset configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Configuration values controlling where the initial movies come from.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SEED_DATA")]
pub struct SeedDataSettings {
    /// JSON file replacing the built-in dataset.
    pub path: Option<PathBuf>,
}

impl SeedDataSettings {
    /// Return the configured dataset path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
