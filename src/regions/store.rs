use std::{fs, path::PathBuf};

use log::debug;

use super::{errors::StoreError, hierarchy::RegionMap};

/// Durable storage for a generated [`RegionMap`].
pub trait RegionStore {
    fn load(&self) -> Result<RegionMap, StoreError>;
    fn save(&self, regions: &RegionMap) -> Result<(), StoreError>;
}

/// Keeps the region map as a hand editable YAML file.
pub struct YamlRegionStore {
    path: PathBuf,
}

impl YamlRegionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RegionStore for YamlRegionStore {
    fn load(&self) -> Result<RegionMap, StoreError> {
        debug!("loading regions from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    fn save(&self, regions: &RegionMap) -> Result<(), StoreError> {
        debug!("saving regions to {}", self.path.display());
        let content = serde_yaml_ng::to_string(regions)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
