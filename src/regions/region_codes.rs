use log::{error, info, warn};

use super::{
    errors::RegionError,
    hierarchy::{flatten_rows, RegionMap, Row},
    sources::{http_client, AlphaCodeSource, HierarchySource, UnM49Hierarchy, WikipediaAlphaCodes},
    store::{RegionStore, YamlRegionStore},
};
use crate::config::RegionConfig;

/// Maps geographic regions to the ISO 3166-1 alpha-2 codes of the countries
/// they contain.
///
/// The table is read from the store when possible. When the store is empty or
/// unreadable it is regenerated from the UN M49 groupings joined with the
/// ISO 3166-1 code table, and written back to the store.
pub struct RegionCodes {
    store: Box<dyn RegionStore>,
    alpha_codes: Box<dyn AlphaCodeSource>,
    hierarchy: Box<dyn HierarchySource>,

    /// Filled by the first successful [`RegionCodes::regions`] call.
    regions: Option<RegionMap>,
}

impl RegionCodes {
    pub fn new(
        store: Box<dyn RegionStore>,
        alpha_codes: Box<dyn AlphaCodeSource>,
        hierarchy: Box<dyn HierarchySource>,
    ) -> Self {
        Self {
            store,
            alpha_codes,
            hierarchy,
            regions: None,
        }
    }

    /// Wires the YAML store and the scraping sources described by `config`.
    pub fn from_config(config: &RegionConfig) -> Result<Self, RegionError> {
        let client = http_client(config)?;
        Ok(Self::new(
            Box::new(YamlRegionStore::new(config.regions_file.clone())),
            Box::new(WikipediaAlphaCodes::new(client.clone(), config.alpha_codes_url.clone())),
            Box::new(UnM49Hierarchy::new(client, config.hierarchy_url.clone())),
        ))
    }

    /// Returns the region table, loading or generating it on first use only.
    pub fn regions(&mut self) -> Result<&RegionMap, RegionError> {
        if self.regions.is_none() {
            let regions = match self.store.load() {
                Ok(regions) => regions,
                Err(err) => {
                    warn!("could not load regions file: {}", err);
                    self.generate_regions()?
                }
            };
            self.regions = Some(regions);
        }
        Ok(self.regions.get_or_insert_default())
    }

    /// Rebuilds the table from the sources and stores it, ignoring any cached
    /// copy. A failure to store is logged, the fresh table is still returned.
    pub fn generate_regions(&mut self) -> Result<RegionMap, RegionError> {
        info!("Generating regions");
        let alpha3_to_alpha2 = self.alpha_codes.alpha3_to_alpha2()?;
        let rows = self
            .hierarchy
            .rows()?
            .into_iter()
            .map(|row| Row::from_hierarchy_row(row, &alpha3_to_alpha2));
        let regions = flatten_rows(rows)?;

        if let Err(err) = self.store.save(&regions) {
            error!("could not save regions file: {}", err);
        }
        self.regions = Some(regions.clone());
        Ok(regions)
    }
}
