pub mod errors;
pub mod hierarchy;
mod region_codes;
pub mod sources;
pub mod store;

pub use errors::{FetchError, RegionError, StoreError};
pub use hierarchy::{flatten_rows, RegionMap, RegionTree, Row};
pub use region_codes::RegionCodes;
pub use sources::{AlphaCodeSource, HierarchyRow, HierarchySource};
pub use store::{RegionStore, YamlRegionStore};
