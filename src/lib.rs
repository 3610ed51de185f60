//! Utilities for phone-number classification and reference-data generation:
//!
//! - [`mccmnc`] extracts the MCC/MNC table from the ITU annex document,
//! - [`lookup`] parses free-form numbers against candidate locales,
//! - [`regions`] builds and caches the region to country-code table.

pub mod config;
pub mod i18n;
pub mod lookup;
pub mod mccmnc;
pub mod regions;

#[cfg(test)]
mod tests;

pub use config::RegionConfig;
pub use regions::{RegionCodes, RegionMap};
