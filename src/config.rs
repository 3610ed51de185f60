use std::path::PathBuf;

pub const DEFAULT_REGIONS_FILE: &str = "regions.yaml";
pub const ISO_3166_URL: &str = "https://en.wikipedia.org/wiki/ISO_3166-1";
pub const UN_M49_URL: &str = "https://unstats.un.org/unsd/methodology/m49/";

const DEFAULT_USER_AGENT: &str = concat!("phonetools/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the region table is cached and where it is rebuilt from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionConfig {
    /// YAML cache of the generated table. Delete or rename it to force a rebuild.
    pub regions_file: PathBuf,
    pub alpha_codes_url: String,
    pub hierarchy_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            regions_file: PathBuf::from(DEFAULT_REGIONS_FILE),
            alpha_codes_url: ISO_3166_URL.to_string(),
            hierarchy_url: UN_M49_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RegionConfig {
    pub fn with_regions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.regions_file = path.into();
        self
    }
}
