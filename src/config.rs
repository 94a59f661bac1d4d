//! Runtime knobs for the paging subsystem.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::paging::PagingError;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Upper bound on simultaneously queued paging records.
    pub num_paging_max: usize,
    /// Seconds a record stays eligible for retransmission after its most
    /// recent paging request. Zero means a record is paged exactly once.
    pub paging_lifetime: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        PagingConfig {
            num_paging_max: 200,
            paging_lifetime: 0,
        }
    }
}

pub fn parse_config<P>(path: P) -> Result<PagingConfig, PagingError>
where
    P: AsRef<std::path::Path>,
{
    if let Ok(config_file) = std::fs::read_to_string(&path) {
        Ok(toml::from_str(&config_file)?)
    } else {
        warn!("unable to read config file, using default config");
        Ok(PagingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PagingConfig::default();
        assert_eq!(config.num_paging_max, 200);
        assert_eq!(config.paging_lifetime, 0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: PagingConfig = toml::from_str("num_paging_max = 50").unwrap();
        assert_eq!(config.num_paging_max, 50);
        assert_eq!(config.paging_lifetime, 0);
    }

    #[test]
    fn test_round_trip() {
        let config = PagingConfig {
            num_paging_max: 20,
            paging_lifetime: 5,
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed: PagingConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.num_paging_max, 20);
        assert_eq!(parsed.paging_lifetime, 5);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = parse_config("/does/not/exist.toml").unwrap();
        assert_eq!(config.num_paging_max, 200);
    }
}
