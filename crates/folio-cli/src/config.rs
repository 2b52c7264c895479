use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use folio_io::prelude::HashAlgorithm;
use tracing::info;

pub const STORE_DIR_VAR: &str = "FOLIO_STORE_DIR";
pub const HASH_ALGORITHM_VAR: &str = "FOLIO_HASH_ALGORITHM";

/// Settings read from the environment. Command-line flags win over these.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_dir: PathBuf,
    pub hash_algorithm: HashAlgorithm,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            store_dir: try_load(STORE_DIR_VAR, "./posts")?,
            hash_algorithm: try_load(HASH_ALGORITHM_VAR, HashAlgorithm::default().as_str())?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("invalid {key} value: {e}"))
}
