use std::path::{Path, PathBuf};

use ledgerbook_core::constants::DEFAULT_BACKUPS_KEPT;
use ledgerbook_core::{Error, Result};

pub const DEFAULT_DB_PATH: &str = "./meu_negocio_v8.db";
pub const DEFAULT_POOL_SIZE: u32 = 4;

pub struct Config {
    pub db_path: String,
    pub backup_dir: PathBuf,
    pub backups_kept: usize,
    pub pool_size: u32,
}

impl Config {
    /// Builds the config from any key lookup. Unset keys take their defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("LEDGERBOOK_DB_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let backup_dir = lookup("LEDGERBOOK_BACKUP_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_backup_dir(&db_path));
        let backups_kept = parse_or("LEDGERBOOK_BACKUP_KEEP", &lookup, DEFAULT_BACKUPS_KEPT)?;
        let pool_size = parse_or("LEDGERBOOK_POOL_SIZE", &lookup, DEFAULT_POOL_SIZE)?;

        Ok(Self {
            db_path,
            backup_dir,
            backups_kept,
            pool_size,
        })
    }
}

/// `backups/` next to the datastore file.
pub fn default_backup_dir(db_path: &str) -> PathBuf {
    Path::new(db_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("backups")
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            Error::InvalidConfigValue(format!("{} must be a non-negative integer, got '{}'", key, raw))
        }),
    }
}
