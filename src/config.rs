// src/config.rs

use crate::error::{MylogError, Result};
use crate::logging::default_log_level;
use std::path::PathBuf;

const APP_DIR: &str = ".config/mylog";
const DB_FILE: &str = "mylog.db";
const LOG_DIR: &str = "logs";

/// Resolved runtime locations. Flags and env vars win over the home-dir defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Result<Self> {
        let db_path = match db_path {
            Some(path) => path,
            None => app_dir()?.join(DB_FILE),
        };
        let log_dir = match log_dir {
            Some(dir) => dir,
            None => app_dir()?.join(LOG_DIR),
        };
        let log_level = log_level.unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

/// 应用数据目录 (~/.config/mylog)
pub fn app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(MylogError::HomeDirNotFound)?;
    Ok(home_dir.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_are_kept() {
        let settings = Settings::resolve(
            Some(PathBuf::from("/tmp/a.db")),
            Some(PathBuf::from("/tmp/logs")),
            Some("warn".to_string()),
        )
        .unwrap();
        assert_eq!(settings.db_path, PathBuf::from("/tmp/a.db"));
        assert_eq!(settings.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn level_falls_back_to_build_default() {
        let settings = Settings::resolve(
            Some(PathBuf::from("/tmp/a.db")),
            Some(PathBuf::from("/tmp/logs")),
            None,
        )
        .unwrap();
        assert_eq!(settings.log_level, default_log_level());
    }
}
