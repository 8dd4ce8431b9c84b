use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::{ffi::c_char, path::PathBuf};

use crate::ffi::cstring_to_string;

const DATABASE_FILE: &str = "clipboard_history.db";

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub enum ConfigReadOption {
    FromLocalFile = 0,
    FromConfigDir = 1,
}

impl ConfigReadOption {
    fn path(self) -> Result<PathBuf> {
        match self {
            ConfigReadOption::FromLocalFile => Ok(PathBuf::from("quickclip.toml")),
            ConfigReadOption::FromConfigDir => {
                let dir = dirs::config_dir().context("no config directory on this platform")?;
                Ok(dir.join("quickclip").join("config.toml"))
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: PathBuf,
    pub history_limit: usize,
    pub hotkey: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            history_limit: 50,
            hotkey: "ctrl+shift+v".to_string(),
        }
    }
}

impl Config {
    /// Reads the config file; a missing file means defaults.
    pub fn read(option: ConfigReadOption) -> Result<Self> {
        let path = option.path()?;
        if !path.exists() {
            log::info!("no config at {path:?}, using defaults");
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {path:?}"))?;
        Self::parse(&content).with_context(|| format!("invalid config format in {path:?}"))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

fn default_database() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("quickclip").join(DATABASE_FILE),
        None => PathBuf::from(DATABASE_FILE),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_config_read(option: ConfigReadOption) -> *mut Config {
    let config = match Config::read(option) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err:?}");
            return std::ptr::null_mut();
        }
    };
    Box::into_raw(Box::new(config))
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_config_default() -> *mut Config {
    Box::into_raw(Box::new(Config::default()))
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_config_new(
    database: *const c_char,
    history_limit: usize,
    hotkey: *const c_char,
) -> *mut Config {
    let Ok(database) = cstring_to_string(database) else {
        log::error!("invalid database path");
        return std::ptr::null_mut();
    };
    let Ok(hotkey) = cstring_to_string(hotkey) else {
        log::error!("invalid hotkey");
        return std::ptr::null_mut();
    };
    if history_limit == 0 {
        log::error!("history limit must be positive");
        return std::ptr::null_mut();
    }

    Box::into_raw(Box::new(Config {
        database: PathBuf::from(database),
        history_limit,
        hotkey,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            database = "/tmp/history.db"
            history_limit = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/history.db"));
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.hotkey, "ctrl+shift+v");
    }

    #[test]
    fn config_from_c_strings() {
        let database = std::ffi::CString::new("/tmp/history.db").unwrap();
        let hotkey = std::ffi::CString::new("alt+c").unwrap();

        let config = quickclip_config_new(database.as_ptr(), 20, hotkey.as_ptr());
        assert!(!config.is_null());
        let config = unsafe { Box::from_raw(config) };
        assert_eq!(config.database, PathBuf::from("/tmp/history.db"));
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.hotkey, "alt+c");

        assert!(quickclip_config_new(std::ptr::null(), 20, hotkey.as_ptr()).is_null());
        assert!(quickclip_config_new(database.as_ptr(), 0, hotkey.as_ptr()).is_null());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::parse("history_limit = \"many\"").is_err());
    }
}
