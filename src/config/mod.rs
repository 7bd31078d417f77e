mod auth;

use std::{env, fs::read_to_string, path::PathBuf, str::FromStr};

use derive_getters::Getters;
use serde::Deserialize;

pub use auth::AuthConfig;

use crate::purge::{FolderTarget, default_targets};

#[derive(Deserialize)]
struct TargetEntry {
    folder: String,
    #[serde(default = "unseen")]
    criteria: String,
}

fn unseen() -> String {
    "UNSEEN".to_string()
}

#[derive(Deserialize, Getters)]
pub struct Config {
    host: String,
    #[serde(default = "imaps_port")]
    port: u16,
    auth: AuthConfig,
    #[serde(default)]
    #[getter(skip)]
    targets: Vec<TargetEntry>,
}

fn imaps_port() -> u16 {
    993
}

impl Config {
    pub fn load_from_file(file: Option<PathBuf>) -> Self {
        let config_file = file.unwrap_or_else(default_location);
        let contents = read_to_string(&config_file).expect("config file should be readable");
        toml::from_str(&contents).expect("config should be parseable")
    }

    /// Configured sweep targets, or the stock inbox-and-junk pair when the
    /// file names none.
    pub fn targets(&self) -> Vec<FolderTarget> {
        if self.targets.is_empty() {
            return default_targets();
        }
        self.targets
            .iter()
            .map(|entry| FolderTarget::new(entry.folder.clone(), entry.criteria.clone()))
            .collect()
    }
}

fn default_location() -> PathBuf {
    let mut config_dir = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from_str(&config_home).expect("XDG_CONFIG_HOME should be a parseable path")
    } else {
        let mut config_home = home();
        config_home.push(".config");
        config_home
    };
    config_dir.push(env!("CARGO_PKG_NAME"));
    config_dir.push("config.toml");

    config_dir
}

fn home() -> PathBuf {
    PathBuf::from_str(&env::var("HOME").expect("HOME should be set"))
        .expect("HOME should be a parseable path")
}
