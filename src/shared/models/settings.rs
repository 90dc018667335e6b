use std::{
    fs, io,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse JSON content from file {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_path: String,
    pub legacy_data_file: String,
    pub static_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tcp_socket_binding: "0.0.0.0".to_string(),
            tcp_socket_port: 5000,
            database_path: "tasks.redb".to_string(),
            legacy_data_file: "data.json".to_string(),
            static_dir: "../frontend/dist".to_string(),
        }
    }
}

impl Settings {
    /// Reads `settings.json` from the working directory, then applies
    /// `TASKBOARD_*` environment overrides.
    pub fn load() -> Result<Settings, SettingsError> {
        Self::load_from(SETTINGS_FILENAME)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read { path: path.to_path_buf(), source });
            }
        };
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Settings, SettingsError> {
        if let Some(bind) = lookup("TASKBOARD_BIND") {
            self.tcp_socket_binding = bind;
        }
        if let Some(port) = lookup("TASKBOARD_PORT") {
            self.tcp_socket_port = port.trim().parse().map_err(|_| SettingsError::InvalidValue {
                key: "TASKBOARD_PORT",
                value: port,
            })?;
        }
        if let Some(db) = lookup("TASKBOARD_DB") {
            self.database_path = db;
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self.tcp_socket_binding.parse().map_err(|_| SettingsError::InvalidValue {
            key: "tcp_socket_binding",
            value: self.tcp_socket_binding.clone(),
        })?;
        Ok(SocketAddr::new(ip, self.tcp_socket_port))
    }
}
