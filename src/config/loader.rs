use crate::config::constants::{DEFAULT_BIND, DEFAULT_PORT, SETTINGS_FILE, UPLOADS_DIRECTORY};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not create storage directory {}: {source}", path.display())]
    StorageDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read settings file: {0}")]
    SettingsRead(#[source] std::io::Error),
    #[error("could not write settings file: {0}")]
    SettingsWrite(#[source] std::io::Error),
    #[error("malformed settings file: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}

/// Command line of the host process. Every flag can also be given through
/// the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "lan-drop", version, about = "LAN file upload server")]
pub struct Cli {
    #[arg(short, long, env = "LANDROP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(short, long, env = "LANDROP_BIND", default_value = DEFAULT_BIND)]
    pub bind: IpAddr,

    /// Directory uploaded files are written to. Overrides the settings file.
    #[arg(short, long, env = "LANDROP_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Settings record holding the operator's storage directory choice
    #[arg(long, env = "LANDROP_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Request body limit in megabytes; unlimited when unset
    #[arg(long, env = "LANDROP_MAX_BODY_MB")]
    pub max_body_mb: Option<usize>,

    /// Read operator commands from stdin
    #[arg(long, default_value_t = false)]
    pub controls: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
    pub storage_dir: Option<PathBuf>,
    pub default_storage_dir: PathBuf,
    pub settings_file: PathBuf,
    pub body_limit: Option<usize>,
    pub controls: bool,
}

impl Config {
    pub fn new(cli: Cli) -> Config {
        let base = application_dir();
        Config {
            bind: cli.bind,
            port: cli.port,
            storage_dir: cli.storage_dir,
            default_storage_dir: base.join(UPLOADS_DIRECTORY),
            settings_file: cli.settings.unwrap_or_else(|| base.join(SETTINGS_FILE)),
            body_limit: cli.max_body_mb.map(|mb| mb * 1024 * 1024),
            controls: cli.controls,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

// Directory holding the executable, so a copied binary keeps its uploads next to it
fn application_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
