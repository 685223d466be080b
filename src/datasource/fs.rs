use crate::config::loader::{Config, ConfigError};
use crate::config::settings::Settings;
use crate::services::storage::StorageDir;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Picks the storage directory for this run and makes sure it exists.
///
/// An explicit directory must be usable. A directory remembered in the
/// settings record falls back to the default when it cannot be created.
pub fn init_fs(config: &Config) -> Result<StorageDir, ConfigError> {
    if let Some(dir) = &config.storage_dir {
        let path = ensure_dir(dir)?;
        return Ok(StorageDir::new(path));
    }

    match Settings::load(&config.settings_file) {
        Ok(Some(settings)) => match ensure_dir(&settings.storage_path) {
            Ok(path) => return Ok(StorageDir::new(path)),
            Err(e) => warn!("{} - using the default directory", e),
        },
        Ok(None) => {}
        Err(e) => warn!("ignoring {}: {}", config.settings_file.display(), e),
    }

    let path = ensure_dir(&config.default_storage_dir)?;
    Ok(StorageDir::new(path))
}

fn ensure_dir(dir: &Path) -> Result<PathBuf, ConfigError> {
    let to_err = |source| ConfigError::StorageDir {
        path: dir.to_path_buf(),
        source,
    };

    if dir.is_dir() {
        info!("using storage directory {}", dir.display());
    } else {
        std::fs::create_dir_all(dir).map_err(to_err)?;
        info!("created storage directory {}", dir.display());
    }
    dir.canonicalize().map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(root: &Path) -> Config {
        Config {
            bind: "127.0.0.1".parse().unwrap(),
            port: 0,
            storage_dir: None,
            default_storage_dir: root.join("uploads"),
            settings_file: root.join("settings.json"),
            body_limit: None,
            controls: false,
        }
    }

    #[test]
    fn test_default_dir_created() {
        let root = tempdir().unwrap();
        let storage = init_fs(&config(root.path())).unwrap();

        assert!(root.path().join("uploads").is_dir());
        assert_eq!(
            storage.path(),
            root.path().join("uploads").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_explicit_dir_wins() {
        let root = tempdir().unwrap();
        let mut config = config(root.path());
        config.storage_dir = Some(root.path().join("explicit"));
        Settings {
            storage_path: root.path().join("remembered"),
        }
        .save(&config.settings_file)
        .unwrap();

        let storage = init_fs(&config).unwrap();

        assert!(storage.path().ends_with("explicit"));
        assert!(!root.path().join("remembered").exists());
    }

    #[test]
    fn test_settings_dir_used() {
        let root = tempdir().unwrap();
        let config = config(root.path());
        Settings {
            storage_path: root.path().join("remembered"),
        }
        .save(&config.settings_file)
        .unwrap();

        let storage = init_fs(&config).unwrap();

        assert!(storage.path().ends_with("remembered"));
        assert!(root.path().join("remembered").is_dir());
    }

    #[test]
    fn test_unusable_settings_dir_falls_back() {
        let root = tempdir().unwrap();
        let config = config(root.path());
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        Settings {
            storage_path: blocker.join("store"),
        }
        .save(&config.settings_file)
        .unwrap();

        let storage = init_fs(&config).unwrap();

        assert!(storage.path().ends_with("uploads"));
    }

    #[test]
    fn test_unusable_explicit_dir_is_fatal() {
        let root = tempdir().unwrap();
        let mut config = config(root.path());
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        config.storage_dir = Some(blocker.join("store"));

        let result = init_fs(&config);

        assert!(matches!(result, Err(ConfigError::StorageDir { .. })));
    }
}
