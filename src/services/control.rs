use crate::config::settings::Settings;
use crate::services::storage::{StorageDir, StorageError};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::Command as Process;
use std::str::FromStr;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("Could not change storage directory: {0}")]
    Storage(#[from] StorageError),
    #[error("Could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Status,
    ShowPath,
    SetPath(PathBuf),
    Open,
    Stop,
    Help,
}

impl FromStr for Command {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match (name.to_lowercase().as_str(), arg) {
            ("status", _) => Ok(Command::Status),
            ("path", "") => Ok(Command::ShowPath),
            ("path", dir) => Ok(Command::SetPath(PathBuf::from(dir))),
            ("open", _) => Ok(Command::Open),
            ("stop" | "quit" | "exit", _) => Ok(Command::Stop),
            ("help" | "?", _) => Ok(Command::Help),
            _ => Err(ControlError::UnknownCommand(line.to_string())),
        }
    }
}

const HELP: &str = "\
commands:
  status       show the upload address and storage directory
  path         show the storage directory
  path <dir>   change the storage directory (created if missing)
  open         open the storage directory in the file browser
  stop         shut the server down";

/// Operator side of the host: owns the settings record and changes the
/// storage directory on request.
pub struct Controls {
    storage: StorageDir,
    settings_file: PathBuf,
    address: String,
}

impl Controls {
    pub fn new(storage: StorageDir, settings_file: PathBuf, address: String) -> Controls {
        Controls {
            storage,
            settings_file,
            address,
        }
    }

    /// Runs one command and returns the text to show the operator.
    pub fn apply(&self, command: Command) -> Result<String, ControlError> {
        match command {
            Command::Status => Ok(format!(
                "serving on {}\nstoring files in {}",
                self.address,
                self.storage.path().display()
            )),
            Command::ShowPath => Ok(self.storage.path().display().to_string()),
            Command::SetPath(dir) => {
                let path = self.change_storage_dir(&dir)?;
                Ok(format!("storage directory changed to {}", path.display()))
            }
            Command::Open => {
                let path = self.storage.path();
                open_in_file_browser(&path)?;
                Ok(format!("opened {}", path.display()))
            }
            Command::Help => Ok(HELP.to_string()),
            Command::Stop => Ok("stopping".to_string()),
        }
    }

    fn change_storage_dir(&self, dir: &Path) -> Result<PathBuf, ControlError> {
        let path = self.storage.set(dir)?;

        // The change stays in effect for this run even if it cannot be saved
        let settings = Settings {
            storage_path: path.clone(),
        };
        if let Err(e) = settings.save(&self.settings_file) {
            warn!("{}", e);
        }

        Ok(path)
    }

    /// Reads commands from stdin until `stop`, end of input or shutdown.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut lines = stdin_lines();
        println!("{HELP}");

        loop {
            let line = tokio::select! {
                _ = shutdown.cancelled() => break,
                line = lines.recv() => line,
            };

            let line = match line {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => line,
                None => {
                    info!("operator console closed");
                    break;
                }
            };

            match line.parse::<Command>() {
                Ok(Command::Stop) => {
                    info!("shutdown requested by operator");
                    shutdown.cancel();
                    break;
                }
                Ok(command) => match self.apply(command) {
                    Ok(reply) => println!("{reply}"),
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("{e}"),
            }
        }
    }
}

// A blocked stdin read would hold up runtime shutdown, so it gets its own
// detached thread.
fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("could not read operator input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Opens `path` with the platform file browser, creating it first if needed.
pub fn open_in_file_browser(path: &Path) -> Result<(), ControlError> {
    let opener = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    std::fs::create_dir_all(path)
        .and_then(|_| Process::new(opener).arg(path).spawn())
        .map(|_| ())
        .map_err(|source| ControlError::Open {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_commands() {
        assert_eq!("status".parse::<Command>().unwrap(), Command::Status);
        assert_eq!("  PATH ".parse::<Command>().unwrap(), Command::ShowPath);
        assert_eq!(
            "path /srv/my drop".parse::<Command>().unwrap(),
            Command::SetPath(PathBuf::from("/srv/my drop"))
        );
        assert_eq!("open".parse::<Command>().unwrap(), Command::Open);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Stop);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
        assert!(matches!(
            "format c:".parse::<Command>(),
            Err(ControlError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_set_path_persists_settings() {
        let dir = tempdir().unwrap();
        let storage = StorageDir::new(dir.path().join("uploads"));
        let settings_file = dir.path().join("settings.json");
        let controls = Controls::new(
            storage.clone(),
            settings_file.clone(),
            "http://127.0.0.1:5000".to_string(),
        );

        let target = dir.path().join("elsewhere");
        let reply = controls.apply(Command::SetPath(target.clone())).unwrap();

        assert!(reply.contains("elsewhere"));
        assert!(target.is_dir());
        assert_eq!(storage.path(), target.canonicalize().unwrap());
        let saved = Settings::load(&settings_file).unwrap().unwrap();
        assert_eq!(saved.storage_path, storage.path());
    }

    #[test]
    fn test_set_path_failure_keeps_old_dir() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let storage = StorageDir::new(dir.path().to_path_buf());
        let settings_file = dir.path().join("settings.json");
        let controls = Controls::new(storage.clone(), settings_file.clone(), String::new());

        let result = controls.apply(Command::SetPath(blocker.join("store")));

        assert!(matches!(result, Err(ControlError::Storage(_))));
        assert_eq!(storage.path(), dir.path());
        assert!(!settings_file.exists());
    }

    #[test]
    fn test_status() {
        let dir = tempdir().unwrap();
        let storage = StorageDir::new(dir.path().to_path_buf());
        let controls = Controls::new(
            storage,
            dir.path().join("settings.json"),
            "http://10.0.0.5:5000".to_string(),
        );

        let reply = controls.apply(Command::Status).unwrap();
        assert!(reply.contains("http://10.0.0.5:5000"));
        assert!(reply.contains(&dir.path().display().to_string()));
    }
}
