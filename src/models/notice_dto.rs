use crate::config::constants::MAX_FILES_PER_UPLOAD;
use std::fmt;

/// Advisory outcome of an upload, shown once on the next page load.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    NoFileSelected,
    NoValidFile,
    Uploaded(usize),
    Rejected(usize),
    Capped(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

impl Notice {
    pub fn level(&self) -> Level {
        match self {
            Notice::Uploaded(_) => Level::Success,
            Notice::Rejected(_) | Notice::Capped(_) => Level::Warning,
            Notice::NoFileSelected | Notice::NoValidFile => Level::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::NoFileSelected => "No file selected".to_string(),
            Notice::NoValidFile => "No valid file was uploaded".to_string(),
            Notice::Uploaded(1) => "File uploaded successfully".to_string(),
            Notice::Uploaded(n) => format!("{n} files uploaded successfully"),
            Notice::Rejected(1) => "1 file skipped: unsupported file type".to_string(),
            Notice::Rejected(n) => format!("{n} files skipped: unsupported file type"),
            Notice::Capped(n) => {
                format!("At most {n} files can be uploaded at once, only the first {n} were kept")
            }
        }
    }

    pub fn from_token(s: &str) -> Option<Notice> {
        match s {
            "no-file" => Some(Notice::NoFileSelected),
            "no-valid" => Some(Notice::NoValidFile),
            _ => {
                let (kind, count) = s.split_once('-')?;
                let count: usize = count.parse().ok()?;
                match kind {
                    "uploaded" => Some(Notice::Uploaded(count)),
                    "rejected" => Some(Notice::Rejected(count)),
                    "capped" => Some(Notice::Capped(count.min(MAX_FILES_PER_UPLOAD))),
                    _ => None,
                }
            }
        }
    }
}

// Tokens only use [a-z0-9-] so they can sit in a cookie value unescaped
impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoFileSelected => write!(f, "no-file"),
            Notice::NoValidFile => write!(f, "no-valid"),
            Notice::Uploaded(n) => write!(f, "uploaded-{n}"),
            Notice::Rejected(n) => write!(f, "rejected-{n}"),
            Notice::Capped(n) => write!(f, "capped-{n}"),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Success => write!(f, "success"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

pub fn encode_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Unknown tokens are dropped, the flash cookie is client controlled.
pub fn decode_notices(value: &str) -> Vec<Notice> {
    value.split('.').filter_map(Notice::from_token).collect()
}
