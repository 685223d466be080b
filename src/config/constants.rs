pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const UPLOADS_DIRECTORY: &str = "uploads";
pub const SETTINGS_FILE: &str = "settings.json";

// Extra file fields past this count are dropped and the uploader is told so
pub const MAX_FILES_PER_UPLOAD: usize = 9;

pub const FLASH_COOKIE: &str = "flash";
