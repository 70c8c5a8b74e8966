//! Where sketch-keys keeps its files
//!
//! - Unix/macOS: `~/.config/sketch-keys/`
//! - Windows: `%APPDATA%\sketch-keys\`

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "sketch-keys";

/// Name of the rolling log file inside [`logs_dir`]
pub const LOG_FILE_NAME: &str = "sketch-keys.log";

/// Base config directory
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/sketch-keys`
///   - Else: `~/.config/sketch-keys`
///
/// Windows:
///   - `%APPDATA%\sketch-keys`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/sketch-keys/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/sketch-keys/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

fn missing_config_dir() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "no config directory available")
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> io::Result<PathBuf> {
    let dir = config_dir().ok_or_else(missing_config_dir)?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
