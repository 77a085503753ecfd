//! XDG Base Directory support.

use std::path::PathBuf;

const APP_DIR: &str = "memberchat";

/// XDG directory paths for memberchat.
#[derive(Debug, Clone)]
pub struct XdgDirs {
    /// Config directory (~/.config/memberchat or XDG_CONFIG_HOME/memberchat)
    pub config: PathBuf,
    /// State directory (~/.local/state/memberchat or XDG_STATE_HOME/memberchat)
    pub state: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            config: std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".config"))
                .join(APP_DIR),
            state: std::env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".local/state"))
                .join(APP_DIR),
        }
    }

    /// Default settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config.join("config.json")
    }

    /// TUI log file
    pub fn log_file(&self) -> PathBuf {
        self.state.join("memberchat.log")
    }

    /// Create the state directory if needed.
    pub fn ensure_state_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.state)
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
