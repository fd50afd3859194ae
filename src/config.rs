use std::path::PathBuf;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Working copy holding the `board_agenda_*.txt` files.
    pub board_dir: PathBuf,
    /// Directory of per-member pending sessions.
    pub work_dir: PathBuf,
    pub minutes_url: String,
    pub svn_bin: String,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board_dir: PathBuf::from("data/board"),
            work_dir: PathBuf::from("data/work"),
            minutes_url: "https://whimsy.apache.org/board/minutes".to_string(),
            svn_bin: "svn".to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset or blank values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = AppConfig::default();

        AppConfig {
            board_dir: get("BOARD_DIR").map(PathBuf::from).unwrap_or(defaults.board_dir),
            work_dir: get("AGENDA_WORK").map(PathBuf::from).unwrap_or(defaults.work_dir),
            minutes_url: get("MINUTES_URL").unwrap_or(defaults.minutes_url),
            svn_bin: get("SVN_BIN").unwrap_or(defaults.svn_bin),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }
}
