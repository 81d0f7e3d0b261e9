//! Runtime configuration: backend URL and local data directory.

use std::path::PathBuf;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "TOEBEANS_API_URL";

/// Resolve the backend base URL: env override, then the default.
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// The `~/.toebeans` data directory (session flags, log file).
/// `None` when the home directory cannot be determined.
pub fn data_dir() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".toebeans"))
}

/// Path of the log file inside the data directory.
pub fn log_file_path() -> Option<PathBuf> {
    Some(data_dir()?.join("toebeans.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_without_override() {
        // Runs in-process: only meaningful when the variable is unset,
        // which is the normal test environment.
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(api_base_url(), DEFAULT_API_URL);
        }
    }

    #[test]
    fn test_data_dir_is_under_home() {
        let dir = data_dir().unwrap();
        assert!(dir.ends_with(".toebeans"));
    }
}
