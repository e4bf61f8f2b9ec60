use chrono::{DateTime, NaiveDate};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for genjin
/// If profile is Dev, uses "genjin-dev" instead of "genjin"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "genjin-dev",
        Profile::Prod => "genjin",
    };
    ProjectDirs::from("com", "genjin", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for genjin
/// If profile is Dev, uses "genjin-dev" instead of "genjin"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "genjin-dev",
        Profile::Prod => "genjin",
    };
    ProjectDirs::from("com", "genjin", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// The current local date. Resolved once per command so one derivation pass
/// never straddles midnight.
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a log entry's `date` field down to day granularity.
///
/// Logs store either a full RFC 3339 timestamp or a plain `YYYY-MM-DD`;
/// both occur in real data. Returns `None` for anything else.
pub fn parse_log_date(date_str: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.date_naive());
    }
    parse_date(date_str.get(..10)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates_and_rfc3339_timestamps() {
        let d = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        assert_eq!(parse_log_date("2025-02-10"), Some(d));
        assert_eq!(parse_log_date("2025-02-10T08:30:00+00:00"), Some(d));
        assert_eq!(parse_log_date("2025-02-10T23:59:59-07:00"), Some(d));
    }

    #[test]
    fn rejects_garbage_log_dates() {
        assert_eq!(parse_log_date("上周"), None);
        assert_eq!(parse_log_date(""), None);
        assert_eq!(parse_log_date("2025-13-40"), None);
    }

    #[test]
    fn expands_tilde_paths() {
        let expanded = expand_path("~/clients.json");
        assert!(!expanded.to_string_lossy().starts_with("~"));
        assert_eq!(expand_path("/tmp/x.json"), PathBuf::from("/tmp/x.json"));
    }
}
