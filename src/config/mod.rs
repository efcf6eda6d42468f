//! Configuration management for the autodiary application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It supports configuring where the diary table
//! lives, where reports are written, and which year counts as the partial first year.
//!
//! # Environment Variables
//!
//! - `AUTODIARY_DIR`: Directory holding the diary table (defaults to ~/Documents/diary)
//! - `AUTODIARY_FILE`: File name of the diary table (defaults to diary-data.csv)
//! - `AUTODIARY_REPORTS_DIR`: Directory for report files (defaults to AUTODIARY_DIR)
//! - `AUTODIARY_PARTIAL_YEAR`: Year excluded from statistics as incomplete
//! - `HOME`: Used for expanding the default diary directory path

use crate::constants::{
    DEFAULT_DIARY_FILE, DEFAULT_DIARY_SUBDIR, ENV_VAR_DIARY_DIR, ENV_VAR_DIARY_FILE,
    ENV_VAR_HOME, ENV_VAR_PARTIAL_YEAR, ENV_VAR_REPORTS_DIR, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for the autodiary application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use autodiary::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     diary_dir: PathBuf::from("/path/to/diary"),
///     diary_file: "diary-data.csv".to_string(),
///     reports_dir: PathBuf::from("/path/to/diary"),
///     partial_year: Some(2013),
/// };
/// assert_eq!(config.table_path(), PathBuf::from("/path/to/diary/diary-data.csv"));
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use autodiary::Config;
/// use std::env;
///
/// env::set_var("AUTODIARY_DIR", "/custom/diary/path");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.reports_dir, config.diary_dir);
/// ```
#[derive(Clone, PartialEq)]
pub struct Config {
    /// Directory where the diary table is stored.
    ///
    /// Loaded from `AUTODIARY_DIR` with a fallback to ~/Documents/diary.
    pub diary_dir: PathBuf,

    /// File name of the diary table inside `diary_dir`.
    pub diary_file: String,

    /// Directory where `statistics.csv` and search reports are written.
    pub reports_dir: PathBuf,

    /// The year treated as partial, overriding the year of the first entry.
    pub partial_year: Option<i32>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("diary_dir", &REDACTED_PLACEHOLDER)
            .field("diary_file", &self.diary_file)
            .field("reports_dir", &REDACTED_PLACEHOLDER)
            .field("partial_year", &self.partial_year)
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default values.
    fn default() -> Self {
        Config {
            diary_dir: PathBuf::from(""),
            diary_file: DEFAULT_DIARY_FILE.to_string(),
            reports_dir: PathBuf::from(""),
            partial_year: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Directory paths are expanded with `shellexpand`, so `~` and `$VAR`
    /// references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - A path expansion fails
    /// - The diary directory expands to an empty path
    /// - The file name is empty or contains a path separator
    /// - `AUTODIARY_PARTIAL_YEAR` is not an integer
    pub fn load() -> AppResult<Self> {
        let diary_dir_str = env::var(ENV_VAR_DIARY_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DIARY_SUBDIR)
        });
        let diary_dir = expand_path(&diary_dir_str)?;

        if diary_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Diary directory path is empty".to_string(),
            ));
        }

        let diary_file =
            env::var(ENV_VAR_DIARY_FILE).unwrap_or_else(|_| DEFAULT_DIARY_FILE.to_string());
        Config::validate_file_name(&diary_file)?;

        let reports_dir = match env::var(ENV_VAR_REPORTS_DIR) {
            Ok(dir) if !dir.trim().is_empty() => expand_path(&dir)?,
            _ => diary_dir.clone(),
        };

        let partial_year = match env::var(ENV_VAR_PARTIAL_YEAR) {
            Ok(value) if !value.trim().is_empty() => {
                Some(value.trim().parse::<i32>().map_err(|_| {
                    AppError::Config(format!(
                        "{} must be a year, got '{}'",
                        ENV_VAR_PARTIAL_YEAR, value
                    ))
                })?)
            }
            _ => None,
        };

        Ok(Config {
            diary_dir,
            diary_file,
            reports_dir,
            partial_year,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if either directory is empty or relative, or if
    /// the file name is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use autodiary::Config;
    /// use std::path::PathBuf;
    ///
    /// let config = Config {
    ///     diary_dir: PathBuf::from("relative/path"),
    ///     reports_dir: PathBuf::from("/absolute/path"),
    ///     ..Config::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        Config::validate_dir("Diary directory", &self.diary_dir)?;
        Config::validate_dir("Reports directory", &self.reports_dir)?;
        Config::validate_file_name(&self.diary_file)?;
        Ok(())
    }

    /// Full path of the diary table.
    pub fn table_path(&self) -> PathBuf {
        self.diary_dir.join(&self.diary_file)
    }

    fn validate_dir(label: &str, dir: &Path) -> AppResult<()> {
        if dir.as_os_str().is_empty() {
            return Err(AppError::Config(format!("{} path is empty", label)));
        }
        if !dir.is_absolute() {
            return Err(AppError::Config(format!(
                "{} must be an absolute path",
                label
            )));
        }
        Ok(())
    }

    fn validate_file_name(name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::Config(
                "Diary file name cannot be empty".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(AppError::Config(format!(
                "Diary file name cannot contain a path separator: '{}'",
                name
            )));
        }
        Ok(())
    }
}

fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    const VARS: [&str; 4] = [
        ENV_VAR_DIARY_DIR,
        ENV_VAR_DIARY_FILE,
        ENV_VAR_REPORTS_DIR,
        ENV_VAR_PARTIAL_YEAR,
    ];

    /// Runs `f` with the diary variables cleared, restoring them afterwards.
    fn with_clean_env<T>(f: impl FnOnce() -> T) -> T {
        let saved: Vec<(&str, Option<String>)> =
            VARS.iter().map(|v| (*v, env::var(v).ok())).collect();
        for var in VARS {
            env::remove_var(var);
        }

        let result = f();

        for (var, value) in saved {
            match value {
                Some(v) => env::set_var(var, v),
                None => env::remove_var(var),
            }
        }
        result
    }

    #[test]
    fn test_debug_impl_redacts_paths() {
        let config = Config {
            diary_dir: PathBuf::from("/home/username/private/diary"),
            diary_file: "diary-data.csv".to_string(),
            reports_dir: PathBuf::from("/home/username/private/reports"),
            partial_year: None,
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("/home/username/private"));
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dir() {
        let temp_dir = tempdir().unwrap();
        let dir_path = temp_dir.path().to_string_lossy().to_string();

        let config = with_clean_env(|| {
            env::set_var(ENV_VAR_DIARY_DIR, &dir_path);
            Config::load().unwrap()
        });

        assert_eq!(config.diary_dir, PathBuf::from(&dir_path));
        assert_eq!(config.reports_dir, config.diary_dir);
        assert_eq!(config.diary_file, DEFAULT_DIARY_FILE);
        assert_eq!(config.partial_year, None);
        assert_eq!(
            config.table_path(),
            PathBuf::from(dir_path).join(DEFAULT_DIARY_FILE)
        );
    }

    #[test]
    #[serial]
    fn test_load_with_every_variable() {
        let config = with_clean_env(|| {
            env::set_var(ENV_VAR_DIARY_DIR, "/data/diary");
            env::set_var(ENV_VAR_DIARY_FILE, "log.csv");
            env::set_var(ENV_VAR_REPORTS_DIR, "/data/reports");
            env::set_var(ENV_VAR_PARTIAL_YEAR, "2013");
            Config::load().unwrap()
        });

        assert_eq!(config.table_path(), PathBuf::from("/data/diary/log.csv"));
        assert_eq!(config.reports_dir, PathBuf::from("/data/reports"));
        assert_eq!(config.partial_year, Some(2013));
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_partial_year() {
        let result = with_clean_env(|| {
            env::set_var(ENV_VAR_DIARY_DIR, "/data/diary");
            env::set_var(ENV_VAR_PARTIAL_YEAR, "last year");
            Config::load()
        });

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains(ENV_VAR_PARTIAL_YEAR)),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_load_rejects_file_name_with_separator() {
        let result = with_clean_env(|| {
            env::set_var(ENV_VAR_DIARY_DIR, "/data/diary");
            env::set_var(ENV_VAR_DIARY_FILE, "../elsewhere.csv");
            Config::load()
        });

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_relative_dirs() {
        let config = Config {
            diary_dir: PathBuf::from("relative/path"),
            reports_dir: PathBuf::from("/absolute"),
            ..Config::default()
        };
        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Diary directory must be an absolute path"))
            }
            _ => panic!("Expected Config error about relative path"),
        }

        let config = Config {
            diary_dir: PathBuf::from("/absolute"),
            reports_dir: PathBuf::from("reports"),
            ..Config::default()
        };
        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Reports directory must be an absolute path"))
            }
            _ => panic!("Expected Config error about relative reports path"),
        }
    }

    #[test]
    fn test_validate_empty_diary_dir() {
        let config = Config::default();
        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Diary directory path is empty"))
            }
            _ => panic!("Expected Config error about empty directory"),
        }
    }
}
