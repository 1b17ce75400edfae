use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the user's config base.
const APP_DIR: &str = "country-atlas";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Return `$HOME/.config/country-atlas`, ensuring it exists.
///
/// Output: `Some(PathBuf)` when HOME is set and directory can be created; `None` otherwise.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join(APP_DIR);
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// Config directory for the application (ensured to exist).
///
/// `COUNTRY_ATLAS_CONFIG_DIR` wins when set; otherwise `$HOME/.config/country-atlas`,
/// then `$XDG_CONFIG_HOME/country-atlas`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(p) = env::var("COUNTRY_ATLAS_CONFIG_DIR")
        && !p.trim().is_empty()
    {
        let dir = PathBuf::from(p);
        let _ = std::fs::create_dir_all(&dir);
        return dir;
    }
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join(APP_DIR);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `<config>/logs` (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of `settings.conf`.
#[must_use]
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}

/// Path of the durable key/value store.
#[must_use]
pub fn storage_path() -> PathBuf {
    config_dir().join("storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Explicit config dir override is honoured and created
    ///
    /// - Input: `COUNTRY_ATLAS_CONFIG_DIR` pointing into a temp dir
    /// - Output: settings/storage/logs paths live below it
    fn paths_respect_override() {
        let _guard = crate::state::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let tmp = tempfile::tempdir().expect("tempdir");
        let target = tmp.path().join("cfg");
        let prev = env::var("COUNTRY_ATLAS_CONFIG_DIR").ok();
        unsafe {
            env::set_var("COUNTRY_ATLAS_CONFIG_DIR", &target);
        }
        assert_eq!(config_dir(), target);
        assert!(target.is_dir());
        assert_eq!(settings_path(), target.join("settings.conf"));
        assert_eq!(storage_path(), target.join("storage.json"));
        assert!(logs_dir().is_dir());
        unsafe {
            match prev {
                Some(p) => env::set_var("COUNTRY_ATLAS_CONFIG_DIR", p),
                None => env::remove_var("COUNTRY_ATLAS_CONFIG_DIR"),
            }
        }
    }
}
