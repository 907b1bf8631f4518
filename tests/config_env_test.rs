//! Environment layer of Settings loading.
//!
//! Kept in its own test binary: environment variables are process-global,
//! so these tests must not share a process with other config tests.
//! Within this file they are serialized through `ENV_LOCK`.

use std::env;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use karytree::config::{Settings, SettingsError};
use karytree::HeapifyMode;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets an environment variable for the lifetime of the guard.
struct EnvVar {
    key: &'static str,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVar {
    fn set(key: &'static str, value: &str) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::set_var(key, value);
        Self { key, _lock: lock }
    }
}

impl Drop for EnvVar {
    fn drop(&mut self) {
        env::remove_var(self.key);
    }
}

#[test]
fn given_env_var_when_loading_then_overrides_files() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&global, "max_children = 4\n").unwrap();
    fs::write(&explicit, "max_children = 5\n").unwrap();
    let _var = EnvVar::set("KARYTREE_MAX_CHILDREN", "3");

    let settings = Settings::load_from(Some(&global), Some(&explicit)).expect("load settings");

    assert_eq!(settings.max_children, 3);
}

#[test]
fn given_env_heapify_mode_when_loading_then_parsed_as_kebab_case() {
    let _var = EnvVar::set("KARYTREE_HEAPIFY_MODE", "sift-down");

    let settings = Settings::load_from(None, None).expect("load settings");

    assert_eq!(settings.heapify_mode, HeapifyMode::SiftDown);
    assert_eq!(settings.max_children, 2);
}

#[test]
fn given_zero_max_children_in_env_when_loading_then_invalid() {
    let _var = EnvVar::set("KARYTREE_MAX_CHILDREN", "0");

    let result = Settings::load_from(None, None);

    assert!(matches!(
        result,
        Err(SettingsError::Invalid {
            key: "max_children",
            ..
        })
    ));
}
