//! Scoped environment overrides for configuration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Restores every touched variable when dropped.
///
/// Holding the guard also holds a process-wide lock, so tests that read the
/// environment never observe another test's overrides.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes`; `None` removes the variable.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let previous = changes
            .iter()
            .map(|(key, value)| {
                let saved = (OsString::from(key), env::var_os(key));
                // SAFETY: the global mutex serializes environment mutations in tests.
                unsafe { apply(key, *value) };
                saved
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }

    /// Removes every listed variable for the guard lifetime.
    pub fn cleared(keys: &[&str]) -> Self {
        let changes: Vec<(&str, Option<&str>)> = keys.iter().map(|key| (*key, None)).collect();
        Self::set_many(&changes)
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            // SAFETY: the global mutex is still held by this guard.
            unsafe {
                match value {
                    Some(previous) => env::set_var(&key, previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

unsafe fn apply(key: &str, value: Option<&str>) {
    // SAFETY: callers hold the environment mutex.
    unsafe {
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}
