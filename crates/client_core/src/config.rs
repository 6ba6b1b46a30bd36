use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{
    error::{StoreError, StoreResult},
    memory_store::MemoryCollectionStore,
    rest_store::RestCollectionStore,
    store::CollectionStore,
};

pub const SETTINGS_FILE_NAME: &str = "radar.toml";
const SETTINGS_DIR_NAME: &str = "resolution_radar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Remote,
    /// Session-only scratch store; nothing survives a restart.
    Memory,
}

impl StoreBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "remote" | "rest" => Some(StoreBackend::Remote),
            "memory" | "mem" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub store_url: String,
    pub api_key: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Remote,
            store_url: "http://127.0.0.1:54321".into(),
            api_key: None,
        }
    }
}

impl StoreSettings {
    pub fn apply_file_overrides(&mut self, raw: &str) {
        let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("ignoring malformed settings file: {err}");
                return;
            }
        };

        if let Some(v) = file_cfg.get("store_backend") {
            self.set_backend(v);
        }
        if let Some(v) = file_cfg.get("store_url") {
            self.store_url = v.clone();
        }
        if let Some(v) = file_cfg.get("api_key") {
            self.api_key = Some(v.clone());
        }
    }

    /// Later names in each list win over earlier ones.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for name in ["RADAR_STORE_BACKEND", "APP__STORE_BACKEND"] {
            if let Some(v) = lookup(name) {
                self.set_backend(&v);
            }
        }
        for name in ["SUPABASE_URL", "RADAR_STORE_URL", "APP__STORE_URL"] {
            if let Some(v) = lookup(name) {
                self.store_url = v;
            }
        }
        for name in ["SUPABASE_ANON_KEY", "RADAR_API_KEY", "APP__API_KEY"] {
            if let Some(v) = lookup(name) {
                self.api_key = Some(v);
            }
        }
    }

    fn set_backend(&mut self, raw: &str) {
        match StoreBackend::parse(raw) {
            Some(backend) => self.backend = backend,
            None => warn!("unknown store backend '{raw}', keeping {:?}", self.backend),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_settings_path() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
        .filter(|path| path.exists())
}

/// Defaults, then the settings file (explicit path or the first of
/// `./radar.toml` and the per-user config dir), then environment variables.
pub fn load_settings(explicit_path: Option<&Path>) -> StoreSettings {
    let mut settings = StoreSettings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(default_settings_path);
    if let Some(path) = path {
        match fs::read_to_string(&path) {
            Ok(raw) => {
                debug!(path = %path.display(), "loaded settings file");
                settings.apply_file_overrides(&raw);
            }
            Err(err) => warn!("could not read settings file '{}': {err}", path.display()),
        }
    }

    settings.apply_env_overrides(non_empty_env);
    settings
}

pub fn build_store(settings: &StoreSettings) -> StoreResult<Arc<dyn CollectionStore>> {
    match settings.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryCollectionStore::new())),
        StoreBackend::Remote => {
            if settings.store_url.trim().is_empty() {
                return Err(StoreError::new("store_url must not be empty"));
            }
            let store = RestCollectionStore::new(&settings.store_url, settings.api_key.clone())?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
