//! RON configuration: provider credentials, the enabled model list, and the
//! remembered model choice.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use summa_core::ModelDescriptor;
use summa_engine::{SummarizerSettings, PROVIDERS};
use summa_logging::{summa_error, summa_info, summa_warn};

pub const DEFAULT_CONFIG_FILENAME: &str = "summa.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub provider: String,
    pub id: String,
    pub name: String,
}

impl ModelEntry {
    pub fn to_descriptor(&self) -> ModelDescriptor {
        ModelDescriptor::new(&self.provider, &self.id, &self.name)
    }

    pub fn from_descriptor(model: &ModelDescriptor) -> Self {
        Self {
            provider: model.provider_id.clone(),
            id: model.model_id.clone(),
            name: model.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Per-provider API keys, keyed by provider id.
    #[serde(default)]
    pub api_keys: BTreeMap<String, String>,
    /// Per-provider base URL overrides.
    #[serde(default)]
    pub base_urls: BTreeMap<String, String>,
    /// Explicitly enabled models; empty means "defaults of the providers
    /// that have credentials".
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    /// The model picked last time.
    #[serde(default)]
    pub current_model: Option<ModelEntry>,
    /// Overrides the built-in system prompt.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl AppConfig {
    /// Loads the configuration, degrading to defaults with a warning when the
    /// file is missing or malformed.
    pub fn load(path: &Path) -> AppConfig {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return AppConfig::default();
            }
            Err(err) => {
                summa_warn!("Failed to read configuration from {:?}: {}", path, err);
                return AppConfig::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => {
                summa_info!("Loaded configuration from {:?}", path);
                config
            }
            Err(err) => {
                summa_warn!("Failed to parse configuration from {:?}: {}", path, err);
                AppConfig::default()
            }
        }
    }

    /// Writes the configuration atomically: temp file in the same directory,
    /// then rename over the target.
    pub fn save(&self, path: &Path) {
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(self, pretty) {
            Ok(text) => text,
            Err(err) => {
                summa_error!("Failed to serialize configuration: {}", err);
                return;
            }
        };

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let result = (|| -> std::io::Result<()> {
            let mut tmp = match dir {
                Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
                None => tempfile::NamedTempFile::new_in(".")?,
            };
            tmp.write_all(content.as_bytes())?;
            tmp.flush()?;
            tmp.persist(path).map_err(|err| err.error)?;
            Ok(())
        })();
        if let Err(err) = result {
            summa_error!("Failed to write configuration to {:?}: {}", path, err);
        }
    }

    /// The live list of enabled models: the explicit list when present,
    /// otherwise the default models of every provider whose credentials are
    /// in place.
    pub fn enabled_models(&self) -> Vec<ModelDescriptor> {
        if !self.models.is_empty() {
            return self.models.iter().map(ModelEntry::to_descriptor).collect();
        }
        let mut enabled = Vec::new();
        for provider in PROVIDERS {
            let has_key = self
                .api_keys
                .get(provider.id)
                .is_some_and(|key| !key.is_empty());
            if provider.requires_api_key && !has_key {
                continue;
            }
            for (model_id, display_name) in provider.default_models {
                enabled.push(ModelDescriptor::new(provider.id, *model_id, *display_name));
            }
        }
        enabled
    }

    pub fn saved_model(&self) -> Option<ModelDescriptor> {
        self.current_model.as_ref().map(ModelEntry::to_descriptor)
    }

    pub fn remember_model(&mut self, model: &ModelDescriptor) {
        self.current_model = Some(ModelEntry::from_descriptor(model));
    }

    pub fn summarizer_settings(&self) -> SummarizerSettings {
        SummarizerSettings {
            api_keys: self.api_keys.clone().into_iter().collect(),
            base_urls: self.base_urls.clone().into_iter().collect(),
            system_prompt: self.system_prompt.clone(),
            ..SummarizerSettings::default()
        }
    }
}
