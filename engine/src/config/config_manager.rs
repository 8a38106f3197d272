use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a config. A missing source yields
/// `TConfig::default()` without caching it, so a later `set_config` still wins.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        if let Some(config_data) = self.config_content_provider.get_config_content()? {
            let config = self.config_serializer.deserialize(&config_data)?;

            config
                .validate()
                .map_err(|e| format!("Config validation error: {}", e))?;

            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;

        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        width: u32,
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.width > 100 {
                return Err("width must not exceed 100".to_string());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryContentProvider {
        content: RefCell<Option<String>>,
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_engine_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_missing_content_yields_default() {
        let manager = ConfigManager::new(MemoryContentProvider::default(), YamlConfigSerializer::new());
        let config: TestConfig = manager.get_config().unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_set_then_get_returns_same_config() {
        let manager = ConfigManager::new(MemoryContentProvider::default(), YamlConfigSerializer::new());
        let config = TestConfig { width: 42 };
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_set_rejects_invalid_config() {
        let manager = ConfigManager::new(MemoryContentProvider::default(), YamlConfigSerializer::new());
        let result = manager.set_config(&TestConfig { width: 500 });
        assert!(result.unwrap_err().contains("Config validation error"));
    }

    #[test]
    fn test_invalid_stored_content_is_rejected() {
        let provider = MemoryContentProvider::default();
        provider.set_config_content("width: 1000\n").unwrap();
        let manager: ConfigManager<_, TestConfig> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let file_path = get_temp_file_path();
        let writer: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(file_path.clone());
        writer.set_config(&TestConfig { width: 17 }).unwrap();

        let reader: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(file_path.clone());
        assert_eq!(reader.get_config().unwrap(), TestConfig { width: 17 });

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let provider = FileContentConfigProvider::new(get_temp_file_path());
        assert_eq!(provider.get_config_content().unwrap(), None);
    }
}
