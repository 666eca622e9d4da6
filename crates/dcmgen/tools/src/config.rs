use anyhow::{Context, Result};
use dcmgen_compiler::{
    GenerationConfig, ParserConfig,
    codegen::{DcmOptions, config::DEFAULT_MICROTIME_ONSET},
    model::DEFAULT_TE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at a configuration file
pub const CONFIG_ENV: &str = "DCMGEN_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub base_dir: Option<PathBuf>,
    pub strict: bool,
    pub default_te: f64,
    pub microtime_onset: usize,
    pub options: DcmOptions,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            strict: false,
            default_te: DEFAULT_TE,
            microtime_onset: DEFAULT_MICROTIME_ONSET,
            options: DcmOptions::default(),
        }
    }
}

impl ToolConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// CLI path first, then the environment, then defaults
    pub fn resolve_config(cli_config: Option<PathBuf>, env_config: Option<String>) -> Result<Self> {
        if let Some(config_path) = cli_config {
            Self::load_from_file(config_path)
        } else if let Some(env_config) = env_config.filter(|path| !path.is_empty()) {
            Self::load_from_file(env_config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_required_modulated_edges(self.strict).with_default_te(self.default_te)
    }

    pub fn generation_config(&self, base_dir: &Path, dcm_folder: &str) -> GenerationConfig {
        GenerationConfig::new(base_dir.display().to_string(), dcm_folder)
            .with_microtime_onset(self.microtime_onset)
            .with_options(self.options.clone())
    }
}
