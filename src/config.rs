use crate::error::{RondaError, Result};
use ronda_common::SessionOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Variável de ambiente que troca o caminho do arquivo de configuração
pub const CONFIG_ENV: &str = "RONDA_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Abas, política de localização em branco e formatos de data/hora
    pub session: SessionOptions,
    /// Prefixo do arquivo exportado (`<prefixo>_<AAAA-MM-DD>.xlsx`)
    pub export_file_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionOptions::default(),
            export_file_prefix: "Ronda_Exportada".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Recusa padrões de data/hora que o chrono não entende
    pub fn validate(&self) -> Result<()> {
        self.session.timestamp.validate().map_err(RondaError::Config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        // variável de ambiente tem prioridade
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| RondaError::Config("Diretório home não encontrado".into()))?;
        Ok(home.join(".config").join("ronda").join("config.json"))
    }
}
