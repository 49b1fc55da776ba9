//! Конфигурация сервера комнат.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::lifecycle::DEFAULT_NAME_MAX_LEN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Настройки процесса. Все поля необязательны в JSON.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Уровень логов (`info`, `debug`, ...). RUST_LOG главнее.
    pub log_level: String,
    /// Структурированные JSON-логи.
    pub log_json: bool,
    /// Сколько комнат держать одновременно (None – без ограничения;
    /// тогда комнаты, в которые никто не вошёл, не удаляются).
    pub max_rooms: Option<usize>,
    /// Максимальная длина имени игрока.
    pub name_max_len: usize,
    /// Seed для детерминированного перемешивания (реплей, отладка).
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            // Одна комната на процесс.
            max_rooms: Some(1),
            name_max_len: DEFAULT_NAME_MAX_LEN,
            seed: None,
        }
    }
}

impl ServerConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
