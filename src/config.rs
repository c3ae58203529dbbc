use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::Locale;
use crate::engine::quiz::DEFAULT_QUESTION_COUNT;

pub const MAX_QUESTION_COUNT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Custom catalog replacing the bundled glossary for every locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}
fn default_theme() -> String {
    "terminal-default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            question_count: default_question_count(),
            theme: default_theme(),
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_question_count();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glossquiz")
            .join("config.toml")
    }

    /// Clamp into `1..=MAX_QUESTION_COUNT`.
    pub fn normalize_question_count(&mut self) {
        self.question_count = self.question_count.clamp(1, MAX_QUESTION_COUNT);
    }

    /// Settings-screen stepping. Wraps around at both ends.
    pub fn step_question_count(&mut self, forward: bool) {
        const STEP: usize = 5;
        self.question_count = if forward {
            if self.question_count >= MAX_QUESTION_COUNT {
                STEP
            } else {
                (self.question_count / STEP + 1) * STEP
            }
        } else if self.question_count <= STEP {
            MAX_QUESTION_COUNT
        } else {
            (self.question_count - 1) / STEP * STEP
        };
        self.normalize_question_count();
    }
}
