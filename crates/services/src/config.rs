use std::path::{Path, PathBuf};
use std::time::Duration;

use quiz_core::SessionConfig;
use quiz_core::model::QuestionBank;
use quiz_core::session::DEFAULT_SECONDS_PER_QUESTION;

use crate::error::ConfigError;

pub const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
pub const ENV_DB_URL: &str = "QUIZ_DB_URL";
pub const ENV_SECONDS: &str = "QUIZ_SECONDS_PER_QUESTION";
pub const ENV_QUESTIONS: &str = "QUIZ_QUESTIONS";

/// Runtime settings for a quiz app.
///
/// Resolution order: defaults, then environment, then whatever the binary
/// applies from its command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub seconds_per_question: u32,
    pub tick_interval: Duration,
    pub db_url: String,
    pub questions_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
            tick_interval: Duration::from_secs(1),
            db_url: DEFAULT_DB_URL.to_string(),
            questions_path: None,
        }
    }
}

impl QuizConfig {
    /// Defaults overridden by `QUIZ_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`QuizConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_DB_URL) {
            config.set_db_url(url)?;
        }
        if let Some(raw) = lookup(ENV_SECONDS) {
            config.set_seconds(&raw)?;
        }
        if let Some(path) = lookup(ENV_QUESTIONS).filter(|p| !p.trim().is_empty()) {
            config.questions_path = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::EmptyDbUrl` for a blank url.
    pub fn set_db_url(&mut self, url: impl Into<String>) -> Result<(), ConfigError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ConfigError::EmptyDbUrl);
        }
        self.db_url = url.trim().to_string();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSeconds` unless `raw` is a positive integer.
    pub fn set_seconds(&mut self, raw: &str) -> Result<(), ConfigError> {
        let seconds = raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| ConfigError::InvalidSeconds {
                raw: raw.to_string(),
            })?;
        self.seconds_per_question = seconds;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Session` if the seconds value is zero.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig::new(self.seconds_per_question)?)
    }

    /// The configured question file, or the built-in bank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Bank` if its contents are not a valid bank.
    pub fn load_bank(&self) -> Result<QuestionBank, ConfigError> {
        match &self.questions_path {
            Some(path) => load_bank_file(path),
            None => Ok(QuestionBank::reference()),
        }
    }
}

fn load_bank_file(path: &Path) -> Result<QuestionBank, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bank = QuestionBank::from_json_str(&raw)?;
    tracing::info!(path = %path.display(), questions = bank.len(), "loaded question bank");
    Ok(bank)
}
