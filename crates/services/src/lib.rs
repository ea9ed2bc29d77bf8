#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod history_service;
pub mod notify;
pub mod runner;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use config::QuizConfig;
pub use error::{AppServicesError, ConfigError, HistoryError, RunnerError};
pub use history_service::HistoryService;
pub use notify::{ChannelNotifier, Notice, Notifier, TracingNotifier};
pub use runner::QuizRunner;
