pub mod catalog;
pub mod config;
pub mod picks;
pub mod resolve;
pub mod score;
pub mod stack;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use stackcoach_agent::{CatalogCache, CatalogSnapshot};
use stackcoach_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use stackcoach_core::{ApplicationError, QuizAnswers, UserProfile};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct CommandReport<'a, T: Serialize> {
    command: &'a str,
    status: &'a str,
    #[serde(flatten)]
    data: &'a T,
}

impl CommandResult {
    /// Successful result whose fields are merged next to `command` and `status`.
    pub fn report<T: Serialize>(command: &str, data: &T) -> Self {
        let payload = CommandReport { command, status: "ok", data };
        Self { exit_code: 0, output: serialize_payload(&payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: error_class.to_string(),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }
}

fn serialize_payload<T: Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config(
    command: &str,
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AppConfig, CommandResult> {
    let options = LoadOptions {
        config_path: config_path.map(Path::to_path_buf),
        require_file: config_path.is_some(),
        overrides,
    };

    AppConfig::load(options).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })
}

pub(crate) fn load_profile(
    command: &str,
    answers_path: &Path,
) -> Result<UserProfile, CommandResult> {
    let raw = fs::read_to_string(answers_path).map_err(|error| {
        CommandResult::failure(
            command,
            "input",
            format!("could not read answers file `{}`: {error}", answers_path.display()),
            2,
        )
    })?;

    let answers = serde_json::from_str::<QuizAnswers>(&raw).map_err(|error| {
        CommandResult::failure(
            command,
            "input",
            format!("answers file `{}` is not valid JSON: {error}", answers_path.display()),
            2,
        )
    })?;

    UserProfile::try_from(answers).map_err(|error| {
        let error = ApplicationError::from(error);
        CommandResult::failure(command, error.error_class(), error.to_string(), 2)
    })
}

pub(crate) fn read_json_file(
    command: &str,
    path: &Path,
) -> Result<serde_json::Value, CommandResult> {
    let raw = fs::read_to_string(path).map_err(|error| {
        CommandResult::failure(
            command,
            "input",
            format!("could not read `{}`: {error}", path.display()),
            2,
        )
    })?;

    serde_json::from_str(&raw).map_err(|error| {
        CommandResult::failure(
            command,
            "input",
            format!("`{}` is not valid JSON: {error}", path.display()),
            2,
        )
    })
}

pub(crate) fn runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        )
    })
}

/// Loads the session catalog the configuration points at.
pub(crate) fn catalog_snapshot(
    command: &str,
    config: &AppConfig,
    runtime: &tokio::runtime::Runtime,
) -> Result<Arc<CatalogSnapshot>, CommandResult> {
    let cache = CatalogCache::from_config(&config.catalog).map_err(|error| {
        CommandResult::failure(command, "config_validation", error.to_string(), 2)
    })?;
    Ok(runtime.block_on(cache.get()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogOrigin {
    origin: stackcoach_agent::SnapshotOrigin,
    products: usize,
    fetched_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
}

impl From<&CatalogSnapshot> for CatalogOrigin {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        Self {
            origin: snapshot.origin,
            products: snapshot.catalog.list_active().count(),
            fetched_at: snapshot.fetched_at.to_rfc3339(),
            fallback_reason: snapshot.fallback_reason.clone(),
        }
    }
}
