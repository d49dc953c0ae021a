use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use serde::Serialize;
use stackcoach_core::config::{AppConfig, ConfigOverrides, DEFAULT_CONFIG_FILE};
use toml::Value;

use crate::commands::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigField {
    key: &'static str,
    value: String,
    source: String,
}

#[derive(Debug, Serialize)]
struct ConfigReport {
    precedence: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    fields: Vec<ConfigField>,
}

pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config = match load_config("config", config_path, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let file_path = detect_config_path(config_path);
    let file_doc = load_config_file_doc(file_path.as_deref());
    let attribution = Attribution { file_doc: file_doc.as_ref(), file_path: file_path.as_deref() };

    let fields = effective_values(&config)
        .into_iter()
        .map(|field| ConfigField {
            source: attribution.source(field.key, field.env_keys),
            key: field.key,
            value: field.value,
        })
        .collect();

    CommandResult::report(
        "config",
        &ConfigReport {
            precedence: "env > file > default",
            file: file_path.map(|path| path.display().to_string()),
            fields,
        },
    )
}

struct EffectiveValue {
    key: &'static str,
    env_keys: &'static [&'static str],
    value: String,
}

fn field(key: &'static str, env_keys: &'static [&'static str], value: String) -> EffectiveValue {
    EffectiveValue { key, env_keys, value }
}

fn effective_values(config: &AppConfig) -> Vec<EffectiveValue> {
    let unset = |value: &Option<String>| value.clone().unwrap_or_else(|| "<unset>".to_string());
    let advisor_api_key = config
        .advisor
        .api_key
        .as_ref()
        .map(|secret| redact_token(secret.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());

    vec![
        field(
            "catalog.source",
            &["STACKCOACH_CATALOG_SOURCE"],
            config.catalog.source.as_str().into(),
        ),
        field("catalog.url", &["STACKCOACH_CATALOG_URL"], unset(&config.catalog.url)),
        field(
            "catalog.timeout_secs",
            &["STACKCOACH_CATALOG_TIMEOUT_SECS"],
            config.catalog.timeout_secs.to_string(),
        ),
        field(
            "advisor.enabled",
            &["STACKCOACH_ADVISOR_ENABLED"],
            config.advisor.enabled.to_string(),
        ),
        field(
            "advisor.base_url",
            &["STACKCOACH_ADVISOR_BASE_URL"],
            unset(&config.advisor.base_url),
        ),
        field("advisor.api_key", &["STACKCOACH_ADVISOR_API_KEY"], advisor_api_key),
        field("advisor.model", &["STACKCOACH_ADVISOR_MODEL"], config.advisor.model.clone()),
        field(
            "advisor.timeout_secs",
            &["STACKCOACH_ADVISOR_TIMEOUT_SECS"],
            config.advisor.timeout_secs.to_string(),
        ),
        field(
            "advisor.max_retries",
            &["STACKCOACH_ADVISOR_MAX_RETRIES"],
            config.advisor.max_retries.to_string(),
        ),
        field(
            "logging.level",
            &["STACKCOACH_LOGGING_LEVEL", "STACKCOACH_LOG_LEVEL"],
            config.logging.level.clone(),
        ),
        field(
            "logging.format",
            &["STACKCOACH_LOGGING_FORMAT", "STACKCOACH_LOG_FORMAT"],
            config.logging.format.as_str().into(),
        ),
    ]
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

struct Attribution<'a> {
    file_doc: Option<&'a Value>,
    file_path: Option<&'a Path>,
}

impl Attribution<'_> {
    fn source(&self, key_path: &str, env_keys: &[&str]) -> String {
        let is_set = |key: &&&str| env::var(key).is_ok_and(|value| !value.trim().is_empty());
        if let Some(env_key) = env_keys.iter().find(is_set) {
            return format!("env ({env_key})");
        }

        if self.file_doc.is_some_and(|doc| contains_path(doc, key_path)) {
            let file_path = self
                .file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }

        "default".to_string()
    }
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

/// Keeps a recognisable key prefix (`sk-***`) and nothing else.
fn redact_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('-') {
        return format!("{prefix}-***");
    }

    "<redacted>".to_string()
}
