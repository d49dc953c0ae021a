use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "stackcoach.toml";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub advisor: AdvisorConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub source: CatalogSourceKind,
    pub url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    pub enabled: bool,
    pub base_url: Option<String>,
    pub api_key: Option<SecretString>,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl AdvisorConfig {
    /// Base URL and API key when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &SecretString)> {
        let base_url = self.base_url.as_deref().map(str::trim).filter(|url| !url.is_empty())?;
        let api_key =
            self.api_key.as_ref().filter(|key| !key.expose_secret().trim().is_empty())?; // ubs:ignore
        Some((base_url, api_key))
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSourceKind {
    Builtin,
    Remote,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub catalog_source: Option<CatalogSourceKind>,
    pub catalog_url: Option<String>,
    pub advisor_enabled: Option<bool>,
    pub advisor_model: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                source: CatalogSourceKind::Builtin,
                url: None,
                timeout_secs: 10,
            },
            advisor: AdvisorConfig {
                enabled: false,
                base_url: None,
                api_key: None,
                model: "gpt-4o-mini".to_string(),
                timeout_secs: 30,
                max_retries: 2,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for CatalogSourceKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "remote" => Ok(Self::Remote),
            other => Err(ConfigError::Validation(format!(
                "unsupported catalog source `{other}` (expected builtin|remote)"
            ))),
        }
    }
}

impl CatalogSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Remote => "remote",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(source) = catalog.source {
                self.catalog.source = source;
            }
            if let Some(url) = catalog.url {
                self.catalog.url = Some(url);
            }
            if let Some(timeout_secs) = catalog.timeout_secs {
                self.catalog.timeout_secs = timeout_secs;
            }
        }

        if let Some(advisor) = patch.advisor {
            if let Some(enabled) = advisor.enabled {
                self.advisor.enabled = enabled;
            }
            if let Some(base_url) = advisor.base_url {
                self.advisor.base_url = Some(base_url);
            }
            if let Some(advisor_api_key_value) = advisor.api_key {
                self.advisor.api_key = Some(secret_value(advisor_api_key_value)); // ubs:ignore
            }
            if let Some(model) = advisor.model {
                self.advisor.model = model;
            }
            if let Some(timeout_secs) = advisor.timeout_secs {
                self.advisor.timeout_secs = timeout_secs;
            }
            if let Some(max_retries) = advisor.max_retries {
                self.advisor.max_retries = max_retries;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STACKCOACH_CATALOG_SOURCE") {
            self.catalog.source = value.parse()?;
        }
        if let Some(value) = read_env("STACKCOACH_CATALOG_URL") {
            self.catalog.url = Some(value);
        }
        if let Some(value) = read_env("STACKCOACH_CATALOG_TIMEOUT_SECS") {
            self.catalog.timeout_secs = parse_u64("STACKCOACH_CATALOG_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("STACKCOACH_ADVISOR_ENABLED") {
            self.advisor.enabled = parse_bool("STACKCOACH_ADVISOR_ENABLED", &value)?;
        }
        if let Some(value) = read_env("STACKCOACH_ADVISOR_BASE_URL") {
            self.advisor.base_url = Some(value);
        }
        if let Some(value) = read_env("STACKCOACH_ADVISOR_API_KEY") {
            self.advisor.api_key = Some(secret_value(value)); // ubs:ignore
        }
        if let Some(value) = read_env("STACKCOACH_ADVISOR_MODEL") {
            self.advisor.model = value;
        }
        if let Some(value) = read_env("STACKCOACH_ADVISOR_TIMEOUT_SECS") {
            self.advisor.timeout_secs = parse_u64("STACKCOACH_ADVISOR_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("STACKCOACH_ADVISOR_MAX_RETRIES") {
            self.advisor.max_retries = parse_u32("STACKCOACH_ADVISOR_MAX_RETRIES", &value)?;
        }

        let log_level =
            read_env("STACKCOACH_LOGGING_LEVEL").or_else(|| read_env("STACKCOACH_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("STACKCOACH_LOGGING_FORMAT").or_else(|| read_env("STACKCOACH_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(catalog_source) = overrides.catalog_source {
            self.catalog.source = catalog_source;
        }
        if let Some(catalog_url) = overrides.catalog_url {
            self.catalog.url = Some(catalog_url);
        }
        if let Some(enabled) = overrides.advisor_enabled {
            self.advisor.enabled = enabled;
        }
        if let Some(model) = overrides.advisor_model {
            self.advisor.model = model;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_advisor(&self.advisor)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.timeout_secs == 0 || catalog.timeout_secs > 120 {
        return Err(ConfigError::Validation(
            "catalog.timeout_secs must be in range 1..=120".to_string(),
        ));
    }

    let url = catalog.url.as_deref().map(str::trim).filter(|url| !url.is_empty());
    match (catalog.source, url) {
        (CatalogSourceKind::Remote, None) => Err(ConfigError::Validation(
            "catalog.url is required when catalog.source is `remote`".to_string(),
        )),
        (_, Some(url)) if !is_http_url(url) => Err(ConfigError::Validation(
            "catalog.url must start with http:// or https://".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_advisor(advisor: &AdvisorConfig) -> Result<(), ConfigError> {
    if advisor.timeout_secs == 0 || advisor.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "advisor.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if advisor.model.trim().is_empty() {
        return Err(ConfigError::Validation("advisor.model must not be empty".to_string()));
    }

    // Missing credentials are allowed here; the runtime falls back instead.
    if let Some(base_url) = advisor.base_url.as_deref().map(str::trim) {
        if !base_url.is_empty() && !is_http_url(base_url) {
            return Err(ConfigError::Validation(
                "advisor.base_url must start with http:// or https://".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().to_ascii_lowercase().parse::<bool>().map_err(|_| {
        ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    advisor: Option<AdvisorPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    source: Option<CatalogSourceKind>,
    url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct AdvisorPatch {
    enabled: Option<bool>,
    base_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
// ubs:ignore
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{
        AppConfig, CatalogSourceKind, ConfigError, ConfigOverrides, LoadOptions, LogFormat,
    };

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_ADVISOR_KEY", "sk-from-env");
        env::set_var("TEST_STOREFRONT_URL", "https://shop.example.com/products.json");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("stackcoach.toml");
            fs::write(
                &path,
                r#"
[catalog]
source = "remote"
url = "${TEST_STOREFRONT_URL}"

[advisor]
enabled = true
base_url = "https://advisor.example.com"
api_key = "${TEST_ADVISOR_KEY}" # ubs:ignore
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.url.as_deref() == Some("https://shop.example.com/products.json"),
                "catalog url should be interpolated from environment",
            )?;
            ensure(
                config
                    .advisor
                    .credentials()
                    .map(|(_, key)| key.expose_secret() == "sk-from-env")
                    .unwrap_or(false),
                "advisor key should be interpolated from environment",
            )?;
            Ok(())
        })();

        clear_vars(&["TEST_ADVISOR_KEY", "TEST_STOREFRONT_URL"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("stackcoach.toml");
        fs::write(&path, "[advisor]\napi_key = \"${STACKCOACH_TEST_UNSET_VAR}\"\n")
            .map_err(|err| err.to_string())?;

        let error =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .err()
                .ok_or_else(|| "expected interpolation failure".to_string())?;

        ensure(
            matches!(error, ConfigError::MissingEnvInterpolation { ref var } if var == "STACKCOACH_TEST_UNSET_VAR"),
            "missing variable should be named in the error",
        )
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STACKCOACH_LOG_LEVEL", "warn");
        env::set_var("STACKCOACH_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["STACKCOACH_LOG_LEVEL", "STACKCOACH_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STACKCOACH_ADVISOR_MODEL", "model-from-env");
        env::set_var("STACKCOACH_CATALOG_TIMEOUT_SECS", "20");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("stackcoach.toml");
            fs::write(
                &path,
                r#"
[catalog]
timeout_secs = 5
url = "https://from-file.example.com/products"

[advisor]
model = "model-from-file"
max_retries = 4

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    catalog_url: Some("https://from-override.example.com/products".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.url.as_deref() == Some("https://from-override.example.com/products"),
                "override catalog url should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.advisor.model == "model-from-env", "env model should win over file")?;
            ensure(config.catalog.timeout_secs == 20, "env timeout should win over file")?;
            ensure(config.advisor.max_retries == 4, "file value should win over defaults")?;
            ensure(
                config.catalog.source == CatalogSourceKind::Builtin,
                "default catalog source should be builtin",
            )?;
            Ok(())
        })();

        clear_vars(&["STACKCOACH_ADVISOR_MODEL", "STACKCOACH_CATALOG_TIMEOUT_SECS"]);
        result
    }

    #[test]
    fn remote_catalog_without_url_fails_validation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STACKCOACH_CATALOG_SOURCE", "remote");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("catalog.url")
            );
            ensure(has_message, "validation failure should mention catalog.url")
        })();

        clear_vars(&["STACKCOACH_CATALOG_SOURCE"]);
        result
    }

    #[test]
    fn invalid_numeric_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STACKCOACH_ADVISOR_TIMEOUT_SECS", "soon");

        let result = (|| -> Result<(), String> {
            let error = AppConfig::load(LoadOptions::default())
                .err()
                .ok_or_else(|| "expected override failure".to_string())?;
            ensure(
                matches!(error, ConfigError::InvalidEnvOverride { ref key, .. } if key == "STACKCOACH_ADVISOR_TIMEOUT_SECS"),
                "invalid override should name the variable",
            )
        })();

        clear_vars(&["STACKCOACH_ADVISOR_TIMEOUT_SECS"]);
        result
    }

    #[test]
    fn missing_advisor_credentials_are_not_a_validation_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STACKCOACH_ADVISOR_ENABLED", "TRUE");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.advisor.enabled, "advisor should be enabled from env var")?;
            ensure(config.advisor.credentials().is_none(), "no credentials are configured")
        })();

        clear_vars(&["STACKCOACH_ADVISOR_ENABLED"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STACKCOACH_ADVISOR_API_KEY", "sk-secret-value");
        env::set_var("STACKCOACH_ADVISOR_BASE_URL", "https://advisor.example.com");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("sk-secret-value"), "debug output should not contain api key")?;
            ensure(config.advisor.credentials().is_some(), "credentials should be complete")?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )?;
            Ok(())
        })();

        clear_vars(&["STACKCOACH_ADVISOR_API_KEY", "STACKCOACH_ADVISOR_BASE_URL"]);
        result
    }
}
