use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::ArchiveFormat;

pub const DEFAULT_CONFIG_FILE: &str = "uploader.toml";
pub const NESTED_CONFIG_FILE: &str = "config/uploader.toml";

/// Longest lifetime S3 accepts for a SigV4 presigned URL.
pub const MAX_PRESIGN_EXPIRY_SECS: u64 = 60 * 60 * 24 * 7;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub slack: SlackConfig,
    pub storage: StorageConfig,
    pub shortener: ShortenerConfig,
    pub relay: RelayConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct SlackConfig {
    pub signing_secret: SecretString,
    pub bot_token: SecretString,
    pub user_token: SecretString,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub signature_tolerance_secs: u64,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: String,
    pub endpoint_url: Option<String>,
    pub path_style: bool,
    pub key_prefix: String,
    pub presign_expiry_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ShortenerConfig {
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub accepted_extensions: Vec<String>,
    pub cleanup: CleanupPolicy,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub events_path: String,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    S3,
    Memory,
}

/// When the origin copy of a relayed file is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPolicy {
    /// Delete right after a successful download, before the name is validated.
    AfterDownload,
    /// Delete only once the object is stored and a link was signed.
    AfterUpload,
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
    pub slack_signing_secret: Option<String>,
    pub slack_bot_token: Option<String>,
    pub slack_user_token: Option<String>,
    pub slack_api_base_url: Option<String>,
    pub storage_backend: Option<StorageBackend>,
    pub storage_bucket: Option<String>,
    pub shortener_endpoint: Option<String>,
    pub shortener_api_key: Option<String>,
    pub relay_cleanup: Option<CleanupPolicy>,
    pub server_port: Option<u16>,
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
            slack: SlackConfig {
                signing_secret: String::new().into(),
                bot_token: String::new().into(),
                user_token: String::new().into(),
                api_base_url: "https://slack.com/api".to_string(),
                request_timeout_secs: 30,
                signature_tolerance_secs: 300,
            },
            storage: StorageConfig {
                backend: StorageBackend::S3,
                bucket: String::new(),
                region: "ap-northeast-1".to_string(),
                endpoint_url: None,
                path_style: true,
                key_prefix: String::new(),
                presign_expiry_secs: MAX_PRESIGN_EXPIRY_SECS,
            },
            shortener: ShortenerConfig { endpoint: String::new(), api_key: None, timeout_secs: 10 },
            relay: RelayConfig {
                accepted_extensions: vec!["zip".to_string()],
                cleanup: CleanupPolicy::AfterDownload,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                events_path: "/slack/events".to_string(),
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::Memory => "memory",
        }
    }
}

impl CleanupPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AfterDownload => "after_download",
            Self::AfterUpload => "after_upload",
        }
    }
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Self::S3),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Validation(format!(
                "unsupported storage backend `{other}` (expected s3|memory)"
            ))),
        }
    }
}

impl std::str::FromStr for CleanupPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "after_download" => Ok(Self::AfterDownload),
            "after_upload" => Ok(Self::AfterUpload),
            other => Err(ConfigError::Validation(format!(
                "unsupported cleanup policy `{other}` (expected after_download|after_upload)"
            ))),
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

    /// Archive formats the relay accepts, resolved from `relay.accepted_extensions`.
    pub fn accepted_formats(&self) -> Vec<ArchiveFormat> {
        self.relay
            .accepted_extensions
            .iter()
            .filter_map(|extension| ArchiveFormat::from_extension(extension))
            .collect()
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(slack) = patch.slack {
            if let Some(signing_secret_value) = slack.signing_secret {
                self.slack.signing_secret = secret_value(signing_secret_value);
            }
            if let Some(bot_token_value) = slack.bot_token {
                self.slack.bot_token = secret_value(bot_token_value);
            }
            if let Some(user_token_value) = slack.user_token {
                self.slack.user_token = secret_value(user_token_value);
            }
            if let Some(api_base_url) = slack.api_base_url {
                self.slack.api_base_url = api_base_url;
            }
            if let Some(request_timeout_secs) = slack.request_timeout_secs {
                self.slack.request_timeout_secs = request_timeout_secs;
            }
            if let Some(signature_tolerance_secs) = slack.signature_tolerance_secs {
                self.slack.signature_tolerance_secs = signature_tolerance_secs;
            }
        }

        if let Some(storage) = patch.storage {
            if let Some(backend) = storage.backend {
                self.storage.backend = backend;
            }
            if let Some(bucket) = storage.bucket {
                self.storage.bucket = bucket;
            }
            if let Some(region) = storage.region {
                self.storage.region = region;
            }
            if let Some(endpoint_url) = storage.endpoint_url {
                self.storage.endpoint_url = Some(endpoint_url);
            }
            if let Some(path_style) = storage.path_style {
                self.storage.path_style = path_style;
            }
            if let Some(key_prefix) = storage.key_prefix {
                self.storage.key_prefix = key_prefix;
            }
            if let Some(presign_expiry_secs) = storage.presign_expiry_secs {
                self.storage.presign_expiry_secs = presign_expiry_secs;
            }
        }

        if let Some(shortener) = patch.shortener {
            if let Some(endpoint) = shortener.endpoint {
                self.shortener.endpoint = endpoint;
            }
            if let Some(api_key_value) = shortener.api_key {
                self.shortener.api_key = Some(secret_value(api_key_value));
            }
            if let Some(timeout_secs) = shortener.timeout_secs {
                self.shortener.timeout_secs = timeout_secs;
            }
        }

        if let Some(relay) = patch.relay {
            if let Some(accepted_extensions) = relay.accepted_extensions {
                self.relay.accepted_extensions = accepted_extensions;
            }
            if let Some(cleanup) = relay.cleanup {
                self.relay.cleanup = cleanup;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(events_path) = server.events_path {
                self.server.events_path = events_path;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
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
        if let Some(value) = read_env("UPLOADER_SLACK_SIGNING_SECRET") {
            self.slack.signing_secret = secret_value(value);
        }
        if let Some(value) = read_env("UPLOADER_SLACK_BOT_TOKEN") {
            self.slack.bot_token = secret_value(value);
        }
        if let Some(value) = read_env("UPLOADER_SLACK_USER_TOKEN") {
            self.slack.user_token = secret_value(value);
        }
        if let Some(value) = read_env("UPLOADER_SLACK_API_BASE_URL") {
            self.slack.api_base_url = value;
        }
        if let Some(value) = read_env("UPLOADER_SLACK_REQUEST_TIMEOUT_SECS") {
            self.slack.request_timeout_secs =
                parse_u64("UPLOADER_SLACK_REQUEST_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("UPLOADER_SLACK_SIGNATURE_TOLERANCE_SECS") {
            self.slack.signature_tolerance_secs =
                parse_u64("UPLOADER_SLACK_SIGNATURE_TOLERANCE_SECS", &value)?;
        }

        if let Some(value) = read_env("UPLOADER_STORAGE_BACKEND") {
            self.storage.backend = value.parse()?;
        }
        if let Some(value) = read_env("UPLOADER_STORAGE_BUCKET") {
            self.storage.bucket = value;
        }
        if let Some(value) = read_env("UPLOADER_STORAGE_REGION") {
            self.storage.region = value;
        }
        if let Some(value) = read_env("UPLOADER_STORAGE_ENDPOINT_URL") {
            self.storage.endpoint_url = Some(value);
        }
        if let Some(value) = read_env("UPLOADER_STORAGE_PATH_STYLE") {
            self.storage.path_style = parse_bool("UPLOADER_STORAGE_PATH_STYLE", &value)?;
        }
        if let Some(value) = read_env("UPLOADER_STORAGE_KEY_PREFIX") {
            self.storage.key_prefix = value;
        }
        if let Some(value) = read_env("UPLOADER_STORAGE_PRESIGN_EXPIRY_SECS") {
            self.storage.presign_expiry_secs =
                parse_u64("UPLOADER_STORAGE_PRESIGN_EXPIRY_SECS", &value)?;
        }

        if let Some(value) = read_env("UPLOADER_SHORTENER_ENDPOINT") {
            self.shortener.endpoint = value;
        }
        if let Some(value) = read_env("UPLOADER_SHORTENER_API_KEY") {
            self.shortener.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("UPLOADER_SHORTENER_TIMEOUT_SECS") {
            self.shortener.timeout_secs = parse_u64("UPLOADER_SHORTENER_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("UPLOADER_RELAY_ACCEPTED_EXTENSIONS") {
            self.relay.accepted_extensions = value
                .split(',')
                .map(|extension| extension.trim().to_string())
                .filter(|extension| !extension.is_empty())
                .collect();
        }
        if let Some(value) = read_env("UPLOADER_RELAY_CLEANUP") {
            self.relay.cleanup = value.parse()?;
        }

        if let Some(value) = read_env("UPLOADER_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("UPLOADER_SERVER_PORT") {
            self.server.port = parse_u16("UPLOADER_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("UPLOADER_SERVER_EVENTS_PATH") {
            self.server.events_path = value;
        }
        if let Some(value) = read_env("UPLOADER_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("UPLOADER_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("UPLOADER_LOGGING_LEVEL").or_else(|| read_env("UPLOADER_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("UPLOADER_LOGGING_FORMAT").or_else(|| read_env("UPLOADER_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(signing_secret) = overrides.slack_signing_secret {
            self.slack.signing_secret = secret_value(signing_secret);
        }
        if let Some(bot_token) = overrides.slack_bot_token {
            self.slack.bot_token = secret_value(bot_token);
        }
        if let Some(user_token) = overrides.slack_user_token {
            self.slack.user_token = secret_value(user_token);
        }
        if let Some(api_base_url) = overrides.slack_api_base_url {
            self.slack.api_base_url = api_base_url;
        }
        if let Some(backend) = overrides.storage_backend {
            self.storage.backend = backend;
        }
        if let Some(bucket) = overrides.storage_bucket {
            self.storage.bucket = bucket;
        }
        if let Some(endpoint) = overrides.shortener_endpoint {
            self.shortener.endpoint = endpoint;
        }
        if let Some(api_key) = overrides.shortener_api_key {
            self.shortener.api_key = Some(secret_value(api_key));
        }
        if let Some(cleanup) = overrides.relay_cleanup {
            self.relay.cleanup = cleanup;
        }
        if let Some(port) = overrides.server_port {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_slack(&self.slack)?;
        validate_storage(&self.storage)?;
        validate_shortener(&self.shortener)?;
        validate_relay(&self.relay)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
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

fn validate_slack(slack: &SlackConfig) -> Result<(), ConfigError> {
    if slack.signing_secret.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "slack.signing_secret is required. Get it from https://api.slack.com/apps > Your App > Basic Information > Signing Secret".to_string()
        ));
    }

    let bot_token = slack.bot_token.expose_secret();
    if bot_token.is_empty() {
        return Err(ConfigError::Validation(
            "slack.bot_token is required. Get it from https://api.slack.com/apps > Your App > OAuth & Permissions > Bot User OAuth Token".to_string()
        ));
    }
    if !bot_token.starts_with("xoxb-") {
        let hint = if bot_token.starts_with("xoxp-") {
            " (hint: you may have used the user token instead of the bot token)"
        } else {
            ""
        };
        return Err(ConfigError::Validation(format!(
            "slack.bot_token must start with `xoxb-`{hint}. Get it from https://api.slack.com/apps"
        )));
    }

    let user_token = slack.user_token.expose_secret();
    if user_token.is_empty() {
        return Err(ConfigError::Validation(
            "slack.user_token is required to delete relayed files. Get it from https://api.slack.com/apps > Your App > OAuth & Permissions > User OAuth Token".to_string()
        ));
    }
    if !user_token.starts_with("xoxp-") {
        let hint = if user_token.starts_with("xoxb-") {
            " (hint: you may have used the bot token instead of the user token)"
        } else {
            ""
        };
        return Err(ConfigError::Validation(format!(
            "slack.user_token must start with `xoxp-`{hint}. Get it from https://api.slack.com/apps"
        )));
    }

    if !is_http_url(&slack.api_base_url) {
        return Err(ConfigError::Validation(
            "slack.api_base_url must start with http:// or https://".to_string(),
        ));
    }

    if slack.request_timeout_secs == 0 || slack.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "slack.request_timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if slack.signature_tolerance_secs == 0 || slack.signature_tolerance_secs > 3600 {
        return Err(ConfigError::Validation(
            "slack.signature_tolerance_secs must be in range 1..=3600".to_string(),
        ));
    }

    Ok(())
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    if storage.backend == StorageBackend::S3 {
        if storage.bucket.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.bucket is required for the s3 backend".to_string(),
            ));
        }
        if storage.region.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.region is required for the s3 backend".to_string(),
            ));
        }
    }

    if let Some(endpoint_url) = &storage.endpoint_url {
        if !is_http_url(endpoint_url) {
            return Err(ConfigError::Validation(
                "storage.endpoint_url must start with http:// or https://".to_string(),
            ));
        }
    }

    if storage.presign_expiry_secs == 0 || storage.presign_expiry_secs > MAX_PRESIGN_EXPIRY_SECS {
        return Err(ConfigError::Validation(format!(
            "storage.presign_expiry_secs must be in range 1..={MAX_PRESIGN_EXPIRY_SECS}"
        )));
    }

    Ok(())
}

fn validate_shortener(shortener: &ShortenerConfig) -> Result<(), ConfigError> {
    if shortener.endpoint.trim().is_empty() {
        return Err(ConfigError::Validation("shortener.endpoint is required".to_string()));
    }
    if !is_http_url(&shortener.endpoint) {
        return Err(ConfigError::Validation(
            "shortener.endpoint must start with http:// or https://".to_string(),
        ));
    }
    if shortener.timeout_secs == 0 || shortener.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "shortener.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_relay(relay: &RelayConfig) -> Result<(), ConfigError> {
    if relay.accepted_extensions.is_empty() {
        return Err(ConfigError::Validation(
            "relay.accepted_extensions must list at least one archive extension".to_string(),
        ));
    }

    for extension in &relay.accepted_extensions {
        if ArchiveFormat::from_extension(extension).is_none() {
            return Err(ConfigError::Validation(format!(
                "relay.accepted_extensions contains unsupported extension `{extension}` (expected zip|7z|tar|gz)"
            )));
        }
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if !server.events_path.starts_with('/') {
        return Err(ConfigError::Validation(
            "server.events_path must start with `/`".to_string(),
        ));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
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

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
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
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    slack: Option<SlackPatch>,
    storage: Option<StoragePatch>,
    shortener: Option<ShortenerPatch>,
    relay: Option<RelayPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct SlackPatch {
    signing_secret: Option<String>,
    bot_token: Option<String>,
    user_token: Option<String>,
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    signature_tolerance_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    backend: Option<StorageBackend>,
    bucket: Option<String>,
    region: Option<String>,
    endpoint_url: Option<String>,
    path_style: Option<bool>,
    key_prefix: Option<String>,
    presign_expiry_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ShortenerPatch {
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RelayPatch {
    accepted_extensions: Option<Vec<String>>,
    cleanup: Option<CleanupPolicy>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    events_path: Option<String>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
