use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{PublishError, Result};
use crate::resolver::TagOptions;

const CONFIG_FILE_NAME: &str = "dockerpublish.toml";

/// Represents the optional configuration file for docker-publish.
///
/// Every value here can be overridden by the matching `INPUT_*` environment
/// variable. Credentials are never read from the file.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub tagging: TaggingConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Image identity and build settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ImageConfig {
    pub username: Option<String>,
    pub name: Option<String>,
    pub dockerfile: Option<String>,
    pub registry: Option<String>,
    pub context: Option<String>,
}

/// Reference-to-tag translation switches.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct TaggingConfig {
    #[serde(default)]
    pub semver: bool,

    #[serde(default)]
    pub names: bool,
}

fn default_container_cli() -> String {
    "docker".to_string()
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default = "default_container_cli")]
    pub container_cli: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            container_cli: default_container_cli(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `dockerpublish.toml` in current directory
/// 3. `.dockerpublish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if !path.exists() {
            return Ok(Config::default());
        }
        path
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        PublishError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| PublishError::config(format!("Invalid {}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}

/// Source of named action inputs
pub trait InputSource {
    /// Raw value of the input, `None` when unset
    fn raw(&self, name: &str) -> Option<String>;

    /// Trimmed value of the input; empty values count as unset
    fn input(&self, name: &str) -> Option<String> {
        self.raw(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Inputs passed as `INPUT_<NAME>` environment variables
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvInputs;

impl EnvInputs {
    /// Environment variable holding the input `name`
    pub fn variable(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for EnvInputs {
    fn raw(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable(name)).ok()
    }
}

impl InputSource for HashMap<String, String> {
    fn raw(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Whether an option value switches its feature on: non-empty and not `false`
pub fn is_enabled(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "false"
}

/// Value that must never be printed
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

/// Validated inputs for one release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseInputs {
    pub username: String,
    pub repository: String,
    pub password: Option<Secret>,
    pub dockerfile: Option<String>,
    pub registry: Option<String>,
    pub context: String,
    pub tag_options: TagOptions,
    pub container_cli: String,
}

impl ReleaseInputs {
    /// Merge the file configuration with action inputs, inputs taking precedence
    ///
    /// # Returns
    /// * `Err(MissingInput)` - if `USERNAME` or `NAME` is set nowhere
    pub fn gather(config: &Config, inputs: &impl InputSource) -> Result<Self> {
        let username = inputs
            .input("USERNAME")
            .or_else(|| non_empty(&config.image.username))
            .ok_or_else(|| PublishError::missing_input("USERNAME"))?;
        let repository = inputs
            .input("NAME")
            .or_else(|| non_empty(&config.image.name))
            .ok_or_else(|| PublishError::missing_input("NAME"))?;

        let dockerfile = inputs
            .input("DOCKERFILE")
            .or_else(|| non_empty(&config.image.dockerfile))
            .filter(|value| is_enabled(value));

        let tag_options = TagOptions {
            semver: flag(inputs, "TAG_SEMVER", config.tagging.semver),
            names: flag(inputs, "TAG_NAMES", config.tagging.names),
        };

        Ok(ReleaseInputs {
            username,
            repository,
            password: inputs.input("PASSWORD").map(Secret::new),
            dockerfile,
            registry: inputs
                .input("REGISTRY")
                .or_else(|| non_empty(&config.image.registry)),
            context: inputs
                .input("CONTEXT")
                .or_else(|| non_empty(&config.image.context))
                .unwrap_or_else(|| ".".to_string()),
            tag_options,
            container_cli: config.behavior.container_cli.clone(),
        })
    }
}

fn flag(inputs: &impl InputSource, name: &str, default: bool) -> bool {
    match inputs.input(name) {
        Some(value) => is_enabled(&value),
        None => default,
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
