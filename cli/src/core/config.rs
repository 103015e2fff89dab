//! # Pinsry Support Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the assistant's configuration. The
//! rule table itself is compiled into the binary; configuration only covers
//! how the assistant is presented and served.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by each command)
//! 2. Project-specific `.pinsry.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! `--config <PATH>` replaces steps 2 and 3 with a single explicit file.
//!
//! ## Examples
//!
//! ```toml
//! [assistant]
//! name = "Pinsry Assistant"
//! seed = 42
//! resolve_timeout_ms = 2000
//!
//! [chat]
//! typing_delay_ms = 400
//! color = true
//!
//! [server]
//! port = 8080
//! host = "0.0.0.0"
//! static_dir = "~/pinsry/site"
//! enable_cors = true
//! max_sessions = 500
//! session_idle_secs = 900
//! ```
//!
use crate::core::error::{Result, SupportError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerSection,
}

/// Behaviour of the assistant itself.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Name shown in front of assistant replies.
    #[serde(default = "default_assistant_name")]
    pub name: String,
    /// Fixed random seed for reproducible replies.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound on resolving one reply, in milliseconds.
    #[serde(default)]
    pub resolve_timeout_ms: Option<u64>,
}

/// Terminal chat presentation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Pause before each reply while "typing..." is shown.
    #[serde(default)]
    pub typing_delay_ms: u64,
    #[serde(default = "default_true")]
    pub color: bool,
}

/// Defaults for `pinsry serve`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// Directory with the widget's static files (can use ~). Will be expanded.
    #[serde(default)]
    pub static_dir: Option<String>,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Sessions untouched for this long are closed. `0` keeps them forever.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_assistant_name() -> String {
    "Pinsry Assistant".to_string()
}
fn default_true() -> bool {
    true
}
fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_max_sessions() -> usize {
    1024
}
fn default_session_idle_secs() -> u64 {
    1800
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            seed: None,
            resolve_timeout_ms: None,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: 0,
            color: true,
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            static_dir: None,
            enable_cors: true,
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl ServerSection {
    pub fn session_idle(&self) -> Option<Duration> {
        match self.session_idle_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl AssistantConfig {
    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout_ms.map(Duration::from_millis)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".pinsry.toml";

/// Loads the effective configuration.
///
/// With `explicit` set only that file is read; otherwise user and project
/// files are merged over the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Pinsry", "pinsry") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(path) = find_project_config_path(&current_dir) {
        info!("Loading project configuration from: {}", path.display());
        load_config_from_path(&path).map(Some)
    } else {
        debug!("No project configuration file (.pinsry.toml) found.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.pinsry.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();

    fn pick<T: PartialEq>(project: T, user: T, default: &T) -> T {
        if &project != default {
            project
        } else {
            user
        }
    }

    Config {
        assistant: AssistantConfig {
            name: pick(
                project.assistant.name,
                user.assistant.name,
                &defaults.assistant.name,
            ),
            seed: project.assistant.seed.or(user.assistant.seed),
            resolve_timeout_ms: project
                .assistant
                .resolve_timeout_ms
                .or(user.assistant.resolve_timeout_ms),
        },
        chat: ChatConfig {
            typing_delay_ms: pick(
                project.chat.typing_delay_ms,
                user.chat.typing_delay_ms,
                &defaults.chat.typing_delay_ms,
            ),
            color: pick(project.chat.color, user.chat.color, &defaults.chat.color),
        },
        server: ServerSection {
            port: pick(project.server.port, user.server.port, &defaults.server.port),
            host: pick(project.server.host, user.server.host, &defaults.server.host),
            static_dir: project.server.static_dir.or(user.server.static_dir),
            enable_cors: pick(
                project.server.enable_cors,
                user.server.enable_cors,
                &defaults.server.enable_cors,
            ),
            max_sessions: pick(
                project.server.max_sessions,
                user.server.max_sessions,
                &defaults.server.max_sessions,
            ),
            session_idle_secs: pick(
                project.server.session_idle_secs,
                user.server.session_idle_secs,
                &defaults.server.session_idle_secs,
            ),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = config.server.static_dir.as_mut() {
        let expanded = shellexpand::tilde(dir.as_str()).into_owned();
        *dir = expanded;
        debug!("Expanded static directory: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.server.host.parse::<IpAddr>().is_err() {
        return Err(anyhow!(SupportError::Config(format!(
            "Invalid server host '{}'. Expected an IP address.",
            config.server.host
        ))));
    }
    if config.server.max_sessions == 0 {
        return Err(anyhow!(SupportError::Config(
            "server.max_sessions must be greater than zero.".to_string()
        )));
    }
    if let Some(dir) = &config.server.static_dir {
        let path = PathBuf::from(dir);
        if !path.is_dir() {
            return Err(anyhow!(SupportError::Config(format!(
                "Configured static directory '{}' does not exist or is not a directory.",
                path.display()
            ))));
        }
    }
    if config.assistant.resolve_timeout_ms == Some(0) {
        return Err(anyhow!(SupportError::Config(
            "assistant.resolve_timeout_ms must be greater than zero.".to_string()
        )));
    }
    Ok(())
}
