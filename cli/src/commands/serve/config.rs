//! # Pinsry Serve Configuration
//!
//! File: cli/src/commands/serve/config.rs
//!
//! ## Overview
//!
//! Produces the effective `ServeConfig` for `pinsry serve`. Values come from,
//! in order of precedence:
//! 1. Flags given on the command line
//! 2. The `[server]` and `[assistant]` sections of the loaded configuration
//! 3. The defaults of those sections
//!
//! The static directory, when one is set, is resolved to an absolute canonical
//! path and must be an existing directory.
//!
use crate::core::config::Config;
use crate::core::error::{Result, SupportError};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// # Serve Command Arguments (`ServeArgs`)
///
/// Each flag, when given, overrides the matching configuration value.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on. The next ports are tried if it is taken.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// IP address to bind to. Use `0.0.0.0` for all interfaces.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Directory with the widget's static files, served for non-API paths.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Maximum number of open sessions.
    #[arg(long)]
    pub max_sessions: Option<usize>,

    /// Fix the random source of every new session.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Close sessions idle for this many seconds. `0` keeps them open.
    #[arg(long)]
    pub session_idle_secs: Option<u64>,
}

/// # Effective Server Configuration (`ServeConfig`)
#[derive(Debug, Clone, PartialEq)]
pub struct ServeConfig {
    pub port: u16,
    pub host: IpAddr,
    pub static_dir: Option<PathBuf>,
    pub enable_cors: bool,
    pub max_sessions: usize,
    pub seed: Option<u64>,
    pub resolve_timeout: Option<Duration>,
    pub session_idle: Option<Duration>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: IpAddr::from([127, 0, 0, 1]),
            static_dir: None,
            enable_cors: true,
            max_sessions: 1024,
            seed: None,
            resolve_timeout: None,
            session_idle: Some(Duration::from_secs(1800)),
        }
    }
}

/// # Resolve Serve Configuration (`resolve_serve_config`)
///
/// ## Errors
///
/// Returns an error if the configured host is not an IP address, if the
/// session limit is zero, or if the static directory cannot be resolved to a
/// directory.
pub fn resolve_serve_config(args: &ServeArgs, config: &Config) -> Result<ServeConfig> {
    let server = &config.server;

    let host = match args.host {
        Some(host) => host,
        None => server.host.parse::<IpAddr>().map_err(|e| {
            anyhow!(SupportError::Config(format!(
                "Invalid server host '{}': {}",
                server.host, e
            )))
        })?,
    };

    let max_sessions = args.max_sessions.unwrap_or(server.max_sessions);
    if max_sessions == 0 {
        return Err(anyhow!(SupportError::Config(
            "The session limit must be greater than zero.".to_string()
        )));
    }

    let static_dir = match args
        .static_dir
        .clone()
        .or_else(|| server.static_dir.as_ref().map(PathBuf::from))
    {
        Some(dir) => Some(resolve_directory(&dir)?),
        None => None,
    };

    Ok(ServeConfig {
        port: args.port.unwrap_or(server.port),
        host,
        static_dir,
        // --no-cors wins; otherwise the configured value.
        enable_cors: !args.no_cors && server.enable_cors,
        max_sessions,
        seed: args.seed.or(config.assistant.seed),
        resolve_timeout: config.assistant.resolve_timeout(),
        session_idle: match args.session_idle_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => server.session_idle(),
        },
    })
}

/// Makes `dir` absolute and canonical, and checks that it is a directory.
fn resolve_directory(dir: &Path) -> Result<PathBuf> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to get current working directory")?
            .join(dir)
    };
    let canonical = absolute
        .canonicalize()
        .with_context(|| format!("Failed to resolve static directory '{}'", dir.display()))?;
    if !canonical.is_dir() {
        return Err(anyhow!(SupportError::Config(format!(
            "Static path '{}' is not a directory.",
            canonical.display()
        ))));
    }
    debug!("Resolved static directory: {}", canonical.display());
    Ok(canonical)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_come_from_config() {
        let config = Config::default();
        let serve = resolve_serve_config(&ServeArgs::default(), &config).unwrap();
        assert_eq!(serve, ServeConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.server.port = 7000;
        config.server.max_sessions = 5;
        config.assistant.seed = Some(1);

        let args = ServeArgs::parse_from([
            "serve",
            "--port",
            "9100",
            "--host",
            "0.0.0.0",
            "--no-cors",
            "--seed",
            "4",
        ]);
        let serve = resolve_serve_config(&args, &config).unwrap();

        assert_eq!(serve.port, 9100);
        assert_eq!(serve.host, IpAddr::from([0, 0, 0, 0]));
        assert!(!serve.enable_cors);
        assert_eq!(serve.max_sessions, 5);
        assert_eq!(serve.seed, Some(4));
    }

    #[test]
    fn test_session_idle_flag_overrides_config() {
        let mut config = Config::default();
        config.server.session_idle_secs = 60;
        let serve = resolve_serve_config(&ServeArgs::default(), &config).unwrap();
        assert_eq!(serve.session_idle, Some(Duration::from_secs(60)));

        let args = ServeArgs::parse_from(["serve", "--session-idle-secs", "0"]);
        let serve = resolve_serve_config(&args, &config).unwrap();
        assert_eq!(serve.session_idle, None);
    }

    #[test]
    fn test_config_can_disable_cors() {
        let mut config = Config::default();
        config.server.enable_cors = false;
        let serve = resolve_serve_config(&ServeArgs::default(), &config).unwrap();
        assert!(!serve.enable_cors);
    }

    #[test]
    fn test_zero_session_limit_is_rejected() {
        let args = ServeArgs {
            max_sessions: Some(0),
            ..Default::default()
        };
        assert!(resolve_serve_config(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_static_dir_is_canonicalized() {
        let temp_dir = TempDir::new().unwrap();
        let args = ServeArgs {
            static_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let serve = resolve_serve_config(&args, &Config::default()).unwrap();
        assert_eq!(
            serve.static_dir,
            Some(temp_dir.path().canonicalize().unwrap())
        );
    }

    #[test]
    fn test_static_dir_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("index.html");
        fs::write(&file, "<html></html>").unwrap();

        let args = ServeArgs {
            static_dir: Some(file),
            ..Default::default()
        };
        let err = resolve_serve_config(&args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_missing_static_dir_fails() {
        let args = ServeArgs {
            static_dir: Some(PathBuf::from("/definitely/not/here/pinsry")),
            ..Default::default()
        };
        assert!(resolve_serve_config(&args, &Config::default()).is_err());
    }
}
