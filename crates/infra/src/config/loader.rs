//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Use the explicit file when one is given, otherwise probe standard paths
//! 2. Fall back to built-in defaults when no file is found
//! 3. Apply `EWIKI_*` environment overrides on top
//!
//! JSON and TOML are supported, detected by file extension.
//!
//! ## Environment Variables
//! - `EWIKI_API_ORIGIN`: origin the API base path resolves against
//! - `EWIKI_API_BASE_PATH`: API base path (default `/api`)
//! - `EWIKI_API_USER_AGENT`: user agent sent with API requests
//! - `EWIKI_API_TIMEOUT_SECS`: request timeout in seconds
//! - `EWIKI_DEV_HOST` / `EWIKI_DEV_PORT`: dev server bind address
//! - `EWIKI_PROXY_PREFIX`: path prefix forwarded to the backend
//! - `EWIKI_PROXY_TARGET`: backend URL for proxied requests
//! - `EWIKI_PROXY_CHANGE_ORIGIN`: rewrite `Host` to the target (true/false)
//! - `EWIKI_STATIC_DIR`: built frontend directory
//! - `EWIKI_DEFAULT_LANGUAGE`: language tag for import/upload
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` then `./ewiki.{json,toml}`
//! 2. The same names one and two directories up
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use ewiki_domain::{Config, EwikiError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "ewiki.json", "ewiki.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `EwikiError::Config` if the explicit file is missing, a found file
/// cannot be parsed, or an environment override has an invalid value.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_file(Some(path))?,
        None => match probe_config_paths() {
            Some(found) => load_from_file(Some(found))?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
///
/// # Errors
/// Returns `EwikiError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EwikiError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EwikiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EwikiError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EwikiError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EwikiError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(EwikiError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Apply `EWIKI_*` environment variables on top of `config`
///
/// Unset variables leave the corresponding field untouched.
///
/// # Errors
/// Returns `EwikiError::Config` if a numeric variable cannot be parsed.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(origin) = env_opt("EWIKI_API_ORIGIN") {
        config.api.origin = origin;
    }
    if let Some(base_path) = env_opt("EWIKI_API_BASE_PATH") {
        config.api.base_path = base_path;
    }
    if let Some(agent) = env_opt("EWIKI_API_USER_AGENT") {
        config.api.user_agent = Some(agent);
    }
    if let Some(secs) = env_opt("EWIKI_API_TIMEOUT_SECS") {
        config.api.timeout_secs = Some(
            secs.parse()
                .map_err(|e| EwikiError::Config(format!("Invalid API timeout: {e}")))?,
        );
    }

    if let Some(host) = env_opt("EWIKI_DEV_HOST") {
        config.dev_server.host = host;
    }
    if let Some(port) = env_opt("EWIKI_DEV_PORT") {
        config.dev_server.port =
            port.parse().map_err(|e| EwikiError::Config(format!("Invalid dev port: {e}")))?;
    }
    if let Some(prefix) = env_opt("EWIKI_PROXY_PREFIX") {
        config.dev_server.proxy_prefix = prefix;
    }
    if let Some(target) = env_opt("EWIKI_PROXY_TARGET") {
        config.dev_server.proxy_target = target;
    }
    config.dev_server.change_origin =
        env_bool("EWIKI_PROXY_CHANGE_ORIGIN", config.dev_server.change_origin);
    if let Some(dir) = env_opt("EWIKI_STATIC_DIR") {
        config.dev_server.static_dir = Some(dir);
    }

    if let Some(language) = env_opt("EWIKI_DEFAULT_LANGUAGE") {
        config.defaults.language = language;
    }

    Ok(())
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Unset or blank keeps `default`.
fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
