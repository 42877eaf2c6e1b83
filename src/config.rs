//! Configuration for mfun.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (MFUN_SOURCES, MFUN_REMOTE_TIMEOUT)
//! 2. Project config file (.mfun/config.yaml)
//! 3. User config file (<config dir>/mfun/config.yaml)
//! 4. Defaults (no sources, 30s remote timeout, 10 MiB remote bodies)
//!
//! Config file discovery:
//! - Searches current directory and parents for .mfun/config.yaml
//! - Falls back to the platform config directory
//! - Relative source paths are resolved against the directory holding `.mfun/`
//!   (or the user config file's directory)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryConfig {
    /// Files, glob patterns or URLs loaded when a command names none
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub timeout_seconds: Option<u64>,
    pub max_bytes: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Default sources, with relative paths made absolute
    pub sources: Vec<String>,
    /// Remote fetch settings
    pub remote: RemoteSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub timeout_seconds: u64,
    pub max_bytes: u64,
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_project_config() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".mfun").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn find_user_config() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("mfun").join("config.yaml");
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Directory relative sources in `config_path` are resolved against
fn source_base(config_path: &Path) -> &Path {
    let dir = config_path.parent().unwrap_or(Path::new("."));
    if dir.file_name().map_or(false, |name| name == ".mfun") {
        dir.parent().unwrap_or(Path::new("."))
    } else {
        dir
    }
}

/// Resolve a source that may be relative to the config file's base directory.
///
/// URLs and absolute paths pass through unchanged.
fn resolve_source(base: &Path, source: &str) -> String {
    if is_url(source) || Path::new(source).is_absolute() {
        source.to_string()
    } else {
        base.join(source).to_string_lossy().into_owned()
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn split_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Merge a parsed config file with environment overrides
fn resolve_config(
    config_file: Option<(PathBuf, ConfigFile)>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let (mut sources, mut remote, config_path) = match config_file {
        Some((path, config)) => {
            let base = source_base(&path);
            let sources = config
                .library
                .sources
                .iter()
                .map(|s| resolve_source(base, s))
                .collect();

            let remote = RemoteSettings {
                timeout_seconds: config
                    .remote
                    .as_ref()
                    .and_then(|r| r.timeout_seconds)
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
                max_bytes: config
                    .remote
                    .as_ref()
                    .and_then(|r| r.max_bytes)
                    .unwrap_or(DEFAULT_MAX_BYTES),
            };

            (sources, remote, Some(path))
        }
        None => (Vec::new(), RemoteSettings::default(), None),
    };

    if let Some(env_sources) = env("MFUN_SOURCES") {
        sources = split_sources(&env_sources);
    }

    if let Some(env_timeout) = env("MFUN_REMOTE_TIMEOUT") {
        remote.timeout_seconds = env_timeout
            .trim()
            .parse()
            .with_context(|| format!("Invalid MFUN_REMOTE_TIMEOUT: {}", env_timeout))?;
    }

    Ok(ResolvedConfig {
        sources,
        remote,
        config_file: config_path,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = match find_project_config().or_else(find_user_config) {
        Some(path) => {
            let config = load_config_file(&path)?;
            Some((path, config))
        }
        None => None,
    };

    resolve_config(config_file, |key| std::env::var(key).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (bypasses the cache)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, no_env).unwrap();

        assert!(config.sources.is_empty());
        assert_eq!(config.remote, RemoteSettings::default());
        assert_eq!(config.remote.timeout(), Duration::from_secs(30));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let mfun_dir = temp.path().join(".mfun");
        std::fs::create_dir_all(&mfun_dir).unwrap();

        let config_path = mfun_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
library:
  sources:
    - data/songs.csv
    - https://example.com/songs.json
remote:
  timeout_seconds: 5
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.library.sources.len(), 2);
        assert_eq!(parsed.remote.as_ref().unwrap().timeout_seconds, Some(5));
        assert_eq!(parsed.remote.as_ref().unwrap().max_bytes, None);

        let config = resolve_config(Some((config_path.clone(), parsed)), no_env).unwrap();
        assert_eq!(
            config.sources,
            vec![
                temp.path().join("data/songs.csv").to_string_lossy().into_owned(),
                "https://example.com/songs.json".to_string(),
            ]
        );
        assert_eq!(config.remote.timeout_seconds, 5);
        assert_eq!(config.remote.max_bytes, DEFAULT_MAX_BYTES);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_overrides_file() {
        let parsed: ConfigFile = serde_yaml::from_str(
            r#"
version: "1.0"
library:
  sources: [a.csv]
"#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            ("MFUN_SOURCES", "one.csv, https://example.com/two.txt,,"),
            ("MFUN_REMOTE_TIMEOUT", "7"),
        ]
        .into_iter()
        .collect();

        let config = resolve_config(
            Some((PathBuf::from("/project/.mfun/config.yaml"), parsed)),
            |key| env.get(key).map(|v| v.to_string()),
        )
        .unwrap();

        assert_eq!(config.sources, vec!["one.csv", "https://example.com/two.txt"]);
        assert_eq!(config.remote.timeout_seconds, 7);
    }

    #[test]
    fn test_invalid_env_timeout() {
        let result = resolve_config(None, |key| {
            (key == "MFUN_REMOTE_TIMEOUT").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_source() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_source(&base, "songs/*.csv"),
            "/home/user/project/songs/*.csv"
        );
        assert_eq!(resolve_source(&base, "/abs/songs.csv"), "/abs/songs.csv");
        assert_eq!(
            resolve_source(&base, "http://example.com/a.csv"),
            "http://example.com/a.csv"
        );
    }

    #[test]
    fn test_source_base() {
        assert_eq!(
            source_base(Path::new("/project/.mfun/config.yaml")),
            Path::new("/project")
        );
        assert_eq!(
            source_base(Path::new("/home/me/.config/mfun/config.yaml")),
            Path::new("/home/me/.config/mfun")
        );
    }
}
