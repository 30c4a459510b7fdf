// Configuration loading and parsing (gridiron.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides `nfl_api_key` from credentials.toml.
pub const API_KEY_ENV: &str = "NFL_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// gridiron.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire gridiron.toml file.
#[derive(Debug, Clone, Deserialize)]
struct GridironFile {
    server: ServerConfig,
    upstream: UpstreamConfig,
    source: SourceConfig,
    cache: CacheConfig,
}

/// Proxy server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of front-end files served next to the API route.
    pub static_dir: String,
}

/// Third-party stats provider the proxy forwards to.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Season code, e.g. `2025REG`.
    pub season: String,
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Full URL of the season stats endpoint.
    pub fn season_stats_url(&self) -> String {
        format!(
            "{}/PlayerSeasonStats/{}",
            self.base_url.trim_end_matches('/'),
            self.season
        )
    }
}

/// Where the interactive client loads season stats from (the proxy route).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub stats_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// SQLite database path (`:memory:` for an ephemeral cache).
    pub path: String,
    /// Fixed cache key for the season's stats payload.
    pub key: String,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub nfl_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/gridiron.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not copy defaults or read the environment; see `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- gridiron.toml (required) ---
    let main_path = config_dir.join("gridiron.toml");
    let main_text = read_file(&main_path)?;
    let file: GridironFile = toml::from_str(&main_text).map_err(|e| ConfigError::ParseError {
        path: main_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        server: file.server,
        upstream: file.upstream,
        source: file.source,
        cache: file.cache,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` from `defaults/`: every default file that has no
/// counterpart in `config/` is copied over. Existing files are left alone
/// and `.example` templates are never copied. Returns the paths written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        return if config_dir.is_dir() {
            Ok(Vec::new())
        } else {
            Err(copy_error(format!(
                "no defaults/ or config/ under {}",
                base_dir.display()
            )))
        };
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut defaults: Vec<PathBuf> = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_error(format!("cannot list {}: {e}", defaults_dir.display())))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && !is_template(path))
        .collect();
    defaults.sort();

    let mut copied = Vec::new();
    for source in defaults {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);
        if copy_if_missing(&source, &target)? {
            copied.push(target);
        }
    }
    Ok(copied)
}

fn is_template(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "example")
}

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Copy `source` to `target` unless `target` already exists. `create_new`
/// makes the existence check and the create a single step.
fn copy_if_missing(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    use std::io::Write;

    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_error(format!("cannot create {}: {e}", target.display()))),
    };

    let bytes = std::fs::read(source)
        .map_err(|e| copy_error(format!("cannot read {}: {e}", source.display())))?;
    dest.write_all(&bytes)
        .map_err(|e| copy_error(format!("cannot write {}: {e}", target.display())))?;
    Ok(true)
}

/// Convenience wrapper: loads config relative to the current working
/// directory after copying defaults, then applies the `NFL_API_KEY`
/// environment override.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    config.credentials.nfl_api_key = resolve_api_key(
        config.credentials.nfl_api_key.take(),
        std::env::var(API_KEY_ENV).ok(),
    );
    Ok(config)
}

/// Pick the API key: a non-blank environment value wins over the file value.
pub fn resolve_api_key(file_value: Option<String>, env_value: Option<String>) -> Option<String> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or(file_value)
        .filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    let required: &[(&str, &str)] = &[
        ("server.host", &config.server.host),
        ("upstream.base_url", &config.upstream.base_url),
        ("upstream.season", &config.upstream.season),
        ("source.stats_url", &config.source.stats_url),
        ("cache.path", &config.cache.path),
        ("cache.key", &config.cache.key),
    ];
    for (name, val) in required {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.upstream.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "upstream.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Helper: returns the path to the gridiron-draft crate root
    /// (works whether `cargo test` runs from the crate root or repo root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("gridiron-draft/defaults").exists() {
            cwd.join("gridiron-draft")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    /// Helper: a scratch dir whose config/ holds a copy of the default
    /// gridiron.toml with `edit` applied.
    fn scratch_with_main(name: &str, edit: impl Fn(String) -> String) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();

        let text = fs::read_to_string(project_root().join("defaults/gridiron.toml")).unwrap();
        fs::write(config_dir.join("gridiron.toml"), edit(text)).unwrap();
        tmp
    }

    fn expect_validation_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_default_config() {
        let tmp = scratch_with_main("gridiron_config_defaults", |t| t);
        let config = load_config_from(&tmp).expect("default config should load");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "public");
        assert_eq!(config.upstream.season, "2025REG");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(
            config.upstream.season_stats_url(),
            "https://api.sportsdata.io/v3/nfl/stats/json/PlayerSeasonStats/2025REG"
        );
        assert_eq!(config.source.stats_url, "http://127.0.0.1:3000/api/nfl-stats");
        assert_eq!(config.cache.path, "gridiron-cache.db");
        assert_eq!(config.cache.key, "nfl_stats_cache_2025");
        assert!(config.credentials.nfl_api_key.is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_toml_with_api_key() {
        let tmp = scratch_with_main("gridiron_config_creds", |t| t);
        fs::write(
            tmp.join("config/credentials.toml"),
            "nfl_api_key = \"test-key\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.credentials.nfl_api_key.as_deref(), Some("test-key"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_key_overrides_file_key() {
        assert_eq!(
            resolve_api_key(Some("file".into()), Some("env".into())).as_deref(),
            Some("env")
        );
        assert_eq!(
            resolve_api_key(Some("file".into()), None).as_deref(),
            Some("file")
        );
        assert_eq!(
            resolve_api_key(Some("file".into()), Some("  ".into())).as_deref(),
            Some("file")
        );
        assert_eq!(resolve_api_key(Some("".into()), None), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn trailing_slash_in_base_url() {
        let upstream = UpstreamConfig {
            base_url: "https://example.test/v3/nfl/stats/json/".into(),
            season: "2024REG".into(),
            timeout_secs: 5,
        };
        assert_eq!(
            upstream.season_stats_url(),
            "https://example.test/v3/nfl/stats/json/PlayerSeasonStats/2024REG"
        );
    }

    #[test]
    fn rejects_port_zero() {
        let tmp = scratch_with_main("gridiron_config_port_zero", |t| {
            t.replace("port = 3000", "port = 0")
        });
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "server.port");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_season() {
        let tmp = scratch_with_main("gridiron_config_empty_season", |t| {
            t.replace("season = \"2025REG\"", "season = \"\"")
        });
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "upstream.season");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_cache_key() {
        let tmp = scratch_with_main("gridiron_config_empty_key", |t| {
            t.replace("key = \"nfl_stats_cache_2025\"", "key = \" \"")
        });
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "cache.key");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let tmp = scratch_with_main("gridiron_config_zero_timeout", |t| {
            t.replace("timeout_secs = 30", "timeout_secs = 0")
        });
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "upstream.timeout_secs");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_main_file() {
        let tmp = std::env::temp_dir().join("gridiron_config_missing_main");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("gridiron.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_with_main("gridiron_config_invalid", |_| {
            "this is not valid [[[ toml".to_string()
        });

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("gridiron.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_credentials() {
        let tmp = scratch_with_main("gridiron_config_bad_creds", |t| t);
        fs::write(tmp.join("config/credentials.toml"), "nfl_api_key = [").unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("credentials.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("gridiron_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            project_root().join("defaults/gridiron.toml"),
            defaults_dir.join("gridiron.toml"),
        )
        .unwrap();
        fs::write(
            defaults_dir.join("credentials.toml.example"),
            "nfl_api_key = \"...\"\n",
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/gridiron.toml").exists());
        assert!(!tmp.join("config/credentials.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("gridiron_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::copy(
            project_root().join("defaults/gridiron.toml"),
            defaults_dir.join("gridiron.toml"),
        )
        .unwrap();
        fs::write(config_dir.join("gridiron.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(config_dir.join("gridiron.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("gridiron_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no defaults/ or config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
