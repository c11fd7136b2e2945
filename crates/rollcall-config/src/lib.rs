use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rollcall_core::rules::{validate_session_timeout, DEFAULT_SESSION_TIMEOUT_SECS};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "rollcall";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
pub const MAX_LOOKUP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session_timeout_secs: u64,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            lookup: LookupConfig::default(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid session_timeout_secs value: {0}")]
    InvalidSessionTimeout(u64),
    #[error("invalid lookup.timeout_secs value: {0}")]
    InvalidLookupTimeout(u64),
    #[error("invalid lookup.base_url value: {0}")]
    InvalidLookupUrl(String),
    #[error("invalid lookup.user_agent value")]
    InvalidUserAgent,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    session_timeout_secs: Option<u64>,
    lookup: Option<LookupFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LookupFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(timeout) = parsed.session_timeout_secs {
        config.session_timeout_secs = validate_session_timeout(timeout)
            .map_err(|_| ConfigError::InvalidSessionTimeout(timeout))?;
    }

    if let Some(lookup) = parsed.lookup {
        if let Some(base_url) = lookup.base_url {
            config.lookup.base_url = validate_base_url(&base_url)?;
        }
        if let Some(timeout) = lookup.timeout_secs {
            if timeout == 0 || timeout > MAX_LOOKUP_TIMEOUT_SECS {
                return Err(ConfigError::InvalidLookupTimeout(timeout));
            }
            config.lookup.timeout_secs = timeout;
        }
        if let Some(user_agent) = lookup.user_agent {
            let trimmed = user_agent.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidUserAgent);
            }
            config.lookup.user_agent = Some(trimmed.to_string());
        }
    }

    Ok(config)
}

fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| ConfigError::InvalidLookupUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidLookupUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, ConfigError, ConfigFile, LookupFile, DEFAULT_LOOKUP_BASE_URL,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            session_timeout_secs: Some(600),
            lookup: Some(LookupFile {
                base_url: Some("http://localhost:8080/ws/".to_string()),
                timeout_secs: Some(3),
                user_agent: Some(" rollcall-test ".to_string()),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.session_timeout_secs, 600);
        assert_eq!(merged.lookup.base_url, "http://localhost:8080/ws");
        assert_eq!(merged.lookup.timeout_secs, 3);
        assert_eq!(merged.lookup.user_agent.as_deref(), Some("rollcall-test"));
    }

    #[test]
    fn merge_config_keeps_defaults_for_missing_keys() {
        let merged = merge_config(ConfigFile::default()).expect("merge");
        assert_eq!(merged.session_timeout_secs, 300);
        assert_eq!(merged.lookup.base_url, DEFAULT_LOOKUP_BASE_URL);
        assert!(merged.lookup.user_agent.is_none());
    }

    #[test]
    fn merge_config_rejects_out_of_range_values() {
        let err = merge_config(ConfigFile {
            session_timeout_secs: Some(0),
            lookup: None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSessionTimeout(0)));

        let err = merge_config(ConfigFile {
            session_timeout_secs: None,
            lookup: Some(LookupFile {
                timeout_secs: Some(500),
                ..Default::default()
            }),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLookupTimeout(500)));
    }

    #[test]
    fn merge_config_rejects_non_http_urls() {
        for raw in ["ftp://viacep.com.br/ws", "not a url", "file:///tmp/ws"] {
            let err = merge_config(ConfigFile {
                session_timeout_secs: None,
                lookup: Some(LookupFile {
                    base_url: Some(raw.to_string()),
                    ..Default::default()
                }),
            })
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidLookupUrl(_)),
                "url {raw:?}"
            );
        }
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
    }

    #[test]
    fn load_at_path_skips_missing_optional_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        assert!(load_at_path(&missing, false).expect("load").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "session_timeout_secs = 120\n[lookup]\nbase_url = \"https://cep.example.org/ws\"\ntimeout_secs = 4\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.session_timeout_secs, 120);
        assert_eq!(config.lookup.base_url, "https://cep.example.org/ws");
        assert_eq!(config.lookup.timeout_secs, 4);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "due_soon_days = 5\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "session_timeout_secs = 60\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
