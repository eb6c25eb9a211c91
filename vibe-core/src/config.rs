use std::{
    env::{self, VarError},
    fs::File,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

pub const APP_NAME: &str = "VibeStrings";
const CONFIG_FILENAME: &str = "config.json";
const ENDPOINT_ENV_VAR: &str = "VIBE_ENDPOINT";
const PROXY_ENV_VAR: &str = "HTTPS_PROXY";

pub const DEFAULT_ENDPOINT: &str = "https://graphql-api-brown.vercel.app/api/graphql";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub models_per_page: usize,
    pub musicians_per_page: usize,
    pub brands_per_page: usize,
    pub search_debounce_ms: u64,
    pub page_window: usize,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            models_per_page: 6,
            musicians_per_page: 2,
            brands_per_page: 8,
            search_debounce_ms: 300,
            page_window: 5,
            request_timeout_secs: 10,
            cache_ttl_secs: 300,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    /// Reads the config file from the platform config directory, applies the
    /// environment overrides and validates the result.
    pub fn load() -> Result<Self, Error> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                log::warn!("no config directory on this platform, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(env_var(ENDPOINT_ENV_VAR));
        config.validate()?;
        Ok(config)
    }

    /// A missing file yields the defaults, anything else unreadable is an error.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        match File::open(path) {
            Ok(file) => {
                log::info!("loading config: {:?}", path);
                serde_json::from_reader(io::BufReader::new(file))
                    .map_err(|err| Error::ConfigError(format!("{}: {}", path.display(), err)))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn apply_overrides(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint {
            log::info!("endpoint overridden: {}", endpoint);
            self.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let url = Url::parse(&self.endpoint)
            .map_err(|err| Error::ConfigError(format!("endpoint {:?}: {}", self.endpoint, err)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigError(format!(
                "endpoint {:?} is not an HTTP URL",
                self.endpoint
            )));
        }
        for (name, value) in [
            ("models_per_page", self.models_per_page),
            ("musicians_per_page", self.musicians_per_page),
            ("brands_per_page", self.brands_per_page),
            ("page_window", self.page_window),
        ] {
            if value == 0 {
                return Err(Error::ConfigError(format!("{name} must be positive")));
            }
        }
        if let Some(proxy) = self.proxy() {
            check_proxy(&proxy)?;
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn proxy(&self) -> Option<String> {
        env_var(PROXY_ENV_VAR)
    }
}

const PROXY_SCHEMES: &[&str] = &["http", "https", "socks4", "socks4a", "socks5", "socks5h"];

fn check_proxy(proxy: &str) -> Result<(), Error> {
    let url = Url::parse(proxy)
        .map_err(|err| Error::ConfigError(format!("{PROXY_ENV_VAR} {proxy:?}: {err}")))?;
    if PROXY_SCHEMES.contains(&url.scheme()) && url.host().is_some() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "{PROXY_ENV_VAR} {proxy:?} is not a supported proxy URL"
        )))
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).map_or_else(
        |err| match err {
            VarError::NotPresent => None,
            VarError::NotUnicode(_) => {
                log::error!("{} is not valid unicode", name);
                None
            }
        },
        |value| Some(value).filter(|v| !v.is_empty()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.models_per_page, 6);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"models_per_page": 10, "endpoint": "http://localhost:4000/graphql"}}"#)
            .unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.models_per_page, 10);
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
        assert_eq!(config.musicians_per_page, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let config = Config {
            endpoint: "not a url".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            endpoint: "ftp://example.com/graphql".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            models_per_page: 0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::ConfigError("models_per_page must be positive".into()))
        );
    }

    #[test]
    fn proxy_urls_are_checked() {
        assert!(check_proxy("http://proxy.local:3128").is_ok());
        assert!(check_proxy("socks5://127.0.0.1:1080").is_ok());
        assert!(matches!(
            check_proxy("not a proxy"),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            check_proxy("ftp://proxy.local:21"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn endpoint_override_wins() {
        let mut config = Config::default();
        config.apply_overrides(None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        config.apply_overrides(Some("https://example.com/graphql".into()));
        assert_eq!(config.endpoint, "https://example.com/graphql");
    }
}
