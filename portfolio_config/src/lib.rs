use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use portfolio_models::{email_address::EmailAddressWithName, Sensitive};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_ENV: &str = "PORTFOLIO_CONFIG";

/// Prefix of environment variables overriding single config values, e.g.
/// `PORTFOLIO_EMAIL__PASSWORD` for `email.password`.
pub const ENV_PREFIX: &str = "PORTFOLIO";

/// Load the default config, any files listed in `PORTFOLIO_CONFIG` and the
/// `PORTFOLIO_*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Ok(extra) = std::env::var(CONFIG_PATHS_ENV) {
        paths.extend(
            extra
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        );
    }

    load_from(&paths, None)
}

fn load_from(
    paths: &[impl AsRef<Path>],
    env_override: Option<HashMap<String, String>>,
) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_override),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    /// Origins allowed to submit the contact form cross-origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    pub real_ip: Option<HttpRealIpConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub tls: EmailTlsConfig,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub timeout: Duration,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTlsConfig {
    None,
    Starttls,
    Tls,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddressWithName,
    pub no_project_placeholder: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], Some(HashMap::new())).unwrap();

        assert_eq!(config.email.tls, EmailTlsConfig::None);
        assert!(config.email.password.is_none());
        assert_eq!(config.contact.no_project_placeholder, "No project selected");
    }

    #[test]
    fn environment_overrides() {
        let env = HashMap::from([
            ("PORTFOLIO_EMAIL__HOST".to_owned(), "smtp.example.com".to_owned()),
            ("PORTFOLIO_EMAIL__PORT".to_owned(), "465".to_owned()),
            ("PORTFOLIO_EMAIL__TLS".to_owned(), "tls".to_owned()),
            ("PORTFOLIO_EMAIL__USERNAME".to_owned(), "relay".to_owned()),
            ("PORTFOLIO_EMAIL__PASSWORD".to_owned(), "hunter2".to_owned()),
            ("UNRELATED_EMAIL__PORT".to_owned(), "1".to_owned()),
        ]);

        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], Some(env)).unwrap();

        assert_eq!(config.email.host, "smtp.example.com");
        assert_eq!(config.email.port, 465);
        assert_eq!(config.email.tls, EmailTlsConfig::Tls);
        assert_eq!(config.email.username.as_deref(), Some("relay"));
        assert_eq!(config.email.password.as_deref().map(String::as_str), Some("hunter2"));
    }

    #[test]
    fn password_is_not_printed() {
        let env = HashMap::from([(
            "PORTFOLIO_EMAIL__PASSWORD".to_owned(),
            "hunter2".to_owned(),
        )]);

        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], Some(env)).unwrap();

        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn missing_file() {
        let err = load_from(&[Path::new("/does/not/exist.toml")], Some(HashMap::new()))
            .unwrap_err();

        assert!(err.to_string().contains("/does/not/exist.toml"));
    }
}
