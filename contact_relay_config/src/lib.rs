use std::{fmt, net::IpAddr, path::Path};

use anyhow::Context;
pub use config::Environment;
use config::{File, FileFormat};
use contact_relay_models::email_address::EmailAddress;
use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_ENV: &str = "CONTACT_RELAY_CONFIG";

/// Prefix of environment variables overriding single config values, e.g.
/// `CONTACT_RELAY__HTTP__PORT=8080`.
pub const ENV_PREFIX: &str = "CONTACT_RELAY";

/// Load the default config, followed by the files listed in
/// [`CONFIG_PATHS_ENV`] and finally the environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATHS_ENV)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();

    load_from(&paths, environment())
}

pub fn load_from(paths: &[impl AsRef<Path>], environment: Environment) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    paths
        .iter()
        .try_fold(builder, |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(environment)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddress,
    pub password: Option<Sensitive<String>>,
}

/// Hides the wrapped value from debug output.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Sensitive<T>(pub T);

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[sensitive]")
    }
}
