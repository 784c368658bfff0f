//! # Process configuration
//!
//! [`Settings`] is read once at startup from (lowest to highest priority) built-in
//! defaults, an optional `config.toml` in the working directory, and the process
//! environment after `.env` has been loaded by `dotenvy`. Keys are flat, so the
//! environment variable `SESSION_SECRET` maps onto the `session_secret` field.
//!
//! The session secret has no default. A missing or blank secret is a configuration
//! error and the binary refuses to start.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://jokes.db?mode=rwc";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Secret used to sign session cookies.
    #[serde(default)]
    pub session_secret: String,
    pub database_url: String,
    pub server_address: String,
    /// `development` or `production`.
    pub app_env: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_builder(
            Config::builder()
                .add_source(
                    File::with_name("config.toml")
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(Environment::default()),
        )
    }

    pub(crate) fn from_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("server_address", DEFAULT_SERVER_ADDRESS)?
            .set_default("app_env", "development")?
            .build()?
            .try_deserialize()?;

        if settings.session_secret.trim().is_empty() {
            return Err(ConfigError::NotFound("SESSION_SECRET must be set".into()));
        }

        Ok(settings)
    }

    /// Session cookies are only marked `Secure` in production.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}
