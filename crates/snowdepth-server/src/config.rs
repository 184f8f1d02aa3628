//! Configuration for the snow API server.
//!
//! All configuration is loaded once at startup from environment
//! variables and passed down explicitly; nothing reads the environment
//! after that. Empty values count as unset.

use std::path::PathBuf;
use std::time::Duration;

use snowdepth_frost::{DEFAULT_BASE_URL, FrostConfig, Url};

use crate::server::{DEFAULT_PORT, ServerConfig};
use crate::snow::SnowSettings;

/// Default location of the static page.
pub const DEFAULT_INDEX_PATH: &str = "index.html";

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address.
    pub server: ServerConfig,
    /// Frost API connection settings, including the client id.
    pub frost: FrostConfig,
    /// Station and element for `/snow`.
    pub snow: SnowSettings,
    /// Static HTML page served at `/`.
    pub index_path: PathBuf,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    #[error("invalid {name}: {message}")]
    Invalid {
        /// The variable name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `HOST` -- bind address (default `0.0.0.0`)
    /// - `PORT` -- bind port (default `8000`)
    /// - `CLIENT_ID` -- Frost client id (no default; upstream calls fail without it)
    /// - `FROST_BASE_URL` -- Frost API base URL (default `https://frost.met.no/`)
    /// - `FROST_TIMEOUT_SECS` -- upstream request timeout, at least 1 (default: none)
    /// - `INDEX_PATH` -- static page path (default `index.html`)
    /// - `SNOW_STATION` -- Frost source id (default `SN90450`)
    /// - `SNOW_ELEMENT` -- Frost element id (default `surface_snow_thickness`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .map(|raw| parse_port(&raw))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
        };

        let base_url = var("FROST_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            name: "FROST_BASE_URL",
            message: format!("{base_url}: {e}"),
        })?;

        let timeout = var("FROST_TIMEOUT_SECS")
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        let frost = FrostConfig {
            base_url,
            client_id: var("CLIENT_ID"),
            timeout,
        };

        let defaults = SnowSettings::default();
        let snow = SnowSettings {
            station: var("SNOW_STATION").unwrap_or(defaults.station),
            element: var("SNOW_ELEMENT").unwrap_or(defaults.element),
        };

        let index_path = var("INDEX_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH), PathBuf::from);

        Ok(Self {
            server,
            frost,
            snow,
            index_path,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
        name: "PORT",
        message: format!("{raw}: {e}"),
    })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |message: String| ConfigError::Invalid {
        name: "FROST_TIMEOUT_SECS",
        message,
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid(format!("{raw}: must be at least 1 second"))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(format!("{raw}: {e}"))),
    }
}
