//! Environment-driven configuration

use tracing::warn;

/// Default listener port when `PORT` is unset
const DEFAULT_PORT: u16 = 5000;

/// Environment variable echoed by `GET /env`
pub const ENV_VAR: &str = "APP_ENV";

/// Runtime configuration resolved from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the API server binds on
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment
    ///
    /// `PORT` falls back to 5000 when unset; unparseable values also fall
    /// back, with a warning, rather than failing startup.
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(value) => match value.parse() {
                Ok(port) => port,
                Err(_) => {
                    warn!(value = %value, default = DEFAULT_PORT, "PORT is not a valid port number");
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        Self { port }
    }
}
