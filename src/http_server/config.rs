//! Listener and CORS settings for the API server

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to bind (default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed to call the API. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Replace the port when one is given on the command line
    pub fn override_port(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.port = port;
        }
    }

    /// Check the port and every configured origin
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("http.port must be > 0".to_string());
        }
        if let Some(bad) = self
            .cors_origins
            .iter()
            .find(|origin| HeaderValue::from_str(origin).is_err())
        {
            return Err(format!("Invalid CORS origin: '{}'", bad));
        }
        Ok(())
    }

    /// `host:port` to bind
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS policy: any origin when none are configured, else the list
    pub fn cors_layer(&self) -> CorsLayer {
        let origins = if self.cors_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(
                self.cors_origins
                    .iter()
                    .filter_map(|origin| HeaderValue::from_str(origin).ok()),
            )
        };

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
