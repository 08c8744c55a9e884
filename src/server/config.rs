use std::net::SocketAddr;

use crate::services::content_filter::MatchPolicy;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
    pub filter_policy: MatchPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: None,
            filter_policy: MatchPolicy::Conservative,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| AppError::Internal(format!("Invalid PORT: {}", port)))?,
            None => defaults.port,
        };

        let filter_policy = match lookup("FILTER_POLICY") {
            Some(policy) => MatchPolicy::parse(&policy)
                .ok_or_else(|| AppError::Internal(format!("Invalid FILTER_POLICY: {}", policy)))?,
            None => defaults.filter_policy,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            cors_origin: lookup("CORS_ORIGIN").filter(|origin| !origin.is_empty()),
            filter_policy,
        })
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid bind address: {}", e)))
    }
}
