use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use permission_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProviderConfig {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierProviderConfig {
    Console,
    Redis { redis_url: String, channel: String },
    Webhook { url: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub store_provider: StoreProviderConfig,
    pub store_operation_timeout: Duration,
    pub api_host: String,
    pub api_port: u16,
    pub notifier_provider: NotifierProviderConfig,
    pub notifier_buffer_capacity: usize,
    pub notifier_publish_timeout: Duration,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let vars = EnvLookup(lookup);

        let store_provider = match vars.or("STORE_PROVIDER", "postgres").as_str() {
            "postgres" => StoreProviderConfig::Postgres {
                database_url: vars.required_non_empty("DATABASE_URL")?,
            },
            "memory" => StoreProviderConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORE_PROVIDER must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };
        if migrate_only && store_provider == StoreProviderConfig::Memory {
            return Err(AppError::Validation(
                "the migrate command requires STORE_PROVIDER=postgres".to_owned(),
            ));
        }

        let notifier_provider = match vars.or("NOTIFIER_PROVIDER", "console").as_str() {
            "console" => NotifierProviderConfig::Console,
            "redis" => NotifierProviderConfig::Redis {
                redis_url: vars.required_non_empty("REDIS_URL")?,
                channel: vars.or("NOTIFIER_REDIS_CHANNEL", "permission-manager"),
            },
            "webhook" => NotifierProviderConfig::Webhook {
                url: vars.required_non_empty("NOTIFIER_WEBHOOK_URL")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "NOTIFIER_PROVIDER must be one of 'console', 'redis' or 'webhook', got '{other}'"
                )));
            }
        };

        let notifier_buffer_capacity = vars.parsed::<usize>("NOTIFIER_BUFFER_CAPACITY", 1024)?;
        if notifier_buffer_capacity == 0 {
            return Err(AppError::Validation(
                "NOTIFIER_BUFFER_CAPACITY must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            store_provider,
            store_operation_timeout: vars.millis("STORE_OPERATION_TIMEOUT_MS", 5000)?,
            api_host: vars.or("API_HOST", "127.0.0.1"),
            api_port: vars.parsed::<u16>("API_PORT", 10010)?,
            notifier_provider,
            notifier_buffer_capacity,
            notifier_publish_timeout: vars.millis("NOTIFIER_PUBLISH_TIMEOUT_MS", 5000)?,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

struct EnvLookup<F>(F);

impl<F: Fn(&str) -> Option<String>> EnvLookup<F> {
    fn or(&self, name: &str, default: &str) -> String {
        (self.0)(name)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_owned())
    }

    fn required_non_empty(&self, name: &str) -> Result<String, AppError> {
        let value =
            (self.0)(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{name} must not be empty")));
        }

        Ok(value)
    }

    fn parsed<T>(&self, name: &str, default: T) -> Result<T, AppError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.0)(name).filter(|value| !value.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
            None => Ok(default),
        }
    }

    fn millis(&self, name: &str, default: u64) -> Result<Duration, AppError> {
        let millis = self.parsed::<u64>(name, default)?;
        if millis == 0 {
            return Err(AppError::Validation(format!("{name} must be greater than zero")));
        }

        Ok(Duration::from_millis(millis))
    }
}
