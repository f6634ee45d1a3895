/// Configuration management for course-hub
///
/// Everything is read from environment variables once at startup. `.env` is
/// loaded by `main` before `Config::from_env` runs.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Main application configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Which store backs the service
    pub store: StoreBackend,
    /// Upload limits
    pub upload: UploadConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Total multipart body size accepted per request
    pub max_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app", &self.app)
            .field("cors", &self.cors)
            .field("jwt", &self.jwt)
            .field("store", &self.store)
            .field("upload", &self.upload)
            .finish()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("APP_PORT", 5000)?,
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if production && allowed_origins.split(',').any(|o| o.trim() == "*") {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET")
                    .map_err(|_| "JWT_SECRET must be set".to_string())?,
                ttl_secs: parse_env_or_default("JWT_TTL_SECS", 86_400)?,
            },
            store: match std::env::var("STORE_BACKEND") {
                Ok(value) => value.parse()?,
                Err(_) => StoreBackend::Postgres,
            },
            upload: UploadConfig {
                max_bytes: parse_env_or_default("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
        })
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "CORS_ALLOWED_ORIGINS",
        "JWT_SECRET",
        "JWT_TTL_SECS",
        "STORE_BACKEND",
        "MAX_UPLOAD_BYTES",
        "DATABASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        std::env::set_var("JWT_SECRET", "x".repeat(32));

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 5000);
        assert_eq!(config.jwt.ttl_secs, 86_400);
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.upload.max_bytes, 50 * 1024 * 1024);
        assert_eq!(
            config.cors.origins().collect::<Vec<_>>(),
            vec!["http://localhost:3000"]
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_an_error() {
        clear_env();
        assert!(Config::from_env().unwrap_err().contains("JWT_SECRET"));
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("JWT_SECRET", "x".repeat(32));
        std::env::set_var("APP_PORT", "8080");
        std::env::set_var("STORE_BACKEND", "memory");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://a.dev, https://b.dev");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(
            config.cors.origins().collect::<Vec<_>>(),
            vec!["https://a.dev", "https://b.dev"]
        );

        std::env::set_var("APP_PORT", "not-a-port");
        assert!(Config::from_env().unwrap_err().contains("APP_PORT"));

        std::env::set_var("APP_PORT", "8080");
        std::env::set_var("STORE_BACKEND", "mongo");
        assert!(Config::from_env().unwrap_err().contains("STORE_BACKEND"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_production_cors_rules() {
        clear_env();
        std::env::set_var("JWT_SECRET", "x".repeat(32));
        std::env::set_var("APP_ENV", "production");

        assert!(Config::from_env().is_err());

        std::env::set_var("CORS_ALLOWED_ORIGINS", "*");
        assert!(Config::from_env().is_err());

        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://app.example.com");
        assert!(Config::from_env().unwrap().app.is_production());

        clear_env();
    }

    #[test]
    fn test_debug_redacts_secret() {
        let jwt = JwtConfig {
            secret: "super-secret-value".to_string(),
            ttl_secs: 60,
        };
        let printed = format!("{:?}", jwt);
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("[REDACTED]"));
    }
}
