use std::env;

/// Email of the account guaranteed to exist at startup.
pub const DEFAULT_BOOTSTRAP_EMAIL: &str = "swagger-ui@example.com";

/// Password used for the bootstrap account when `SWAGGER_UI_PASSWORD` is unset.
pub const DEFAULT_BOOTSTRAP_PASSWORD: &str = "swagger123";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub run_migrations: bool,
    pub bootstrap: BootstrapUserConfig,
}

/// Credentials for the startup bootstrap account.
#[derive(Debug, Clone)]
pub struct BootstrapUserConfig {
    pub email: String,
    pub password: String,
    /// True when the password fell back to [`DEFAULT_BOOTSTRAP_PASSWORD`].
    pub password_defaulted: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let password = lookup("SWAGGER_UI_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        Ok(Self {
            database_url: lookup("DATABASE_URL")?,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: lookup("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: lookup("BACKEND_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            run_migrations: lookup("RUN_MIGRATIONS")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
            bootstrap: BootstrapUserConfig {
                email: lookup("BOOTSTRAP_USER_EMAIL")
                    .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_EMAIL.to_string()),
                password_defaulted: password.is_none(),
                password: password.unwrap_or_else(|| DEFAULT_BOOTSTRAP_PASSWORD.to_string()),
            },
        })
    }
}
