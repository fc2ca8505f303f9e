use serde::Deserialize;

/// Deployment environment, selects logging format and security headers
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Service configuration, read from environment variables.
///
/// | Variable | Default |
/// |---|---|
/// | `DATABASE_URL` | `sqlite://flashcards.db` |
/// | `DB_MAX_CONNECTIONS` | `5` |
/// | `HOST` | `0.0.0.0` |
/// | `PORT` | `3000` |
/// | `ENV` | `development` |
/// | `ALLOWED_ORIGINS` | empty (permissive CORS) |
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub env: Environment,
    /// Comma-separated list of origins allowed by CORS
    #[serde(default)]
    pub allowed_origins: String,
}

fn default_database_url() -> String {
    "sqlite://flashcards.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Build a config from explicit `(NAME, value)` pairs instead of the process environment
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
