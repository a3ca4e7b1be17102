use anyhow::Context;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Argon2 iteration count.
    pub hash_cost: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

pub const DEFAULT_HASH_COST: u32 = 2;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "scribe".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "scribe-users".into()),
        };
        let password = PasswordConfig {
            hash_cost: std::env::var("PASSWORD_HASH_COST")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(DEFAULT_HASH_COST),
        };
        let port = std::env::var("APP_PORT")
            .ok()
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("APP_PORT must be a port number")?
            .unwrap_or(3000);

        Ok(Self {
            database_url: database_url_from_env(),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            jwt,
            password,
        })
    }
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the `DB_*` parts.
fn database_url_from_env() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }
    let var = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.into());
    format!(
        "postgres://{}:{}@{}:{}/{}",
        var("DB_USERNAME", "postgres"),
        var("DB_PASSWORD", "postgres"),
        var("DB_HOST", "localhost"),
        var("DB_PORT", "5432"),
        var("DB_NAME", "scribe_dev"),
    )
}
