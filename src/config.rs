use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Sliding lifetime of a cart session, in hours.
    pub cart_ttl_hours: i64,
    /// Transactional-mail HTTP endpoint; completion e-mails are skipped when unset.
    pub mail_api_url: Option<String>,
    pub mail_from: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let cart_ttl_hours = env::var("CART_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        let mail_api_url = env::var("MAIL_API_URL").ok().filter(|u| !u.is_empty());
        let mail_from =
            env::var("MAIL_FROM").unwrap_or_else(|_| "hello@brewbloom.example".to_string());
        Ok(Self {
            database_url,
            host,
            port,
            cart_ttl_hours,
            mail_api_url,
            mail_from,
        })
    }
}
