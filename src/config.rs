//! Environment configuration, read once at startup.

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
}

impl AppConfig {
    /// `PORT` (default 3000) and `DATABASE_URL`. Call after
    /// `dotenvy::dotenv()` so a local `.env` is honored.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/school".into());
        Self { port, database_url }
    }
}
