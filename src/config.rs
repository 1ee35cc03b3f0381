use std::{env, path::PathBuf};

use chrono::Duration;

const DEV_JWT_SECRET: &str = "supersecret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub admin_username: String,
    pub admin_password: String,
    pub frontend_origins: Vec<String>,
    pub uploads_dir: PathBuf,
    pub images_dir: PathBuf,
    pub app_env: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let jwt_secret = match env::var("JWT_SECRET").or_else(|_| env::var("TOKEN_SECRET")) {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let expires_raw = env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "12h".to_string());
        let jwt_expires_in = parse_duration(&expires_raw)
            .ok_or_else(|| anyhow::anyhow!("invalid JWT_EXPIRES_IN: {expires_raw}"))?;

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string()),
        );

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_expires_in,
            admin_username: env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASS").unwrap_or_else(|_| "admin123".to_string()),
            frontend_origins,
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/uploads")),
            images_dir: env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/images")),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

/// Parses `12h`, `30m`, `7d`, `45s` or a bare number of seconds.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (digits, unit) = match raw.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], c.to_ascii_lowercase()),
        _ => (raw, 's'),
    };
    let value = digits.trim().parse::<i64>().ok().filter(|v| *v > 0)?;
    match unit {
        's' => Duration::try_seconds(value),
        'm' => Duration::try_minutes(value),
        'h' => Duration::try_hours(value),
        'd' => Duration::try_days(value),
        _ => None,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_durations() {
        assert_eq!(parse_duration("12h"), Some(Duration::hours(12)));
        assert_eq!(parse_duration("30m"), Some(Duration::minutes(30)));
        assert_eq!(parse_duration("7d"), Some(Duration::days(7)));
        assert_eq!(parse_duration("3600"), Some(Duration::seconds(3600)));
    }

    #[test]
    fn rejects_garbage_durations() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("h"), None);
        assert_eq!(parse_duration("12w"), None);
        assert_eq!(parse_duration("-5m"), None);
    }

    #[test]
    fn splits_origin_list() {
        let origins = parse_origins(" https://shop.example , ,https://*.vercel.app");
        assert_eq!(origins, vec!["https://shop.example", "https://*.vercel.app"]);
    }
}
