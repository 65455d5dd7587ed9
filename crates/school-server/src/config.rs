use std::env;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expires_in: i64,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expires_in: env::var("JWT_EXPIRES_IN")
                .unwrap_or_else(|_| "86400".to_string()) // 1 day
                .parse()
                .context("JWT_EXPIRES_IN must be a number of seconds")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "static/uploads".to_string())
                .into(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "16777216".to_string()) // 16 MiB
                .parse()
                .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
            seed_on_start: env::var("SEED_ON_START")
                .map(|v| !matches!(v.as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        })
    }

    /// Settings for tests and local runs without a database.
    pub fn for_testing(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            database_url: String::new(),
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in: 900,
            port: 0,
            upload_dir: upload_dir.into(),
            max_upload_bytes: 1024 * 1024,
            seed_on_start: true,
        }
    }
}
