use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub base_path: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let base_path =
            std::env::var("MOVIES_BASE_PATH").unwrap_or_else(|_| "/api/movies".to_string());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            base_path: normalize_base_path(&base_path),
        })
    }
}

/// Leading slash, no trailing slash. An empty or bare `/` path mounts at `/movies`.
pub fn normalize_base_path(raw: &str) -> String {
    let cleaned = raw.trim().trim_matches('/');
    if cleaned.is_empty() {
        return "/movies".to_string();
    }
    format!("/{cleaned}")
}
