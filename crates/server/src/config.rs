use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tracing::warn;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub upstream_url: String,
    pub api_key: String,
    pub manifest_max_date: NaiveDate,
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            upstream_url: "https://api.nasa.gov/mars-photos/api/v1".into(),
            api_key: "DEMO_KEY".into(),
            manifest_max_date: NaiveDate::from_ymd_opt(2022, 3, 5).unwrap_or_default(),
            static_dir: PathBuf::from("./public"),
        }
    }
}

/// Defaults, then `server.toml` in the working directory, then the environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let file = fs::read_to_string("server.toml").ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    let mut max_date: Option<String> = None;

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("upstream_url") {
                    settings.upstream_url = v.clone();
                }
                if let Some(v) = file_cfg.get("api_key") {
                    settings.api_key = v.clone();
                }
                if let Some(v) = file_cfg.get("manifest_max_date") {
                    max_date = Some(v.clone());
                }
                if let Some(v) = file_cfg.get("static_dir") {
                    settings.static_dir = PathBuf::from(v);
                }
            }
            Err(error) => warn!(%error, "ignoring unreadable server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("NASA_API_URL") {
        settings.upstream_url = v;
    }
    if let Some(v) = env("APP__UPSTREAM_URL") {
        settings.upstream_url = v;
    }

    if let Some(v) = env("API_KEY") {
        settings.api_key = v;
    }
    if let Some(v) = env("APP__API_KEY") {
        settings.api_key = v;
    }

    if let Some(v) = env("APP__MANIFEST_MAX_DATE") {
        max_date = Some(v);
    }

    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = PathBuf::from(v);
    }

    if let Some(raw) = max_date {
        settings.manifest_max_date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .with_context(|| format!("manifest_max_date '{raw}' is not a YYYY-MM-DD date"))?;
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
