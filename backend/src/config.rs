//! Environment-driven configuration.
//!
//! Values come from the process environment (a `.env` file is loaded in
//! `main` before this runs), with defaults that make a bare `cargo run`
//! work against a local database file.

use std::env;

use tracing::warn;

pub const APP_NAME: &str = "Bookshelf REST API";
pub const APP_DESC: &str = "Boilerplate REST API with axum and a JSON document store";

const DEFAULT_DATABASE_URL: &str = "sqlite:bookshelf.db";
const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub app_desc: String,
    pub database_url: String,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from `DATABASE_URL` and `PORT`, falling back
    /// to defaults when unset or unparseable.
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let port: u16 = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(%raw, default = DEFAULT_PORT, "PORT is not a number, using default");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Self {
            app_name: APP_NAME.to_string(),
            app_desc: APP_DESC.to_string(),
            database_url,
            port,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            app_desc: APP_DESC.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
