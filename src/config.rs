use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_base: get_env_or_default("APPSENSE_API_BASE", "http://localhost:8000"),
        ui_bind: get_env_or_default("APPSENSE_UI_BIND", "127.0.0.1:3000"),
        static_dir: get_env_or_default("APPSENSE_STATIC_DIR", "static"),
        max_results: get_env_opt("APPSENSE_MAX_RESULTS").and_then(|raw| parse_max_results(&raw)),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the search API, e.g. `http://localhost:8000`.
    pub api_base: String,
    pub ui_bind: String,
    pub static_dir: String,
    /// Forwarded as `max_results` when set. The API picks its own default otherwise.
    pub max_results: Option<u32>,
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_env_opt(key).unwrap_or_else(|| default.to_string())
}

pub fn parse_max_results(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => {
            tracing::warn!(value = raw, "ignoring invalid APPSENSE_MAX_RESULTS");
            None
        }
        Ok(n) => Some(n),
    }
}

#[test]
fn test_parse_max_results() {
    assert_eq!(parse_max_results("10"), Some(10));
    assert_eq!(parse_max_results(" 25 "), Some(25));
    assert_eq!(parse_max_results("0"), None);
    assert_eq!(parse_max_results("-3"), None);
    assert_eq!(parse_max_results("ten"), None);
}
