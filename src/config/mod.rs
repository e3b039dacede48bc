use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::i18n::Locale;

// Адрес для эмулятора (10.0.2.2 - хост-машина) и адрес после деплоя
pub const LOCAL_API_URL: &str = "http://10.0.2.2:8000/api_root/Seat/";
pub const HOSTED_API_URL: &str = "https://yunmee2765.pythonanywhere.com/api_root/Seat/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub poller: PollerConfig,
    pub ui: UiConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_log: String,
    pub log_file: String,
    pub log_format: LogFormat,
    pub ui_mode: UiMode,
}

// Настройки сервера с местами
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub environment: ApiEnvironment,
    pub url: String,
    pub timeout_secs: u64,
}

// Настройки опроса
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval_ms: u64,
    pub skip_when_busy: bool,
}

// Настройки отображения
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub locale: Locale,
    pub cell_width: u16,
    pub notice_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEnvironment {
    Local,
    Hosted,
}

impl ApiEnvironment {
    pub fn default_url(self) -> &'static str {
        match self {
            ApiEnvironment::Local => LOCAL_API_URL,
            ApiEnvironment::Hosted => HOSTED_API_URL,
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "emulator" => Ok(ApiEnvironment::Local),
            "hosted" | "production" => Ok(ApiEnvironment::Hosted),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Tui,
    Headless,
}

impl FromStr for UiMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tui" => Ok(UiMode::Tui),
            "headless" => Ok(UiMode::Headless),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl UiConfig {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Собирает конфиг из произвольного источника переменных (в тестах - из HashMap).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let environment: ApiEnvironment = parse_var(&lookup, "API_ENVIRONMENT", "local", "local or hosted")?;
        let url = lookup("SEAT_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| environment.default_url().to_string());

        let interval_ms: u64 = parse_var(&lookup, "POLL_INTERVAL_MS", "5000", "a number of milliseconds")?;
        if interval_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "POLL_INTERVAL_MS",
                value: "0".to_string(),
                expected: "greater than zero",
            });
        }

        let cell_width: u16 = parse_var(&lookup, "GRID_CELL_WIDTH", "6", "a number of columns")?;
        if cell_width < 3 {
            return Err(ConfigError::Invalid {
                name: "GRID_CELL_WIDTH",
                value: cell_width.to_string(),
                expected: "at least 3",
            });
        }

        Ok(Config {
            app: AppConfig {
                rust_log: var("RUST_LOG", "seat_monitor=info"),
                log_file: var("LOG_FILE", "seat_monitor.log"),
                log_format: parse_var(&lookup, "LOG_FORMAT", "pretty", "pretty or json")?,
                ui_mode: parse_var(&lookup, "UI_MODE", "tui", "tui or headless")?,
            },
            api: ApiConfig {
                environment,
                url,
                timeout_secs: parse_var(&lookup, "API_TIMEOUT_SECS", "10", "a number of seconds")?,
            },
            poller: PollerConfig {
                interval_ms,
                skip_when_busy: parse_var(&lookup, "POLL_SKIP_WHEN_BUSY", "false", "true or false")?,
            },
            ui: UiConfig {
                locale: parse_var(&lookup, "LOCALE", "ko", "ko or en")?,
                cell_width,
                notice_ms: parse_var(&lookup, "NOTICE_MS", "2000", "a number of milliseconds")?,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: &str, expected: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value, expected })
}
