use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply the schema migrations on startup.
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    30
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_max_lifetime() -> u64 {
    3600
}
fn default_acquire_timeout() -> u64 {
    30
}
fn default_auto_migrate() -> bool {
    true
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// `config.toml` (or `CONFIG_PATH`) when the file exists, otherwise
    /// [`AppConfig::from_env`].
    pub fn load_or_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load_path_or_env(&config_path())
    }

    /// Only a missing file falls back to the environment; a file that cannot
    /// be read, parsed or validated is an error.
    pub fn load_path_or_env(path: &str) -> Result<Self> {
        match load_from_file(path) {
            Ok(mut cfg) => {
                cfg.normalize_and_validate()
                    .with_context(|| format!("invalid config file {path}"))?;
                Ok(cfg)
            }
            Err(err) if is_not_found(&err) => Self::from_env(),
            Err(err) => Err(err.context(format!("failed to load config file {path}"))),
        }
    }

    /// Config built purely from the environment, for deployments without a TOML file.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = AppConfig {
            database: DatabaseConfig {
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
                connect_timeout_secs: default_connect_timeout(),
                idle_timeout_secs: default_idle_timeout(),
                max_lifetime_secs: default_max_lifetime(),
                acquire_timeout_secs: default_acquire_timeout(),
                auto_migrate: default_auto_migrate(),
                ..Default::default()
            },
            logging: LoggingConfig::default(),
        };
        if let Ok(fmt) = std::env::var("LOG_FORMAT") {
            cfg.logging.format = match fmt.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Compact,
            };
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; DATABASE_URL only fills a missing url
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml_with_defaults() {
        let cfg = parse("[database]\nurl = \"postgres://u:p@localhost/school_admin\"\n").unwrap();
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.min_connections, 2);
        assert!(cfg.database.auto_migrate);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        assert!(cfg.database.validate().is_ok());
    }

    #[test]
    fn parses_json_log_format() {
        let cfg = parse("[database]\nurl = \"sqlite::memory:\"\n[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let cfg = parse("[database]\nurl = \"mysql://localhost/db\"\n").unwrap();
        assert!(cfg.database.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let cfg = parse(
            "[database]\nurl = \"sqlite::memory:\"\nmax_connections = 1\nmin_connections = 4\n",
        )
        .unwrap();
        let err = cfg.database.validate().unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }

    // The only test in this crate that touches process env vars.
    #[test]
    fn missing_file_falls_back_to_env_but_broken_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("DATABASE_URL", "sqlite::memory:");

        let absent = dir.path().join("absent.toml");
        let cfg = AppConfig::load_path_or_env(absent.to_str().unwrap()).unwrap();
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 10);
        assert!(cfg.database.auto_migrate);

        let bad_scheme = dir.path().join("bad_scheme.toml");
        std::fs::write(&bad_scheme, "[database]\nurl = \"mysql://oops/db\"\n").unwrap();
        let err = AppConfig::load_path_or_env(bad_scheme.to_str().unwrap()).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("invalid config file"), "{chain}");
        assert!(chain.contains("must start with"), "{chain}");

        let inverted = dir.path().join("inverted.toml");
        std::fs::write(
            &inverted,
            "[database]\nurl = \"sqlite::memory:\"\nmax_connections = 1\nmin_connections = 3\n",
        )
        .unwrap();
        assert!(AppConfig::load_path_or_env(inverted.to_str().unwrap()).is_err());

        let syntax = dir.path().join("syntax.toml");
        std::fs::write(&syntax, "[database\nurl = ").unwrap();
        let err = AppConfig::load_path_or_env(syntax.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load config file"));
    }

    #[test]
    fn missing_file_is_recognised_through_anyhow() {
        let err = load_from_file("/definitely/not/here/config.toml").unwrap_err();
        assert!(is_not_found(&err));
        assert!(!is_not_found(&anyhow!("something else")));
    }

    #[test]
    fn empty_url_is_rejected() {
        let cfg = DatabaseConfig { min_connections: 1, max_connections: 1, connect_timeout_secs: 1, acquire_timeout_secs: 1, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
