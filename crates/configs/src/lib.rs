use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub meals: MealsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Settings for the meal store and the active-user context.
#[derive(Debug, Clone, Deserialize)]
pub struct MealsConfig {
    #[serde(default = "default_auth_user_id")]
    pub auth_user_id: i32,
    #[serde(default = "default_calories_per_day")]
    pub calories_per_day: i32,
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for MealsConfig {
    fn default() -> Self {
        Self {
            auth_user_id: default_auth_user_id(),
            calories_per_day: default_calories_per_day(),
            seed: default_seed(),
        }
    }
}

fn default_auth_user_id() -> i32 { 1 }
fn default_calories_per_day() -> i32 { 2000 }
fn default_seed() -> bool { true }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
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
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like [`AppConfig::load_and_validate`], but a missing file falls back to
    /// defaults. Environment overrides are applied either way.
    pub fn load_or_env() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.meals.validate()?;
        Ok(())
    }

    /// Overlay `SERVER_HOST`, `SERVER_PORT`, `AUTH_USER_ID` and `CALORIES_PER_DAY`.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT") {
            self.server.port = port;
        }
        if let Some(id) = env_parse::<i32>("AUTH_USER_ID") {
            self.meals.auth_user_id = id;
        }
        if let Some(norm) = env_parse::<i32>("CALORIES_PER_DAY") {
            self.meals.calories_per_day = norm;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl MealsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.auth_user_id <= 0 {
            return Err(anyhow!("meals.auth_user_id must be a positive user id"));
        }
        if self.calories_per_day <= 0 {
            return Err(anyhow!("meals.calories_per_day must be > 0"));
        }
        Ok(())
    }
}
