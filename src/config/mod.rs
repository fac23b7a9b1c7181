use config::{Config, ConfigError};
use serde::Deserialize;
use std::env;
use std::fmt;
use validator::Validate;

const DEFAULT_ROUTER_BASE_URL: &str = "http://192.168.1.1";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Diagnostic field ids scraped from the FX2000 status page.
pub const DEFAULT_FIELDS: [&str; 7] = [
    "internetStatus4G",
    "internetStatusTech",
    "band",
    "bandwidth",
    "internetStatusNetworkOperator4G",
    "internetStatus4gRSSI",
    "internetStatusSNR",
];

pub const USERNAME_VAR: &str = "USER";
pub const PASSWORD_VAR: &str = "PASS";

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RouterConfig {
    #[validate(length(min = 1))]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct HttpConfig {
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct PollConfig {
    #[validate(length(min = 1))]
    pub fields: String,
}

impl PollConfig {
    /// Split the comma separated field list, dropping blanks.
    pub fn field_names(&self) -> Vec<String> {
        self.fields
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct LogConfig {
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Admin credentials. Only the password takes part in the login handshake.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        match (env::var(USERNAME_VAR), env::var(PASSWORD_VAR)) {
            (Ok(username), Ok(password)) => Ok(Self { username, password }),
            _ => Err(ConfigError::Message(format!(
                "{USERNAME_VAR} and {PASSWORD_VAR} environment variables must be set for admin authentication"
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub router: RouterConfig,
    #[validate(nested)]
    pub http: HttpConfig,
    #[validate(nested)]
    pub poll: PollConfig,
    #[validate(nested)]
    pub log: LogConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let s = Config::builder()
            .set_default("router.base_url", DEFAULT_ROUTER_BASE_URL)?
            .set_default("http.timeout_secs", DEFAULT_HTTP_TIMEOUT_SECS)?
            .set_default("poll.fields", DEFAULT_FIELDS.join(","))?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = s.try_deserialize()?;

        if let Err(e) = config.validate() {
            return Err(ConfigError::Message(format!("Validation error: {}", e)));
        }

        if config.poll.field_names().is_empty() {
            return Err(ConfigError::Message(
                "APP_POLL__FIELDS must name at least one diagnostic field".into(),
            ));
        }

        Ok(config)
    }
}
