use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, Credentials};
use crate::models::DiagnosticRecord;
use crate::services::{RouterError, RouterResult, SignalSource};

const LOGIN_PATH: &str = "/login/";
const SUBMIT_LOGIN_PATH: &str = "/submitLogin/";
const DIAGNOSTICS_PATH: &str = "/diagnostics/";

/// Admin panel URLs for one router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterEndpoints {
    pub login: String,
    pub submit_login: String,
    pub diagnostics: String,
}

impl RouterEndpoints {
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            login: format!("{base}{LOGIN_PATH}"),
            submit_login: format!("{base}{SUBMIT_LOGIN_PATH}"),
            diagnostics: format!("{base}{DIAGNOSTICS_PATH}"),
        }
    }
}

/// HTTP client state carrying the router's session cookie.
///
/// A new session starts with an empty cookie jar, so replacing it is enough to
/// forget a previous login.
pub struct RouterSession {
    pub(crate) client: Client,
}

impl RouterSession {
    pub fn new(timeout: Duration) -> RouterResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(RouterError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Fetch a token and log in with it on this session.
    pub async fn login(
        &self,
        endpoints: &RouterEndpoints,
        credentials: &Credentials,
    ) -> RouterResult<()> {
        let token = self.fetch_token(&endpoints.login).await?;
        self.authenticate(&endpoints.submit_login, &credentials.password, &token)
            .await
    }
}

/// Owns the one live session and re-creates it on demand.
pub struct RouterClient {
    endpoints: RouterEndpoints,
    credentials: Credentials,
    timeout: Duration,
    session: Option<RouterSession>,
}

impl RouterClient {
    pub fn new(endpoints: RouterEndpoints, credentials: Credentials, timeout: Duration) -> Self {
        Self {
            endpoints,
            credentials,
            timeout,
            session: None,
        }
    }

    pub fn from_config(config: &AppConfig, credentials: Credentials) -> Self {
        Self::new(
            RouterEndpoints::from_base(&config.router.base_url),
            credentials,
            Duration::from_secs(config.http.timeout_secs),
        )
    }

    pub fn endpoints(&self) -> &RouterEndpoints {
        &self.endpoints
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

#[async_trait]
impl SignalSource for RouterClient {
    async fn connect(&mut self) -> RouterResult<()> {
        self.session = None;

        debug!(user = %self.credentials.username, "Starting admin login");
        let session = RouterSession::new(self.timeout)?;
        if let Err(e) = session.login(&self.endpoints, &self.credentials).await {
            warn!("Admin login failed, check errors before lockout: {}", e);
            return Err(e);
        }

        info!("Admin session established");
        self.session = Some(session);
        Ok(())
    }

    async fn poll(&mut self, fields: &[String]) -> RouterResult<DiagnosticRecord> {
        let session = self.session.as_ref().ok_or(RouterError::NoSession)?;
        session.poll(&self.endpoints.diagnostics, fields).await
    }
}
