use reqwest::StatusCode;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::services::extract::find_secure_token;
use crate::services::{RouterError, RouterResult, RouterSession};

/// Hex SHA-1 of `password` immediately followed by `token`.
pub fn hash_password(password: &str, token: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

impl RouterSession {
    /// GET the login page and pull the `gSecureToken` value out of it.
    pub async fn fetch_token(&self, login_url: &str) -> RouterResult<String> {
        let response = self
            .client
            .get(login_url)
            .send()
            .await
            .map_err(|source| RouterError::Network {
                step: "login GET",
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Unexpected response from login GET: {}", status);
            return Err(RouterError::UnexpectedStatus {
                step: "login GET",
                status,
            });
        }

        let body = response.text().await.map_err(|source| RouterError::Network {
            step: "login GET",
            source,
        })?;

        match find_secure_token(&body) {
            Some(token) => {
                debug!(token_len = token.len(), "Login token found");
                Ok(token.to_string())
            }
            None => {
                warn!("gSecureToken marker missing from login page");
                Err(RouterError::TokenNotFound)
            }
        }
    }

    /// POST the salted password hash.
    ///
    /// Only the status code is checked: the router answers 200 even when it
    /// rejects the password, so success here does not prove the login worked.
    pub async fn authenticate(
        &self,
        submit_url: &str,
        password: &str,
        token: &str,
    ) -> RouterResult<()> {
        if password.is_empty() || token.is_empty() {
            warn!(
                "password length {} and token length {} must be greater than 0",
                password.len(),
                token.len()
            );
            return Err(RouterError::EmptyCredentials {
                password_len: password.len(),
                token_len: token.len(),
            });
        }

        let sha_password = hash_password(password, token);
        let response = self
            .client
            .post(submit_url)
            .form(&[("shaPassword", sha_password.as_str()), ("gSecureToken", token)])
            .send()
            .await
            .map_err(|source| RouterError::Network {
                step: "login POST",
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Unexpected response from login POST: {}", status);
            return Err(RouterError::UnexpectedStatus {
                step: "login POST",
                status,
            });
        }

        Ok(())
    }
}
