// Token acquisition for the controller's auth service.
//
// The rest of the crate only needs an [`AuthToken`]; how it was obtained
// is the caller's business. `authenticate`/`revoke` cover the common case
// of username/password login against `/sdn/v2.0/auth`.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::addr::{Segment, resource_url};
use crate::config::ControllerConfig;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Header carrying the token on every authenticated request.
pub(crate) const AUTH_HEADER: &str = "X-Auth-Token";

/// An authentication token for the controller.
///
/// Wraps the secret so it never shows up in `Debug` output or logs.
/// Tokens obtained elsewhere (e.g. from a vault) can be wrapped directly
/// with [`AuthToken::new`].
#[derive(Debug, Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The sensitive `X-Auth-Token` header value.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, Error> {
        let mut value =
            HeaderValue::from_str(self.0.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<SecretString> for AuthToken {
    fn from(token: SecretString) -> Self {
        Self(token)
    }
}

#[derive(serde::Deserialize)]
struct TokenEnvelope {
    record: TokenRecord,
}

#[derive(serde::Deserialize)]
struct TokenRecord {
    token: String,
}

/// Log in with username and password and return a fresh token.
pub async fn authenticate(
    config: &ControllerConfig,
    user: &str,
    password: &SecretString,
) -> Result<AuthToken, Error> {
    authenticate_at(&config.base_url()?, &config.transport, user, password).await
}

/// Like [`authenticate`], against an explicit service root.
pub async fn authenticate_at(
    base: &Url,
    transport: &TransportConfig,
    user: &str,
    password: &SecretString,
) -> Result<AuthToken, Error> {
    let http = transport.build_client()?;
    let url = resource_url(base, &[Segment::Literal("auth")]);
    debug!("POST {url}");

    let body = json!({
        "login": { "user": user, "password": password.expose_secret() }
    });
    let resp = http.post(url).json(&body).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Authentication {
            message: format!("login rejected (HTTP {})", status.as_u16()),
        });
    }

    let envelope: TokenEnvelope = resp.json().await.map_err(|e| Error::Authentication {
        message: format!("malformed token response: {e}"),
    })?;
    Ok(AuthToken::new(envelope.record.token))
}

/// Invalidate a token on the controller.
pub async fn revoke(config: &ControllerConfig, token: &AuthToken) -> Result<(), Error> {
    revoke_at(&config.base_url()?, &config.transport, token).await
}

/// Like [`revoke`], against an explicit service root.
pub async fn revoke_at(
    base: &Url,
    transport: &TransportConfig,
    token: &AuthToken,
) -> Result<(), Error> {
    let http = transport.build_client()?;
    let url = resource_url(base, &[Segment::Literal("auth"), Segment::Id(token.expose())]);
    // The URL embeds the token, so it stays out of the logs.
    debug!("revoking auth token");

    let resp = http
        .delete(url)
        .header(AUTH_HEADER, token.header_value()?)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Authentication {
            message: format!("token revocation rejected (HTTP {})", status.as_u16()),
        });
    }
    Ok(())
}
