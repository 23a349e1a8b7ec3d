// SDN controller HTTP client
//
// Wraps `reqwest::Client` with VAN-specific URL construction and response
// normalization. All endpoint families (net, diag, of) are implemented as
// inherent methods via separate files to keep this module focused on
// transport mechanics.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::addr::{Segment, resource_url};
use crate::auth::{AUTH_HEADER, AuthToken};
use crate::config::ControllerConfig;
use crate::error::Error;

/// Async client for the VAN SDN Controller REST API.
///
/// One instance per controller. Holds a pooled HTTP client carrying the
/// `X-Auth-Token` header and the service root every resource URL is built
/// from. Each operation is an independent request/response round trip
/// with no state shared between calls, so a single instance can be used
/// from many tasks concurrently; cloning is cheap.
#[derive(Clone)]
pub struct SdnClient {
    http: reqwest::Client,
    base: Url,
}

impl SdnClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the controller described by `config`,
    /// authenticating every request with `token`.
    pub fn new(config: &ControllerConfig, token: &AuthToken) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, token.header_value()?);

        let http = config.transport.build_client_with_headers(headers)?;
        let base = config.base_url()?;
        Ok(Self { http, base })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    ///
    /// `base_url` is the service root, e.g. `https://ctl:8443/sdn/v2.0`;
    /// a missing trailing slash is added.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self { http, base })
    }

    /// The service root this client addresses.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a URL under the network service: `{base}/net/{segments...}`
    pub(crate) fn net_url(&self, segments: &[Segment<'_>]) -> Url {
        self.service_url("net", segments)
    }

    /// Build a URL under the diagnostics service: `{base}/diag/{segments...}`
    pub(crate) fn diag_url(&self, segments: &[Segment<'_>]) -> Url {
        self.service_url("diag", segments)
    }

    /// Build a URL under the OpenFlow service: `{base}/of/{segments...}`
    pub(crate) fn of_url(&self, segments: &[Segment<'_>]) -> Url {
        self.service_url("of", segments)
    }

    fn service_url(&self, service: &'static str, segments: &[Segment<'_>]) -> Url {
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push(Segment::Literal(service));
        all.extend_from_slice(segments);
        resource_url(&self.base, &all)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the normalized body into `T`.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        decode(normalize(status, &body)?, &body)
    }

    /// Send a POST request with a JSON body; any 2xx is success.
    pub(crate) async fn post<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        finish_empty(resp).await
    }

    /// Send a bodyless POST; any 2xx is success.
    pub(crate) async fn post_bodyless(&self, url: Url) -> Result<(), Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        finish_empty(resp).await
    }

    /// Send a PUT request with a JSON body; any 2xx is success.
    pub(crate) async fn put<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        finish_empty(resp).await
    }

    /// Send a DELETE request; any 2xx is success.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        finish_empty(resp).await
    }

    /// Send a DELETE request with a JSON body; any 2xx is success.
    ///
    /// The controller deletes flows and observation posts by value, so
    /// those DELETEs carry the same body shape as the matching POST.
    pub(crate) async fn delete_with_body<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).json(body).send().await?;
        finish_empty(resp).await
    }
}

// ── Response normalization ───────────────────────────────────────────

/// Normalize a completed read response.
///
/// Non-2xx statuses become [`Error::RemoteRequest`]. A 2xx body is parsed
/// as JSON; if it is an array, every element is scanned for an in-band
/// `"error"` record (the controller can report success at the HTTP level
/// and still fail per item), which becomes [`Error::RemoteData`].
/// Otherwise the decoded value is returned unchanged.
fn normalize(status: StatusCode, body: &str) -> Result<Value, Error> {
    if !status.is_success() {
        return Err(remote_request_error(status, body));
    }

    let value: Value = serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })?;

    if let Value::Array(items) = &value {
        for item in items {
            if let Some(reason) = item.get("error") {
                return Err(Error::RemoteData {
                    message: match reason {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    },
                });
            }
        }
    }

    Ok(value)
}

/// Outcome rule for mutating operations: any 2xx is unconditional
/// success and the body is never decoded; anything else is normalized to
/// [`Error::RemoteRequest`].
fn expect_empty(status: StatusCode, body: &str) -> Result<(), Error> {
    if status.is_success() {
        Ok(())
    } else {
        Err(remote_request_error(status, body))
    }
}

async fn finish_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    expect_empty(status, &body)
}

#[derive(serde::Deserialize)]
struct RemoteMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Best-effort extraction of the controller's failure message: a JSON
/// `message`/`error` field if the body has one, else the raw text, else
/// the canonical status reason.
fn remote_request_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<RemoteMessage>(body)
        .ok()
        .and_then(|m| m.message.or(m.error))
        .unwrap_or_else(|| {
            let raw = body.trim();
            if raw.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_owned()
            } else {
                raw.to_owned()
            }
        });

    Error::RemoteRequest {
        status: status.as_u16(),
        message,
    }
}

fn decode<T: DeserializeOwned>(value: Value, body: &str) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_array_is_returned_unchanged() {
        let value = normalize(StatusCode::OK, r#"[{"dpid":"1"}]"#).unwrap();
        assert_eq!(value, json!([{ "dpid": "1" }]));
    }

    #[test]
    fn success_object_is_returned_unchanged() {
        let value = normalize(StatusCode::OK, r#"{"dpid":"1","ready":true}"#).unwrap();
        assert_eq!(value, json!({ "dpid": "1", "ready": true }));
    }

    #[test]
    fn in_band_error_record_is_surfaced() {
        let err = normalize(StatusCode::OK, r#"[{"error":"busy"}]"#).unwrap_err();
        assert!(
            matches!(&err, Error::RemoteData { message } if message == "busy"),
            "expected RemoteData, got: {err:?}"
        );
    }

    #[test]
    fn in_band_error_is_found_behind_healthy_items() {
        let body = r#"[{"dpid":"1"},{"error":{"code":17}}]"#;
        let err = normalize(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, Error::RemoteData { .. }));
    }

    #[test]
    fn non_success_status_becomes_remote_request() {
        let err = normalize(StatusCode::INTERNAL_SERVER_ERROR, "boom").unwrap_err();
        match err {
            Error::RemoteRequest { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected RemoteRequest, got: {other:?}"),
        }
    }

    #[test]
    fn remote_message_is_decoded_from_json_bodies() {
        let err = remote_request_error(
            StatusCode::NOT_FOUND,
            r#"{"message":"no such datapath"}"#,
        );
        assert!(
            matches!(&err, Error::RemoteRequest { status: 404, message } if message == "no such datapath")
        );

        let err = remote_request_error(StatusCode::CONFLICT, r#"{"error":"duplicate id"}"#);
        assert!(
            matches!(&err, Error::RemoteRequest { status: 409, message } if message == "duplicate id")
        );
    }

    #[test]
    fn empty_error_body_falls_back_to_status_reason() {
        let err = remote_request_error(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(
            matches!(&err, Error::RemoteRequest { status: 503, message } if message == "Service Unavailable")
        );
    }

    #[test]
    fn mutations_ignore_success_bodies() {
        // Whatever a 2xx carries is irrelevant to a pure mutation.
        expect_empty(StatusCode::OK, r#"[{"error":"ignored"}]"#).unwrap();
        expect_empty(StatusCode::NO_CONTENT, "").unwrap();
        expect_empty(StatusCode::ACCEPTED, "pending").unwrap();
    }

    #[test]
    fn mutations_surface_failure_statuses() {
        let err = expect_empty(StatusCode::NOT_FOUND, "").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn garbage_success_body_is_a_deserialization_error() {
        let err = normalize(StatusCode::OK, "<html>login</html>").unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }
}
