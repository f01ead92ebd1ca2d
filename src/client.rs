//! Authenticated HTTP client for the Siigo REST API.
//!
//! Every request goes through [`SiigoClient::request`], which makes sure a
//! valid bearer token is cached before the call and attaches the fixed
//! identifying headers. The token is exchanged lazily and refreshed only once
//! its recorded expiry has passed.

use core::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::{ClientError, error_chain};
use crate::response::Envelope;

/// Path of the credential exchange endpoint.
const AUTH_PATH: &str = "/auth";

/// Header identifying the integrating application.
const PARTNER_ID_HEADER: &str = "Partner-Id";

/// Per-request timeout; report generation upstream can be slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A cached bearer token and the instant it stops being usable.
#[derive(Clone)]
pub(crate) struct Credential {
    /// Bearer token value.
    token: String,
    /// Expiry instant; the token is not used at or after this point.
    expires_at: DateTime<Utc>,
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Credential {
    /// Creates a credential valid until `expires_at`.
    pub(crate) const fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// Whether the credential may still be used at `now`.
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Holder of the single cached credential.
///
/// The lock is held across the whole check-and-refresh sequence so
/// concurrent callers wait for one exchange instead of each starting their own.
#[derive(Debug, Default)]
pub(crate) struct Session {
    /// Current credential, if any.
    credential: Mutex<Option<Credential>>,
}

impl Session {
    /// Creates a session pre-seeded with `credential`.
    #[cfg(test)]
    pub(crate) fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }
}

/// Body of the credential exchange request.
#[derive(Serialize)]
struct AuthRequest<'req> {
    /// API user name.
    username: &'req str,
    /// API access key.
    access_key: &'req str,
}

/// Successful credential exchange reply.
#[derive(Deserialize)]
struct AuthResponse {
    /// Bearer token.
    access_token: String,
    /// Token lifetime in seconds.
    expires_in: i64,
    /// Granted scope, logged only.
    #[serde(default)]
    scope: Option<String>,
}

/// One outbound API call, before authentication headers are attached.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    /// HTTP method.
    pub(crate) method: Method,
    /// Path below the base URL, starting with `/`.
    pub(crate) path: String,
    /// Query string pairs.
    pub(crate) query: Vec<(String, String)>,
    /// JSON body, if any.
    pub(crate) body: Option<Value>,
    /// Extra request headers.
    pub(crate) headers: Vec<(&'static str, String)>,
}

impl ApiRequest {
    /// Creates a request with no query, body or extra headers.
    pub(crate) const fn new(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }
}

/// Client for the Siigo API with lazy token management.
pub(crate) struct SiigoClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// API user name.
    username: String,
    /// API access key.
    access_key: String,
    /// `Partner-Id` header value.
    partner_id: String,
    /// Token cache.
    session: Session,
}

impl core::fmt::Debug for SiigoClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SiigoClient")
            .field("base_url", &self.base_url)
            .field("partner_id", &self.partner_id)
            .finish_non_exhaustive()
    }
}

impl SiigoClient {
    /// Creates a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub(crate) fn new(config: &Config) -> Result<Self, ClientError> {
        Self::with_session(config, Session::default())
    }

    /// Creates a client that starts from an existing session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub(crate) fn with_session(config: &Config, session: Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ClientError::transport(&err))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            username: config.username.clone(),
            access_key: config.access_key.clone(),
            partner_id: config.partner_id.clone(),
            session,
        })
    }

    /// Returns a usable bearer token, exchanging credentials first when no
    /// token is cached or the cached one has expired.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] if the exchange fails. Nothing
    /// is cached in that case, so the next call tries again.
    pub(crate) async fn ensure_authenticated(&self) -> Result<String, ClientError> {
        let mut cached = self.session.credential.lock().await;
        if let Some(credential) = cached.as_ref() {
            if credential.is_valid_at(Utc::now()) {
                return Ok(credential.token.clone());
            }
            tracing::debug!(expired_at = %credential.expires_at, "cached token expired");
        }

        let credential = self.exchange_credentials().await?;
        let token = credential.token.clone();
        *cached = Some(credential);
        Ok(token)
    }

    /// Performs the credential exchange against the auth endpoint.
    async fn exchange_credentials(&self) -> Result<Credential, ClientError> {
        tracing::info!("requesting Siigo access token");
        let url = format!("{}{AUTH_PATH}", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(PARTNER_ID_HEADER, &self.partner_id)
            .json(&AuthRequest {
                username: &self.username,
                access_key: &self.access_key,
            })
            .send()
            .await
            .map_err(|err| ClientError::Authentication(error_chain(&err)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ClientError::Authentication(error_chain(&err)))?;
        if !status.is_success() {
            return Err(ClientError::Authentication(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let auth: AuthResponse = serde_json::from_str(&text).map_err(|err| {
            ClientError::Authentication(format!("malformed token response: {err}"))
        })?;
        let issued_at = Utc::now();
        let expires_at = TimeDelta::try_seconds(auth.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ClientError::Authentication(format!(
                    "token lifetime out of range: {}",
                    auth.expires_in
                ))
            })?;
        tracing::info!(
            %expires_at,
            scope = auth.scope.as_deref().unwrap_or(""),
            "access token acquired"
        );
        Ok(Credential::new(auth.access_token, expires_at))
    }

    /// Sends one API request and returns the reply body.
    ///
    /// A non-2xx reply with a JSON object body is returned as `Ok` so the
    /// caller can read upstream error codes. An empty 2xx body becomes `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] if no token can be obtained,
    /// [`ClientError::Transport`] on network failure, and
    /// [`ClientError::UnexpectedResponse`] when the reply is not JSON.
    pub(crate) async fn request(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let token = self.ensure_authenticated().await?;
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .bearer_auth(token)
            .header(PARTNER_ID_HEADER, &self.partner_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ClientError::transport(&err))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ClientError::transport(&err))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            return serde_json::from_str(&text).map_err(|err| ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body: format!("invalid JSON: {err}"),
            });
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(body) if body.is_object() => {
                let envelope = Envelope::inspect(&body);
                tracing::warn!(
                    status = status.as_u16(),
                    path = %request.path,
                    errors = %envelope.error_summary(),
                    "upstream returned an error"
                );
                Ok(body)
            }
            Ok(_) | Err(_) => Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::panic,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "test code uses expect and panics on unexpected variants"
)]
pub(crate) mod tests {
    use chrono::{TimeDelta, Utc};
    use reqwest::Method;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{ApiRequest, Credential, Session, SiigoClient};
    use crate::config::Config;
    use crate::error::ClientError;

    pub(crate) fn test_config(base_url: &str) -> Config {
        Config {
            username: "api@example.com".to_owned(),
            access_key: "secret-key".to_owned(),
            partner_id: "TestPartner".to_owned(),
            base_url: base_url.to_owned(),
        }
    }

    /// Mounts a token endpoint that must be hit exactly `times` times.
    pub(crate) async fn mount_auth(server: &MockServer, times: u64) {
        Mock::given(method("POST"))
            .and(path("/auth"))
            .and(header("Partner-Id", "TestPartner"))
            .and(body_json(json!({
                "username": "api@example.com",
                "access_key": "secret-key"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-token",
                "expires_in": 86_400,
                "token_type": "Bearer",
                "scope": "Siigo API"
            })))
            .expect(times)
            .mount(server)
            .await;
    }

    fn get(path: &str) -> ApiRequest {
        ApiRequest::new(Method::GET, path.to_owned())
    }

    #[tokio::test]
    async fn first_request_exchanges_credentials_once() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/taxes"))
            .and(header("Authorization", "Bearer fresh-token"))
            .and(header("Partner-Id", "TestPartner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 13156}])))
            .expect(2)
            .mount(&server)
            .await;

        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let first = client.request(get("/v1/taxes")).await.expect("first call");
        let second = client.request(get("/v1/taxes")).await.expect("second call");
        assert_eq!(first, json!([{"id": 13156}]));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn valid_cached_credential_skips_exchange() {
        let server = MockServer::start().await;
        mount_auth(&server, 0).await;
        Mock::given(method("GET"))
            .and(path("/v1/users"))
            .and(header("Authorization", "Bearer cached-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::with_credential(Credential::new(
            "cached-token".to_owned(),
            Utc::now() + TimeDelta::hours(1),
        ));
        let client =
            SiigoClient::with_session(&test_config(&server.uri()), session).expect("client");
        let body = client.request(get("/v1/users")).await.expect("call");
        assert_eq!(body, json!({"results": []}));
    }

    #[tokio::test]
    async fn expired_credential_is_refreshed() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/users"))
            .and(header("Authorization", "Bearer fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::with_credential(Credential::new(
            "stale-token".to_owned(),
            Utc::now() - TimeDelta::seconds(1),
        ));
        let client =
            SiigoClient::with_session(&test_config(&server.uri()), session).expect("client");
        let _body = client.request(get("/v1/users")).await.expect("call");
        let token = client.ensure_authenticated().await.expect("token");
        assert_eq!(token, "fresh-token");
    }

    #[tokio::test]
    async fn concurrent_first_calls_share_one_exchange() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let (left, right) =
            tokio::join!(client.ensure_authenticated(), client.ensure_authenticated());
        assert_eq!(left.expect("left"), "fresh-token");
        assert_eq!(right.expect("right"), "fresh-token");
    }

    #[tokio::test]
    async fn rejected_credentials_raise_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "Errors": [{
                    "Code": "invalid_credentials",
                    "Message": "Invalid username or access_key"
                }]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let first = client.request(get("/v1/taxes")).await;
        match first {
            Err(ClientError::Authentication(detail)) => {
                assert!(detail.contains("401"));
                assert!(detail.contains("invalid_credentials"));
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
        // Nothing was cached, so the next call tries again.
        let second = client.request(get("/v1/taxes")).await;
        assert!(matches!(second, Err(ClientError::Authentication(_))));
    }

    #[tokio::test]
    async fn malformed_token_reply_is_an_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let result = client.ensure_authenticated().await;
        match result {
            Err(ClientError::Authentication(detail)) => assert!(detail.contains("malformed")),
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn structured_upstream_error_is_returned_as_data() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        let error_body = json!({
            "Errors": [{
                "Code": "already_exists",
                "Message": "The code already exists",
                "Params": ["code"]
            }],
            "Status": 400
        });
        Mock::given(method("POST"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body.clone()))
            .mount(&server)
            .await;

        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let mut request = ApiRequest::new(Method::POST, "/v1/products".to_owned());
        request.body = Some(json!({"code": "P1"}));
        let body = client.request(request).await.expect("structured error is not raised");
        assert_eq!(body, error_body);
    }

    #[tokio::test]
    async fn non_json_error_reply_is_raised() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/taxes"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let result = client.request(get("/v1/taxes")).await;
        match result {
            Err(ClientError::UnexpectedResponse { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("expected unexpected-response error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_raises_with_underlying_message() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let session = Session::with_credential(Credential::new(
            "cached-token".to_owned(),
            Utc::now() + TimeDelta::hours(1),
        ));
        let client = SiigoClient::with_session(&test_config(&format!("http://{addr}")), session)
            .expect("client");
        let result = client.request(get("/v1/taxes")).await;
        match result {
            Err(ClientError::Transport(message)) => {
                assert!(message.contains("error sending request"), "{message}");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_success_body_becomes_empty_object() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("DELETE"))
            .and(path("/v1/products/abc"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let body = client
            .request(ApiRequest::new(Method::DELETE, "/v1/products/abc".to_owned()))
            .await
            .expect("delete");
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn query_and_extra_headers_are_forwarded() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "50"))
            .and(header("X-Trace", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = SiigoClient::new(&test_config(&server.uri())).expect("client");
        let mut request = get("/v1/products");
        request.query = vec![
            ("page".to_owned(), "2".to_owned()),
            ("page_size".to_owned(), "50".to_owned()),
        ];
        request.headers = vec![("X-Trace", "abc".to_owned())];
        let _body = client.request(request).await.expect("call");
    }

    #[test]
    fn credential_debug_redacts_token() {
        let credential = Credential::new("very-secret".to_owned(), Utc::now());
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("very-secret"));
    }
}
