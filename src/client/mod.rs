//! Client layer: configuration, the HTTP seam, and request orchestration.

mod config;
mod mapper;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use url::Url;

use crate::domain::{
    ErrorList, ErrorRecord, OtpCode, RawResponse, SEND_OTP_PATH, SEND_SMS_PATH, SendOtp,
    SendOutcome, SendSms, TransportErrorKind, ValidationError,
};

pub use config::{
    API_URL_ENV, Config, ConfigError, DEFAULT_API_URL, PASS_KEY_ENV, USER_KEY_ENV,
    ValidatedConfig,
};

/// Connection-establishment timeout applied by the default transport.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// HTTP response as seen by the client: status code and body text.
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
/// The transport could not produce an HTTP response.
pub struct TransportFailure {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportFailure {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };
        // reqwest includes the full URL, credentials included, in its Display.
        Self::new(kind, err.without_url().to_string())
    }
}

/// HTTP capability the client needs: one GET with query parameters.
///
/// The default implementation is backed by `reqwest`; tests and callers with
/// their own HTTP stack can supply another one through
/// [`ZenzivaClient::with_transport`].
pub trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a Url,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a Url,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let mut url = url.clone();
            url.query_pairs_mut().extend_pairs(&params);

            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(TransportFailure::from_reqwest)?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(TransportFailure::from_reqwest)?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ZenzivaClient`] before a request reaches the gateway.
///
/// Gateway-side failures (transport errors, HTTP errors, provider rejections,
/// malformed bodies) are not returned here: they are recorded in
/// [`ZenzivaClient::errors`] and the call yields [`SendOutcome::Failed`].
pub enum ZenzivaError {
    /// API URL or credentials are missing or unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The destination number or OTP code was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The HTTP client could not be constructed.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
/// Builder for [`ZenzivaClient`].
///
/// Use this when you need to customize timeouts or the user-agent.
pub struct ZenzivaClientBuilder {
    config: Config,
    connect_timeout: Duration,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for ZenzivaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZenzivaClientBuilder {
    /// Default API URL, no credentials, 500 ms connect timeout.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: None,
            user_agent: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.config.set_api_url(api_url);
        self
    }

    pub fn user_key(mut self, user_key: impl Into<String>) -> Self {
        self.config.set_user_key(user_key);
        self
    }

    pub fn pass_key(mut self, pass_key: impl Into<String>) -> Self {
        self.config.set_pass_key(pass_key);
        self
    }

    /// Override the connection-establishment timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`ZenzivaClient`]. Credentials are checked on the first request.
    pub fn build(self) -> Result<ZenzivaClient, ZenzivaError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.connect_timeout);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(ZenzivaError::Transport)?;

        Ok(ZenzivaClient::with_transport(
            self.config,
            Arc::new(ReqwestTransport { client }),
        ))
    }
}

/// High-level Zenziva client.
///
/// The client owns its [`Config`], the last [`RawResponse`] and an
/// [`ErrorList`] that grows with every failed request until
/// [`ZenzivaClient::clear_errors`] is called. Sending takes `&mut self`; wrap
/// the client in a lock to share it between tasks.
pub struct ZenzivaClient {
    config: Config,
    errors: ErrorList,
    response: Option<RawResponse>,
    http: Arc<dyn HttpTransport>,
}

impl ZenzivaClient {
    /// Create a client with the default transport.
    ///
    /// For more customization, use [`ZenzivaClient::builder`].
    pub fn new(config: Config) -> Result<Self, ZenzivaError> {
        ZenzivaClientBuilder::new().config(config).build()
    }

    /// Start building a client with custom settings.
    pub fn builder() -> ZenzivaClientBuilder {
        ZenzivaClientBuilder::new()
    }

    /// Create a client that sends requests through `http`.
    pub fn with_transport(config: Config, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            errors: ErrorList::new(),
            response: None,
            http,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn set_api_url(&mut self, api_url: impl Into<String>) -> &mut Self {
        self.config.set_api_url(api_url);
        self
    }

    pub fn set_user_key(&mut self, user_key: impl Into<String>) -> &mut Self {
        self.config.set_user_key(user_key);
        self
    }

    pub fn set_pass_key(&mut self, pass_key: impl Into<String>) -> &mut Self {
        self.config.set_pass_key(pass_key);
        self
    }

    /// Send a plain SMS.
    ///
    /// Errors:
    /// - [`ZenzivaError::Validation`] when `msisdn` is not a valid Indonesian number
    ///   or `message` is blank,
    /// - [`ZenzivaError::Config`] when the API URL or credentials are missing.
    ///
    /// Gateway-side failures yield `Ok(SendOutcome::Failed)`; see [`ZenzivaClient::errors`].
    pub async fn send(
        &mut self,
        msisdn: impl AsRef<str>,
        message: impl Into<String>,
    ) -> Result<SendOutcome, ZenzivaError> {
        let request = SendSms::new(msisdn, message)?;
        self.send_request(&request).await
    }

    /// Send an already validated [`SendSms`] request.
    pub async fn send_request(&mut self, request: &SendSms) -> Result<SendOutcome, ZenzivaError> {
        let params = crate::transport::encode_send_sms_query(request);
        self.request(SEND_SMS_PATH, params).await
    }

    /// Send a one-time password through the OTP endpoint.
    ///
    /// The code is trimmed and must be 4 to 8 characters long.
    ///
    /// Errors:
    /// - [`ZenzivaError::Validation`] for an invalid number or code length,
    /// - [`ZenzivaError::Config`] when the API URL or credentials are missing.
    pub async fn send_otp(
        &mut self,
        msisdn: impl AsRef<str>,
        otp_code: impl AsRef<str>,
    ) -> Result<SendOutcome, ZenzivaError> {
        let request = SendOtp::new(msisdn, otp_code)?;
        self.send_otp_request(&request).await
    }

    /// Send an already validated [`SendOtp`] request.
    pub async fn send_otp_request(
        &mut self,
        request: &SendOtp,
    ) -> Result<SendOutcome, ZenzivaError> {
        let params = crate::transport::encode_send_otp_query(request);
        self.request(SEND_OTP_PATH, params).await
    }

    /// Last raw exchange, or `None` before the first request reached the transport.
    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }

    /// Every failure recorded since construction or the last [`clear_errors`](Self::clear_errors).
    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn last_error(&self) -> Option<&ErrorRecord> {
        self.errors.last()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    async fn request(
        &mut self,
        path: &str,
        call_params: Vec<(String, String)>,
    ) -> Result<SendOutcome, ZenzivaError> {
        let validated = self.config.validate()?;
        let url = validated.endpoint(path);
        let mut params = validated.credential_params();
        params.extend(call_params);

        debug!("[Zenziva] GET {url}?{}", redacted_query(&params));

        let raw = match self.http.get(&url, params).await {
            Ok(response) => {
                debug!("[Zenziva] <<< HTTP {}", response.status);
                RawResponse::Received {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(failure) => RawResponse::Failed {
                kind: failure.kind,
                message: failure.message,
            },
        };

        let outcome = mapper::map_response(&raw, &mut self.errors);
        self.response = Some(raw);
        Ok(outcome)
    }
}

impl fmt::Debug for ZenzivaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZenzivaClient")
            .field("config", &self.config)
            .field("errors", &self.errors)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

const SENSITIVE_PARAMS: &[&str] = &[
    Config::USER_KEY_FIELD,
    Config::PASS_KEY_FIELD,
    OtpCode::FIELD,
];

fn redacted_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            if SENSITIVE_PARAMS.contains(&key.as_str()) {
                format!("{key}=[REDACTED]")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
