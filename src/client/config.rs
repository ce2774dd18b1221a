use std::fmt;

use url::Url;

/// Production endpoint documented by Zenziva.
pub const DEFAULT_API_URL: &str = "https://reguler.zenziva.net/apps/";

/// Environment variable read by [`Config::from_env`] for the API base URL.
pub const API_URL_ENV: &str = "ZENZIVA_API_URL";
/// Environment variable read by [`Config::from_env`] for the user key.
pub const USER_KEY_ENV: &str = "ZENZIVA_USERKEY";
/// Environment variable read by [`Config::from_env`] for the pass key.
pub const PASS_KEY_ENV: &str = "ZENZIVA_PASSKEY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Configuration problems detected right before a request is issued.
pub enum ConfigError {
    #[error("API URL is not set")]
    MissingApiUrl,

    #[error("userkey is not set")]
    MissingUserKey,

    #[error("passkey is not set")]
    MissingPassKey,

    #[error("invalid API URL {url:?}: {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API URL {url:?} cannot carry an endpoint path")]
    UnsupportedApiUrl { url: String },
}

#[derive(Clone, PartialEq, Eq)]
/// Connection settings for the Zenziva gateway.
///
/// Nothing is validated by the setters; [`Config::validate`] runs before every
/// request and rejects an empty API URL or missing credentials.
pub struct Config {
    api_url: String,
    user_key: Option<String>,
    pass_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            user_key: None,
            pass_key: None,
        }
    }
}

impl Config {
    /// Query parameter name for the user key (`userkey`).
    pub const USER_KEY_FIELD: &'static str = "userkey";
    /// Query parameter name for the pass key (`passkey`).
    pub const PASS_KEY_FIELD: &'static str = "passkey";

    /// Default API URL, no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default API URL with the given credentials.
    pub fn with_credentials(user_key: impl Into<String>, pass_key: impl Into<String>) -> Self {
        Self {
            user_key: Some(user_key.into()),
            pass_key: Some(pass_key.into()),
            ..Self::default()
        }
    }

    /// Read `ZENZIVA_API_URL`, `ZENZIVA_USERKEY` and `ZENZIVA_PASSKEY`.
    ///
    /// Unset variables keep their defaults; missing credentials surface as
    /// [`ConfigError`] on the first request.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(api_url) = lookup(API_URL_ENV) {
            config.api_url = api_url;
        }
        config.user_key = lookup(USER_KEY_ENV);
        config.pass_key = lookup(PASS_KEY_ENV);
        config
    }

    pub fn set_api_url(&mut self, api_url: impl Into<String>) -> &mut Self {
        self.api_url = api_url.into();
        self
    }

    pub fn set_user_key(&mut self, user_key: impl Into<String>) -> &mut Self {
        self.user_key = Some(user_key.into());
        self
    }

    pub fn set_pass_key(&mut self, pass_key: impl Into<String>) -> &mut Self {
        self.pass_key = Some(pass_key.into());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn user_key(&self) -> Option<&str> {
        self.user_key.as_deref()
    }

    pub fn pass_key(&self) -> Option<&str> {
        self.pass_key.as_deref()
    }

    /// Check that every setting needed for a request is present.
    pub fn validate(&self) -> Result<ValidatedConfig<'_>, ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }
        let user_key = non_empty(self.user_key.as_deref()).ok_or(ConfigError::MissingUserKey)?;
        let pass_key = non_empty(self.pass_key.as_deref()).ok_or(ConfigError::MissingPassKey)?;

        let base = Url::parse(self.api_url.trim()).map_err(|source| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedApiUrl {
                url: self.api_url.clone(),
            });
        }

        Ok(ValidatedConfig {
            base,
            user_key,
            pass_key,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("user_key", &self.user_key.as_ref().map(|_| "[REDACTED]"))
            .field("pass_key", &self.pass_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Settings that passed [`Config::validate`].
#[derive(Debug, Clone)]
pub struct ValidatedConfig<'a> {
    base: Url,
    user_key: &'a str,
    pass_key: &'a str,
}

impl ValidatedConfig<'_> {
    /// Endpoint URL: the API URL with its path replaced by `path`.
    ///
    /// Endpoint paths are rooted at the host, so the default
    /// `https://reguler.zenziva.net/apps/` and `apps/smsapi.php` give
    /// `https://reguler.zenziva.net/apps/smsapi.php`.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// `userkey` and `passkey` query parameters.
    pub fn credential_params(&self) -> Vec<(String, String)> {
        vec![
            (Config::USER_KEY_FIELD.to_owned(), self.user_key.to_owned()),
            (Config::PASS_KEY_FIELD.to_owned(), self.pass_key.to_owned()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_to_production_url_without_credentials() {
        let config = Config::new();
        assert_eq!(config.api_url(), "https://reguler.zenziva.net/apps/");
        assert_eq!(config.user_key(), None);
        assert_eq!(config.pass_key(), None);
    }

    #[test]
    fn setters_chain() {
        let mut config = Config::new();
        config
            .set_api_url("https://example.invalid/")
            .set_user_key("user")
            .set_pass_key("pass");
        assert_eq!(config.api_url(), "https://example.invalid/");
        assert_eq!(config.user_key(), Some("user"));
        assert_eq!(config.pass_key(), Some("pass"));
    }

    #[test]
    fn validate_reports_first_missing_setting() {
        let mut config = Config::new();
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingUserKey);

        config.set_user_key("user");
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingPassKey);

        config.set_pass_key("   ");
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingPassKey);

        config.set_pass_key("pass").set_api_url("");
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingApiUrl);
    }

    #[test]
    fn validate_rejects_unparseable_urls() {
        let mut config = Config::with_credentials("user", "pass");
        config.set_api_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidApiUrl { .. })
        ));

        config.set_api_url("mailto:ops@example.invalid");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedApiUrl { .. })
        ));
    }

    #[test]
    fn endpoint_replaces_base_path() {
        let config = Config::with_credentials("user", "pass");
        let validated = config.validate().unwrap();
        assert_eq!(
            validated.endpoint("apps/smsapi.php").as_str(),
            "https://reguler.zenziva.net/apps/smsapi.php"
        );
        assert_eq!(
            validated.endpoint("apps/smsotp.php").as_str(),
            "https://reguler.zenziva.net/apps/smsotp.php"
        );
    }

    #[test]
    fn endpoint_drops_query_from_base() {
        let mut config = Config::with_credentials("user", "pass");
        config.set_api_url("http://127.0.0.1:8080/legacy/?x=1");
        let validated = config.validate().unwrap();
        assert_eq!(
            validated.endpoint("apps/smsapi.php").as_str(),
            "http://127.0.0.1:8080/apps/smsapi.php"
        );
    }

    #[test]
    fn credential_params_use_wire_names() {
        let config = Config::with_credentials("user", "pass");
        let params = config.validate().unwrap().credential_params();
        assert_eq!(
            params,
            vec![
                ("userkey".to_owned(), "user".to_owned()),
                ("passkey".to_owned(), "pass".to_owned()),
            ]
        );
    }

    #[test]
    fn from_lookup_reads_known_variables() {
        let vars = HashMap::from([
            (USER_KEY_ENV, "env-user".to_owned()),
            (PASS_KEY_ENV, "env-pass".to_owned()),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).cloned());
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.user_key(), Some("env-user"));
        assert_eq!(config.pass_key(), Some("env-pass"));

        let vars = HashMap::from([(API_URL_ENV, "http://localhost:9000/".to_owned())]);
        let config = Config::from_lookup(|name| vars.get(name).cloned());
        assert_eq!(config.api_url(), "http://localhost:9000/");
        assert_eq!(config.user_key(), None);
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = Config::with_credentials("u53r-key", "s3cret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("u53r-key"));
        assert!(!rendered.contains("s3cret"));
        assert_eq!(rendered.matches("[REDACTED]").count(), 2);

        let rendered = format!("{:?}", Config::new());
        assert!(rendered.contains("user_key: None"));
    }
}
