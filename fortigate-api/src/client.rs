use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::cookie::{CookieStore, Jar};
use serde_json::Value;
use tracing::{debug, warn};

use crate::appliance::{Appliance, Connector};
use crate::category::{Category, VDOM_PATH};
use crate::error::ApiError;
use crate::filter::filter_by_vdom;
use crate::record::Record;
use crate::response::{results, ApiResponse};

const CSRF_COOKIE: &str = "ccsrftoken";
const CSRF_HEADER: &str = "X-CSRFTOKEN";

/// Administrator login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Transport settings shared by every session.
#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    /// Per-request deadline; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Verify the appliance certificate. Appliances usually present a
    /// self-signed certificate, so this is off unless requested.
    pub verify_tls: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            verify_tls: false,
        }
    }
}

/// An authenticated HTTPS session with one appliance, scoped to one vdom.
pub struct FortiGate {
    client: Client,
    base_url: String,
    vdom: String,
    csrf_token: String,
}

impl FortiGate {
    /// Log in and capture the CSRF token used for mutating calls.
    pub fn login(
        host: &str,
        vdom: &str,
        credentials: &Credentials,
        options: ClientOptions,
    ) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_tls)
            .build()?;

        let base_url = format!("https://{host}");
        let url = format!("{base_url}/logincheck");
        debug!(%host, %vdom, "logging in");
        let response = client
            .post(&url)
            .form(&[
                ("username", credentials.username.as_str()),
                ("secretkey", credentials.password.as_str()),
            ])
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        // Read the jar rather than the final response: the token may be set
        // on a redirect hop.
        let csrf_token = jar
            .cookies(response.url())
            .and_then(|header| header.to_str().ok().and_then(token_from_cookies))
            .ok_or_else(|| ApiError::Login {
                host: host.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            vdom: vdom.to_string(),
            csrf_token,
        })
    }

    fn cmdb_url(&self, path: &str) -> String {
        cmdb_url(&self.base_url, path)
    }

    /// GET a CMDB path in this session's vdom and return the listed records.
    pub fn get(&self, path: &str) -> Result<Vec<Record>, ApiError> {
        let url = self.cmdb_url(path);
        debug!(%url, vdom = %self.vdom, "GET");
        let response = self
            .client
            .get(&url)
            .query(&[("vdom", self.vdom.as_str())])
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        if !(200..=299).contains(&status) {
            return Err(ApiError::Status {
                path: path.to_string(),
                status,
            });
        }

        let text = response
            .text()
            .map_err(|source| ApiError::Transport { url, source })?;
        let body: Value = serde_json::from_str(&text).map_err(|source| ApiError::Json {
            path: path.to_string(),
            source,
        })?;
        results(path, body)
    }
}

impl Appliance for FortiGate {
    fn vdom(&self) -> &str {
        &self.vdom
    }

    fn list_vdoms(&self) -> Result<Vec<Record>, ApiError> {
        self.get(VDOM_PATH)
    }

    fn list(&self, category: Category) -> Result<Vec<Record>, ApiError> {
        let records = self.get(category.path())?;
        if category.scoped_by_vdom() {
            return Ok(filter_by_vdom(records, &self.vdom));
        }
        Ok(records)
    }

    fn create(&self, path: &str, record: &Record) -> Result<ApiResponse, ApiError> {
        let url = self.cmdb_url(path);
        debug!(%url, vdom = %self.vdom, "POST");
        let response = self
            .client
            .post(&url)
            .query(&[("vdom", self.vdom.as_str())])
            .header(CSRF_HEADER, &self.csrf_token)
            .json(record)
            .send()
            .map_err(|source| ApiError::Transport { url, source })?;

        let status = response.status().as_u16();
        // The body only carries diagnostics; an unreadable one is not fatal.
        let body = response
            .text()
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok());
        Ok(ApiResponse::new(status, body))
    }

    fn logout(self) -> Result<(), ApiError> {
        let url = format!("{}/logout", self.base_url);
        debug!(%url, vdom = %self.vdom, "logging out");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        if !response.status().is_success() {
            warn!(%url, status = response.status().as_u16(), "logout not acknowledged");
        }
        Ok(())
    }
}

/// Logs into one appliance on demand, once per vdom scope.
#[derive(Debug, Clone)]
pub struct FortiGateConnector {
    host: String,
    credentials: Credentials,
    options: ClientOptions,
}

impl FortiGateConnector {
    pub fn new(host: impl Into<String>, credentials: Credentials, options: ClientOptions) -> Self {
        Self {
            host: host.into(),
            credentials,
            options,
        }
    }
}

impl Connector for FortiGateConnector {
    type Session = FortiGate;

    fn host(&self) -> &str {
        &self.host
    }

    fn connect(&self, vdom: &str) -> Result<FortiGate, ApiError> {
        FortiGate::login(&self.host, vdom, &self.credentials, self.options)
    }
}

fn cmdb_url(base_url: &str, path: &str) -> String {
    format!("{base_url}/api/v2/cmdb/{}", path.trim_matches('/'))
}

/// Pick the CSRF token out of a `Cookie` header value.
fn token_from_cookies(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CSRF_COOKIE)
        .map(|(_, value)| unquote(value).to_string())
        .filter(|token| !token.is_empty())
}

/// The token cookie value is wrapped in double quotes.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
