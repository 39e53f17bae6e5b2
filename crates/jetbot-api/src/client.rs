// Hand-crafted async HTTP client for the SmartThings cloud API.
//
// Base path: https://api.smartthings.com/v1/
// Auth: Authorization: Bearer, resolved per request through `Credential`
// (OAuth tokens rotate mid-session, so the header is never baked into
// the client's defaults).

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Credential;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{CommandRequest, CommandsBody, Device, DevicePage, DeviceStatus};

/// Production endpoint of the SmartThings REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.smartthings.com/v1/";

/// Versioned media type SmartThings serves.
const ST_ACCEPT: &str = "application/vnd.smartthings+json;v=1";

// ── Error response shape from the API ────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the SmartThings device API.
///
/// Owns the [`Credential`] so both the read path (status/detail) and the
/// write path (commands) resolve tokens through the same provider.
pub struct SmartThingsClient {
    http: reqwest::Client,
    base_url: Url,
    credential: Credential,
}

impl SmartThingsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, credential, and transport config.
    ///
    /// Injects the versioned `Accept` header as a default on every request.
    pub fn new(
        base_url: &str,
        credential: Credential,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ST_ACCEPT));

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    /// Wrap an existing `reqwest::Client` (tests, shared transports).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credential: Credential,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    /// Ensure the base URL ends with a slash so `Url::join` keeps the
    /// full path (`.../v1/` + `devices/{id}` → `.../v1/devices/{id}`).
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        if raw.ends_with('/') {
            Ok(Url::parse(raw)?)
        } else {
            Ok(Url::parse(&format!("{raw}/"))?)
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Device operations ────────────────────────────────────────────

    /// Fetch the full capability status of a device.
    pub async fn device_status(&self, device_id: &str) -> Result<DeviceStatus, Error> {
        self.get(&format!("devices/{device_id}/status")).await
    }

    /// Fetch device details (label, components, capability lists).
    pub async fn device(&self, device_id: &str) -> Result<Device, Error> {
        self.get(&format!("devices/{device_id}")).await
    }

    /// List all devices visible to the token, following pagination.
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        let mut devices = Vec::new();
        let mut next = Some(self.url("devices")?);

        while let Some(url) = next {
            let page: DevicePage = self.get_url(url).await?;
            devices.extend(page.items);
            next = match page.links.and_then(|l| l.next) {
                Some(link) => Some(Url::parse(&link.href)?),
                None => None,
            };
        }

        Ok(devices)
    }

    /// List devices that advertise robot-cleaner capabilities.
    pub async fn list_robot_cleaners(&self) -> Result<Vec<Device>, Error> {
        let devices = self.list_devices().await?;
        Ok(devices.into_iter().filter(Device::is_robot_cleaner).collect())
    }

    /// Execute one or more commands against a device.
    pub async fn execute_commands(
        &self,
        device_id: &str,
        commands: &[CommandRequest],
    ) -> Result<(), Error> {
        self.post_no_response(
            &format!("devices/{device_id}/commands"),
            &CommandsBody { commands },
        )
        .await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn bearer(&self) -> Result<SecretString, Error> {
        self.credential.bearer_token(&self.http).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        self.get_url(url).await
    }

    async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let token = self.bearer().await?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");
        let token = self.bearer().await?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Error::Authentication {
                message: format!("token rejected (HTTP {})", status.as_u16()),
            };
        }

        let raw = resp.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorEnvelope>(&raw) {
            Ok(ErrorEnvelope { error: Some(body) }) => Error::Api {
                status: status.as_u16(),
                message: body.message.unwrap_or_else(|| status.to_string()),
                code: body.code,
            },
            _ => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() { status.to_string() } else { raw },
                code: None,
            },
        }
    }
}
