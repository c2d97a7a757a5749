use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response, Url};
use tracing::debug;

use super::{
    ApplicationStore, BackendError, ContactMailer, PositionSource, APPLICATIONS_TABLE,
    CONTACT_FUNCTION, POSITIONS_TABLE,
};
use crate::config::BackendConfig;
use crate::contact::ContactMessage;
use crate::internship::{ApplicationRow, PositionCategory};

const MAX_ERROR_BODY_BYTES: usize = 2 * 1024;

/// HTTP client for the managed backend's table API (`/rest/v1`) and functions (`/functions/v1`).
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|_| BackendError::Unavailable("anon key is not a valid header".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|_| BackendError::Unavailable("anon key is not a valid header".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|err| BackendError::Unavailable(format!("invalid endpoint {path}: {err}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY_BYTES {
            let mut cut = MAX_ERROR_BODY_BYTES;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        Err(BackendError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl PositionSource for RestBackend {
    async fn fetch_positions(&self) -> Result<Vec<PositionCategory>, BackendError> {
        let url = self.endpoint(&format!("rest/v1/{POSITIONS_TABLE}"))?;
        let request = self
            .client
            .get(url)
            .query(&[("select", "title,items"), ("order", "title.asc")]);

        let positions: Vec<PositionCategory> = self.send(request).await?.json().await?;
        debug!(count = positions.len(), "fetched position catalog");
        Ok(positions)
    }
}

impl ApplicationStore for RestBackend {
    async fn insert_application(&self, row: ApplicationRow) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("rest/v1/{APPLICATIONS_TABLE}"))?;
        let request = self
            .client
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&[row]);

        self.send(request).await?;
        Ok(())
    }
}

impl ContactMailer for RestBackend {
    async fn send_contact_email(&self, message: ContactMessage) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("functions/v1/{CONTACT_FUNCTION}"))?;
        self.send(self.client.post(url).json(&message)).await?;
        Ok(())
    }
}
