//! HTTP plumbing: GET, status classification, JSON decode.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use url::Url;

/// Maximum length of response body to log on failures.
const MAX_LOG_BODY_LENGTH: usize = 200;

fn truncate_for_log(body: &str) -> String {
    if body.len() > MAX_LOG_BODY_LENGTH {
        let prefix: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", prefix, body.len())
    } else {
        body.to_string()
    }
}

/// Wrapper around a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body.
    ///
    /// A 404 maps to [`Error::NotFound`]; any other non-success status maps
    /// to [`Error::Status`]. Both carry the request URL so callers can log
    /// something useful.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%url, %status, body = %truncate_for_log(&body), "request failed");
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}
