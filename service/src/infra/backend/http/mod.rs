//! HTTP [`Backend`] implementation.
//!
//! Speaks JSON with the orders API:
//! - `GET /orders` lists a [`list::Page`] of orders;
//! - `POST /orders` creates a new order;
//! - `GET /orders/{id}/items` lists items of an order;
//! - `PUT /orders/{id}/items` replaces items of an order.
//!
//! [`list::Page`]: crate::read::order::list::Page

mod dto;
mod impls;

use std::time;

use derive_more::{Display, Error as StdError, From};
use serde::de::DeserializeOwned;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::infra::backend;
#[cfg(doc)]
use crate::infra::Backend;

/// [`Http`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the orders API.
    #[default("http://127.0.0.1:8000".to_owned())]
    pub url: String,

    /// Timeout of a single request, including reading its response.
    #[default(time::Duration::from_secs(30))]
    pub timeout: time::Duration,
}

/// HTTP [`Backend`] client.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`] with connection pooling.
    client: reqwest::Client,

    /// Base URL of the orders API, without a trailing slash.
    base_url: String,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying [`reqwest::Client`].
    pub fn new(conf: &Config) -> Result<Self, Traced<backend::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            client,
            base_url: conf.url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the absolute URL of the provided API `path`.
    fn url(&self, path: impl AsRef<str>) -> String {
        format!("{}/{}", self.base_url, path.as_ref())
    }

    /// Sends the provided `request`, failing on non-successful statuses.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Traced<backend::Error>> {
        let response = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .inspect_err(|e| log::debug!("orders API request failed: {e}"))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        log::trace!(
            "orders API responded with `{}` to `{}`",
            response.status(),
            response.url(),
        );
        Ok(response)
    }

    /// Sends the provided `request` and decodes its JSON response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Traced<backend::Error>> {
        let body = self
            .send(request)
            .await
            .map_err(tracerr::wrap!())?
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        serde_json::from_slice(&body)
            .inspect_err(|e| {
                log::debug!(
                    "unexpected orders API response `{}`: {e}",
                    String::from_utf8_lossy(&body),
                );
            })
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

/// HTTP [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request could not be performed, or its response has a
    /// non-successful status.
    #[display("HTTP request failed: {_0}")]
    Request(reqwest::Error),

    /// Response body is not the expected JSON.
    #[display("Failed to decode HTTP response: {_0}")]
    Decode(serde_json::Error),
}
