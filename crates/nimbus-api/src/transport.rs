// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP transport for the console API.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiFieldError, ErrorBody, Result};

/// Thin wrapper over `reqwest` speaking the console API conventions:
/// bearer auth, JSON bodies, `{"errors": [...]}` failure payloads.
///
/// The transport draws no distinction between connection failures and non-2xx
/// statuses beyond the error variant — both surface as `Err` to the caller,
/// which owns all retry decisions.
pub struct Transport {
    http: Client,
    config: ApiConfig,
}

impl Transport {
    /// Build a transport from `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { http, config })
    }

    /// The configuration this transport was built from.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut req = self.http.request(method, url);
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// GET `path` with query pairs, decoding a JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!(path, "GET");
        let resp = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(resp).await
    }

    /// PUT or POST `path` with an optional JSON body, decoding a JSON response.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<T> {
        debug!(%method, path, "send");
        let mut req = self.request(method, path);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        Self::decode(resp).await
    }

    /// DELETE `path`, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let resp = self.request(Method::DELETE, path).send().await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(resp).await)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Map a non-2xx response into [`ApiError::Api`], falling back to the
    /// bare status when the body is not the expected shape.
    async fn error_from(resp: Response) -> ApiError {
        let status = resp.status().as_u16();
        let errors = match resp.json::<ErrorBody>().await {
            Ok(body) if !body.errors.is_empty() => body.errors,
            _ => vec![ApiFieldError {
                field: None,
                reason: format!("unexpected response status {status}"),
            }],
        };
        ApiError::Api { status, errors }
    }
}
