// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for one resource kind hosted by a remote daemon.
//!
//! Each verb maps to exactly one request and one expected status code.
//! Anything else, including transport failures, becomes the verb's error.

use crate::config::Config;
use crate::constants::query;
use crate::error::{Result, WharfError};
use crate::types::{ResourceId, ResourceKind, UpdateOperation};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error, instrument};
use url::Url;

/// Failure payload returned by the daemon
#[derive(Debug, Deserialize)]
struct FailureBody {
    body: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct RemoteResourceClient {
    http: reqwest::Client,
    host: Url,
    endpoint: Url,
    kind: ResourceKind,
    params: Map<String, Value>,
}

impl RemoteResourceClient {
    /// Create a client with default timeouts
    pub fn new(host: &str, kind: ResourceKind, params: Map<String, Value>) -> Result<Self> {
        Self::from_config(host, kind, params, &Config::default())
    }

    /// Create a client using the timeouts from `config`
    pub fn from_config(
        host: &str,
        kind: ResourceKind,
        params: Map<String, Value>,
        config: &Config,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Self::with_client(http, host, kind, params)
    }

    /// Create a client around a caller-supplied `reqwest::Client`
    pub fn with_client(
        http: reqwest::Client,
        host: &str,
        kind: ResourceKind,
        params: Map<String, Value>,
    ) -> Result<Self> {
        let host_url = Url::parse(host).map_err(|e| WharfError::InvalidHost {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

        let mut endpoint = host_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| WharfError::InvalidHost {
                host: host.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push(kind.as_str());

        Ok(Self {
            http,
            host: host_url,
            endpoint,
            kind,
            params,
        })
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Provision a new resource. Extra params are merged over the parameter bag.
    #[instrument(skip(self, extra_params), fields(kind = %self.kind, host = %self.host))]
    pub async fn create(
        &self,
        port_expose: u16,
        extra_params: Option<&Map<String, Value>>,
    ) -> Result<Value> {
        let mut body = self.params.clone();
        if let Some(extra) = extra_params {
            body.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let failed = |detail: String| WharfError::ResourceCreationFailed {
            kind: self.kind.title().to_string(),
            detail,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&[(query::PORT_EXPOSE, port_expose)])
            .json(&body)
            .send()
            .await
            .map_err(|e| failed(transport_detail(&e)))?;

        let response = expect_status(response, StatusCode::CREATED)
            .await
            .map_err(failed)?;
        let created = json_body(response).await.map_err(failed)?;

        debug!("{} created", self.kind.title());
        Ok(created)
    }

    /// Run a mutating operation on the resource `id`.
    ///
    /// Not idempotent: repeating the call repeats the action on the daemon.
    #[instrument(skip(self), fields(kind = %self.kind, host = %self.host))]
    pub async fn update(
        &self,
        id: &ResourceId,
        operation: UpdateOperation,
        dump_path: &str,
        pod_name: &str,
        shards: Option<u32>,
    ) -> Result<Value> {
        let failed = |detail: String| WharfError::ResourceUpdateFailed {
            kind: self.kind.title().to_string(),
            detail,
        };

        let response = self
            .http
            .put(self.endpoint.clone())
            .query(&update_query(operation, dump_path, pod_name, shards))
            .send()
            .await
            .map_err(|e| failed(transport_detail(&e)))?;

        let response = expect_status(response, StatusCode::OK)
            .await
            .map_err(failed)?;
        let updated = json_body(response).await.map_err(failed)?;

        debug!("{} {} updated with {}", self.kind.title(), id, operation);
        Ok(updated)
    }

    /// Terminate the resource served by this host
    #[instrument(skip(self), fields(kind = %self.kind, host = %self.host))]
    pub async fn delete(&self) -> Result<()> {
        let failed = |detail: String| WharfError::ResourceDeletionFailed {
            kind: self.kind.title().to_string(),
            detail,
        };

        let response = self
            .http
            .delete(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| failed(transport_detail(&e)))?;

        expect_status(response, StatusCode::OK)
            .await
            .map_err(failed)?;

        debug!("{} deleted", self.kind.title());
        Ok(())
    }
}

fn update_query(
    operation: UpdateOperation,
    dump_path: &str,
    pod_name: &str,
    shards: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        (query::KIND, operation.as_str().to_string()),
        (query::DUMP_PATH, dump_path.to_string()),
        (query::POD_NAME, pod_name.to_string()),
    ];
    if let Some(shards) = shards {
        params.push((query::SHARDS, shards.to_string()));
    }
    params
}

fn transport_detail(err: &reqwest::Error) -> String {
    error!("{:?}", err);
    err.to_string()
}

/// Pass the response through if it has the expected status, otherwise
/// return the best failure detail it offers
async fn expect_status(
    response: Response,
    expected: StatusCode,
) -> std::result::Result<Response, String> {
    if response.status() == expected {
        return Ok(response);
    }

    let status = response.status();
    match response.text().await {
        Ok(text) => Err(failure_detail(status, &text)),
        Err(e) => Err(format!("status {status}: {e}")),
    }
}

async fn json_body(response: Response) -> std::result::Result<Value, String> {
    response
        .json::<Value>()
        .await
        .map_err(|e| format!("malformed response body: {e}"))
}

fn failure_detail(status: StatusCode, text: &str) -> String {
    if let Ok(failure) = serde_json::from_str::<FailureBody>(text) {
        let joined: String = failure
            .body
            .iter()
            .map(|part| match part {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        if !joined.trim().is_empty() {
            return joined;
        }
        return format!("status {status}");
    }

    let text = text.trim();
    if text.is_empty() {
        format!("status {status}")
    } else {
        text.to_string()
    }
}
