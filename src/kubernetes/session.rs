// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lazily initialized cluster API handles.
//!
//! The first read of any handle loads the cluster configuration once and
//! builds every handle together. Concurrent first readers share that single
//! initialization. Handles are never invalidated.

use crate::error::{Result, WharfError};
use futures::future::BoxFuture;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::api::networking::v1::Ingress;
use kube::{Api, Client};
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

type ClientLoader = Box<dyn Fn() -> BoxFuture<'static, Result<Client>> + Send + Sync>;

/// Every handle built from one cluster client
struct ClusterHandles {
    client: Client,
    core: Api<Namespace>,
    extensions: Api<Deployment>,
    networking: Api<Ingress>,
}

impl ClusterHandles {
    fn new(client: Client) -> Self {
        Self {
            core: Api::all(client.clone()),
            extensions: Api::all(client.clone()),
            networking: Api::all(client.clone()),
            client,
        }
    }
}

pub struct ClusterSession {
    loader: ClientLoader,
    handles: OnceCell<ClusterHandles>,
}

impl ClusterSession {
    /// Session that reads the ambient kubeconfig / in-cluster config on first use
    pub fn new() -> Self {
        Self::with_loader(load_ambient_client)
    }

    /// Session that obtains its client from `loader` on first use.
    ///
    /// If the loader fails the session stays uninitialized and the next read
    /// calls it again.
    pub fn with_loader<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Client>> + Send + 'static,
    {
        Self {
            loader: Box::new(move || Box::pin(loader())),
            handles: OnceCell::new(),
        }
    }

    /// Session around an existing client
    pub fn from_client(client: Client) -> Self {
        Self::with_loader(move || {
            let client = client.clone();
            async move { Ok(client) }
        })
    }

    pub fn is_ready(&self) -> bool {
        self.handles.initialized()
    }

    /// Raw cluster client
    pub async fn client(&self) -> Result<Client> {
        Ok(self.handles().await?.client.clone())
    }

    /// Core API (namespaces and other `v1` resources)
    pub async fn core(&self) -> Result<Api<Namespace>> {
        Ok(self.handles().await?.core.clone())
    }

    /// Workload API, `apps/v1` in place of the retired `extensions/v1beta1`
    pub async fn extensions(&self) -> Result<Api<Deployment>> {
        Ok(self.handles().await?.extensions.clone())
    }

    /// Networking API used for ingresses
    pub async fn networking(&self) -> Result<Api<Ingress>> {
        Ok(self.handles().await?.networking.clone())
    }

    async fn handles(&self) -> Result<&ClusterHandles> {
        self.handles.get_or_try_init(|| self.initialize()).await
    }

    #[instrument(skip(self))]
    async fn initialize(&self) -> Result<ClusterHandles> {
        info!("Loading cluster configuration");
        let client = (self.loader)().await?;
        info!("Connected to Kubernetes cluster");
        Ok(ClusterHandles::new(client))
    }
}

impl Default for ClusterSession {
    fn default() -> Self {
        Self::new()
    }
}

async fn load_ambient_client() -> Result<Client> {
    Client::try_default()
        .await
        .map_err(|e| WharfError::KubeconfigError(format!("Failed to infer config: {}", e)))
}
