// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WharfError {
    #[error("{kind} creation failed: {detail}")]
    ResourceCreationFailed { kind: String, detail: String },

    #[error("{kind} update failed: {detail}")]
    ResourceUpdateFailed { kind: String, detail: String },

    #[error("{kind} deletion failed: {detail}")]
    ResourceDeletionFailed { kind: String, detail: String },

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Template '{template}' has no value for placeholder '{{{key}}}'")]
    MissingTemplateParameter { template: String, key: String },

    #[error("Applying template '{template}' failed: {}", .failures.join("; "))]
    ClusterApplyFailed {
        template: String,
        failures: Vec<String>,
    },

    #[error("Failed to load cluster configuration: {0}")]
    KubeconfigError(String),

    #[error("Invalid resource id: {0}")]
    InvalidResourceId(String),

    #[error("Invalid host URL '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WharfError>;

/// True when the cluster refused a create because the resource already exists
pub fn is_conflict(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(response) if response.code == 409)
}
