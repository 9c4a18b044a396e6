// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Render manifest templates and create their resources in the cluster.
//!
//! A definition that already exists counts as applied, so re-running an
//! apply against a partially provisioned cluster is safe.

use crate::config::Config;
use crate::constants::DEFAULT_NAMESPACE;
use crate::error::{is_conflict, Result, WharfError};
use crate::kubernetes::session::ClusterSession;
use crate::kubernetes::template::{render_template, PlaceholderPolicy, TemplateParams};
use kube::{
    api::{DynamicObject, PostParams},
    core::GroupVersionKind,
    discovery::{oneshot::pinned_kind, Scope},
    Api, Client,
};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

/// Result of creating a single definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedResource {
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub outcome: ApplyOutcome,
}

/// Every definition of a successful apply, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub resources: Vec<AppliedResource>,
}

impl ApplyReport {
    pub fn created(&self) -> usize {
        self.count(ApplyOutcome::Created)
    }

    pub fn already_existing(&self) -> usize {
        self.count(ApplyOutcome::AlreadyExists)
    }

    fn count(&self, outcome: ApplyOutcome) -> usize {
        self.resources.iter().filter(|r| r.outcome == outcome).count()
    }
}

pub struct ClusterManifestApplier {
    session: Arc<ClusterSession>,
    template_dir: Option<PathBuf>,
    scratch_dir: Option<PathBuf>,
    policy: PlaceholderPolicy,
}

impl ClusterManifestApplier {
    pub fn new(session: Arc<ClusterSession>) -> Self {
        Self {
            session,
            template_dir: None,
            scratch_dir: None,
            policy: PlaceholderPolicy::default(),
        }
    }

    pub fn from_config(session: Arc<ClusterSession>, config: &Config) -> Self {
        Self {
            session,
            template_dir: config.template_dir.clone(),
            scratch_dir: config.scratch_dir.clone(),
            policy: config.placeholder_policy,
        }
    }

    /// Default template directory when a call gives none
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Directory for temporary manifest files
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn with_placeholder_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn session(&self) -> &Arc<ClusterSession> {
        &self.session
    }

    /// Render `template` with `params`. `override_dir` wins over the configured directory.
    pub fn render(
        &self,
        template: &str,
        params: &TemplateParams,
        override_dir: Option<&Path>,
    ) -> Result<String> {
        let dir = override_dir.or(self.template_dir.as_deref());
        render_template(template, params, dir, self.policy)
    }

    /// Render `template` and create every definition it holds.
    ///
    /// Definitions that already exist are reported as `AlreadyExists`. Any
    /// other failure makes the whole call fail with `ClusterApplyFailed`
    /// after all definitions have been attempted.
    #[instrument(skip(self, params))]
    pub async fn apply(
        &self,
        template: &str,
        params: &TemplateParams,
        override_dir: Option<&Path>,
    ) -> Result<ApplyReport> {
        let manifest = self.render(template, params, override_dir)?;

        // Removed when dropped, on every return path below
        let scratch = self.write_scratch(&manifest)?;
        debug!("Wrote manifest to {}", scratch.path().display());

        let definitions = read_definitions(scratch.path())?;
        let client = self.session.client().await?;

        let mut report = ApplyReport::default();
        let mut failures = Vec::new();

        for definition in definitions {
            match create_definition(&client, definition).await {
                Ok(applied) => {
                    if applied.outcome == ApplyOutcome::AlreadyExists {
                        info!("{} {} exists already", applied.kind, applied.name);
                    }
                    report.resources.push(applied);
                }
                Err(failure) => {
                    warn!("Failed to apply definition from template {}: {}", template, failure);
                    failures.push(failure);
                }
            }
        }

        if !failures.is_empty() {
            return Err(WharfError::ClusterApplyFailed {
                template: template.to_string(),
                failures,
            });
        }

        info!(
            "Applied template {}: {} created, {} already existed",
            template,
            report.created(),
            report.already_existing()
        );
        Ok(report)
    }

    fn write_scratch(&self, manifest: &str) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("wharf-manifest-").suffix(".yml");

        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(manifest.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

/// Parse every YAML document in `path`, expanding `*List` kinds into their items
fn read_definitions(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path)?;
    let mut definitions = Vec::new();

    for document in serde_yaml::Deserializer::from_str(&text) {
        let value = Value::deserialize(document)
            .map_err(|e| WharfError::InvalidManifest(e.to_string()))?;
        flatten_into(value, &mut definitions);
    }

    Ok(definitions)
}

fn flatten_into(value: Value, definitions: &mut Vec<Value>) {
    let is_list = value
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.ends_with("List"));

    match value {
        Value::Null => {}
        Value::Object(mut map) if is_list => {
            if let Some(Value::Array(items)) = map.remove("items") {
                for item in items {
                    flatten_into(item, definitions);
                }
            }
        }
        other => definitions.push(other),
    }
}

/// Create one definition. Errors are rendered as `Kind/name: detail`.
async fn create_definition(
    client: &Client,
    definition: Value,
) -> std::result::Result<AppliedResource, String> {
    let object: DynamicObject =
        serde_json::from_value(definition).map_err(|e| format!("invalid definition: {e}"))?;

    let types = object
        .types
        .clone()
        .ok_or_else(|| "definition is missing apiVersion or kind".to_string())?;
    let name = object
        .metadata
        .name
        .clone()
        .or_else(|| object.metadata.generate_name.clone())
        .ok_or_else(|| format!("{} definition is missing metadata.name", types.kind))?;
    let label = format!("{}/{}", types.kind, name);

    let gvk = parse_gvk(&types.api_version, &types.kind);
    let (resource, capabilities) = pinned_kind(client, &gvk)
        .await
        .map_err(|e| format!("{label}: {e}"))?;

    let namespace = match capabilities.scope {
        Scope::Namespaced => Some(
            object
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        ),
        Scope::Cluster => None,
    };

    let api: Api<DynamicObject> = match namespace.as_deref() {
        Some(ns) => Api::namespaced_with(client.clone(), ns, &resource),
        None => Api::all_with(client.clone(), &resource),
    };

    let outcome = classify(api.create(&PostParams::default(), &object).await)
        .map_err(|e| format!("{label}: {e}"))?;

    Ok(AppliedResource {
        kind: types.kind,
        name,
        namespace,
        outcome,
    })
}

/// Fold the "already exists" conflict into success
fn classify(
    result: std::result::Result<DynamicObject, kube::Error>,
) -> std::result::Result<ApplyOutcome, kube::Error> {
    match result {
        Ok(_) => Ok(ApplyOutcome::Created),
        Err(e) if is_conflict(&e) => Ok(ApplyOutcome::AlreadyExists),
        Err(e) => Err(e),
    }
}

fn parse_gvk(api_version: &str, kind: &str) -> GroupVersionKind {
    match api_version.rsplit_once('/') {
        Some((group, version)) => GroupVersionKind::gvk(group, version, kind),
        None => GroupVersionKind::gvk("", api_version, kind),
    }
}
