// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::WharfError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_ID_LEN: usize = 253;

/// Category of resource served by the remote daemon
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Flow,
    Pea,
    Pod,
    Workspace,
}

impl ResourceKind {
    /// Path segment of the daemon endpoint for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Flow => "flow",
            ResourceKind::Pea => "pea",
            ResourceKind::Pod => "pod",
            ResourceKind::Workspace => "workspace",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Flow => "Flow",
            ResourceKind::Pea => "Pea",
            ResourceKind::Pod => "Pod",
            ResourceKind::Workspace => "Workspace",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated name of a single remote resource instance.
///
/// Lowercase ASCII letters, digits and `-`, not starting or ending with `-`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ResourceId {
    type Err = WharfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(WharfError::InvalidResourceId("id is empty".to_string()));
        }
        if s.len() > MAX_ID_LEN {
            return Err(WharfError::InvalidResourceId(format!(
                "'{s}' is longer than {MAX_ID_LEN} characters"
            )));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(WharfError::InvalidResourceId(format!(
                "'{s}' contains invalid character '{c}'"
            )));
        }
        if s.starts_with('-') || s.ends_with('-') {
            return Err(WharfError::InvalidResourceId(format!(
                "'{s}' must start and end with a letter or digit"
            )));
        }
        Ok(ResourceId(s.to_string()))
    }
}

impl TryFrom<String> for ResourceId {
    type Error = WharfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mutating action to run against an existing resource
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOperation {
    Dump,
    RollingUpdate,
}

impl UpdateOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperation::Dump => "dump",
            UpdateOperation::RollingUpdate => "rolling_update",
        }
    }
}

impl fmt::Display for UpdateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
