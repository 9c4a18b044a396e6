// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::http::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::kubernetes::PlaceholderPolicy;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, optionally loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory searched for templates instead of the built-in one
    pub template_dir: Option<PathBuf>,
    /// Where temporary manifests are written, system temp dir when unset
    pub scratch_dir: Option<PathBuf>,
    pub placeholder_policy: PlaceholderPolicy,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            template_dir: None,
            scratch_dir: None,
            placeholder_policy: PlaceholderPolicy::PassThrough,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let strict: bool = env::var("WHARF_STRICT_TEMPLATES")
            .unwrap_or("false".to_string())
            .parse()
            .unwrap_or(false);

        Ok(Config {
            template_dir: env::var_os("WHARF_TEMPLATE_DIR").map(PathBuf::from),
            scratch_dir: env::var_os("WHARF_SCRATCH_DIR").map(PathBuf::from),
            placeholder_policy: if strict {
                PlaceholderPolicy::Strict
            } else {
                PlaceholderPolicy::PassThrough
            },
            request_timeout: secs_from_env("WHARF_HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout),
            connect_timeout: secs_from_env("WHARF_HTTP_CONNECT_TIMEOUT_SECS")?
                .unwrap_or(defaults.connect_timeout),
        })
    }
}

fn secs_from_env(name: &str) -> Result<Option<Duration>> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a whole number of seconds, got '{raw}'"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}
