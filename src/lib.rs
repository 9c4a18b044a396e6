// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod remote;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{Result, WharfError};
pub use kubernetes::{ClusterManifestApplier, ClusterSession};
pub use remote::RemoteResourceClient;

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`. Does nothing if one is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
