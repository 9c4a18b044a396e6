// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Query parameter names understood by the remote daemon
pub mod query {
    pub const PORT_EXPOSE: &str = "port_expose";
    pub const KIND: &str = "kind";
    pub const DUMP_PATH: &str = "dump_path";
    pub const POD_NAME: &str = "pod_name";
    pub const SHARDS: &str = "shards";
}

/// Manifest template lookup
pub mod templates {
    /// Source directory of the built-in templates, relative to the crate root
    pub const BUILTIN_DIR: &str = "resources/k8s/template";
    /// File extension of template files
    pub const EXTENSION: &str = "yml";
}

/// Namespace used for namespaced definitions that don't name one
pub const DEFAULT_NAMESPACE: &str = "default";

/// HTTP client defaults
pub mod http {
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
}
