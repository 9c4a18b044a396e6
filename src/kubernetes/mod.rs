// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for lazy session setup, template rendering and manifest apply.

pub mod apply;
pub mod session;
pub mod template;

pub use apply::{AppliedResource, ApplyOutcome, ApplyReport, ClusterManifestApplier};
pub use session::ClusterSession;
pub use template::{render_template, PlaceholderPolicy, TemplateParams};
