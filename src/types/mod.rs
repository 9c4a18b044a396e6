// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Identifiers and enums shared by the remote and cluster sides.

pub mod resource;

pub use resource::{ResourceId, ResourceKind, UpdateOperation};
