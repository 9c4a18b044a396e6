// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle client for resources hosted by a remote daemon.

pub mod client;

pub use client::RemoteResourceClient;
