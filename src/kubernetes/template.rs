// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest template lookup and `{key}` substitution

use crate::constants::templates::{BUILTIN_DIR, EXTENSION};
use crate::error::{Result, WharfError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub type TemplateParams = BTreeMap<String, String>;

/// What to do with a `{placeholder}` that has no value in the params
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderPolicy {
    /// Leave the placeholder text in the output untouched
    #[default]
    PassThrough,
    /// Fail with `MissingTemplateParameter`
    Strict,
}

/// Templates shipped inside the crate, looked up when no directory is given
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "configmap",
        include_str!("../../resources/k8s/template/configmap.yml"),
    ),
    (
        "deployment",
        include_str!("../../resources/k8s/template/deployment.yml"),
    ),
    (
        "namespace",
        include_str!("../../resources/k8s/template/namespace.yml"),
    ),
    (
        "service",
        include_str!("../../resources/k8s/template/service.yml"),
    ),
];

/// Text of the built-in template `name`
pub fn builtin_template(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, text)| *text)
}

/// Resolve `<dir>/<name>.yml`
pub fn template_path(name: &str, dir: &Path) -> PathBuf {
    dir.join(format!("{name}.{EXTENSION}"))
}

/// Replace every `{key}` occurrence for each key in `params`.
///
/// Keys are applied in sorted order. Placeholders without a key are kept.
pub fn substitute(text: &str, params: &TemplateParams) -> String {
    params.iter().fold(text.to_string(), |content, (key, value)| {
        content.replace(&format!("{{{key}}}"), value)
    })
}

/// Load and render the template `name`
#[instrument(skip(params))]
pub fn render_template(
    name: &str,
    params: &TemplateParams,
    override_dir: Option<&Path>,
    policy: PlaceholderPolicy,
) -> Result<String> {
    let text = match override_dir {
        Some(dir) => {
            let path = template_path(name, dir);
            debug!("Rendering template from {}", path.display());
            fs::read_to_string(&path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => WharfError::TemplateNotFound(path.clone()),
                _ => WharfError::Io(e),
            })?
        }
        None => {
            debug!("Rendering built-in template {}", name);
            builtin_template(name)
                .ok_or_else(|| {
                    WharfError::TemplateNotFound(template_path(name, Path::new(BUILTIN_DIR)))
                })?
                .to_string()
        }
    };

    let rendered = substitute(&text, params);

    if policy == PlaceholderPolicy::Strict {
        if let Some(key) = placeholders(&rendered).into_iter().next() {
            return Err(WharfError::MissingTemplateParameter {
                template: name.to_string(),
                key,
            });
        }
    }

    Ok(rendered)
}

/// Identifiers written as `{identifier}` in `text`, in order of appearance
fn placeholders(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let candidate = &after[..close];
                if is_identifier(candidate) {
                    found.push(candidate.to_string());
                }
                rest = &after[close + 1..];
            }
            Some(next_open) => rest = &after[next_open..],
            None => break,
        }
    }

    found
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
