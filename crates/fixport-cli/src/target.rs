//! Deployment target resolution.
//!
//! A target pairs a version string with the hostname serving it. Staging
//! always deploys under a `staging` version (optionally suffixed); production
//! deploys under the configured base version unless overridden. A
//! non-default version is served from the versioned hostname.

use crate::cli::TargetKind;
use crate::config::ProjectConfig;

/// A resolved deployment target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployTarget {
    pub kind: TargetKind,
    /// Version string the packaging tool deploys under.
    pub version: String,
    /// Hostname serving this version.
    pub host: String,
}

/// Resolve a target from the CLI selection and project config.
pub fn resolve_target(
    kind: TargetKind,
    version_override: Option<&str>,
    config: &ProjectConfig,
) -> DeployTarget {
    let app = &config.project.application;
    let domain = &config.project.domain;
    match kind {
        TargetKind::Staging => {
            let version = match version_override {
                Some(v) => format!("staging-{v}"),
                None => "staging".to_string(),
            };
            let host = format!("{version}.latest.{app}.{domain}");
            DeployTarget { kind, version, host }
        }
        TargetKind::Production => match version_override {
            Some(v) => DeployTarget {
                kind,
                version: v.to_string(),
                host: format!("{v}.latest.{app}.{domain}"),
            },
            None => DeployTarget {
                kind,
                version: config.project.version.clone(),
                host: format!("{app}.{domain}"),
            },
        },
    }
}
