use std::fs;
use std::path::Path;

use fortigate_api::Record;
use serde::Deserialize;
use thiserror::Error;

/// Policy fields referencing security profiles by name.
const PROFILE_FIELDS: [&str; 4] = [
    "application-list",
    "profile-protocol-options",
    "ips-sensor",
    "webfilter-profile",
];

/// Changes applied to each policy right before it is pushed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyRewrite {
    /// Profile reference fields pointed at `replacement` when non-empty.
    pub fields: Vec<String>,
    pub replacement: String,
    /// Enable logging of all traffic on every copied policy.
    #[serde(default)]
    pub log_all_traffic: bool,
    /// Drop policy comments (they may contain characters the destination
    /// firmware rejects).
    #[serde(default)]
    pub strip_comments: bool,
}

impl Default for PolicyRewrite {
    fn default() -> Self {
        default_policy_rewrite()
    }
}

impl PolicyRewrite {
    pub fn apply(&self, policy: &mut Record) {
        for field in &self.fields {
            if policy.is_truthy(field) {
                policy.insert(field.as_str(), self.replacement.as_str());
            }
        }
        if self.log_all_traffic {
            policy.insert("logtraffic", "all");
            policy.insert("logtraffic-start", "enable");
        }
        if self.strip_comments {
            policy.remove("comments");
        }
    }
}

/// Errors returned when loading a rewrite file.
#[derive(Debug, Error)]
pub enum RewriteLoadError {
    #[error("failed to read rewrite file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse rewrite file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a policy rewrite from a TOML file.
pub fn load_policy_rewrite(path: &Path) -> Result<PolicyRewrite, RewriteLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| RewriteLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_rewrite(&raw, path.display().to_string())
}

/// Built-in rewrite shipped with the tool.
pub fn default_policy_rewrite() -> PolicyRewrite {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/rewrites/policy.toml"
    ));
    match parse_rewrite(embedded, "embedded rewrite".to_string()) {
        Ok(rewrite) if !rewrite.fields.is_empty() => rewrite,
        _ => fallback_policy_rewrite(),
    }
}

fn parse_rewrite(raw: &str, path: String) -> Result<PolicyRewrite, RewriteLoadError> {
    toml::from_str(raw).map_err(|source| RewriteLoadError::Parse { path, source })
}

fn fallback_policy_rewrite() -> PolicyRewrite {
    PolicyRewrite {
        fields: PROFILE_FIELDS.iter().map(|f| f.to_string()).collect(),
        replacement: "default".to_string(),
        log_all_traffic: false,
        strip_comments: false,
    }
}
