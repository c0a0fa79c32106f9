/**
 * config.rs
 * Parser for access policy files (YAML format)
 *
 * Format:
 * ```yaml
 * apiVersion: accessgate/v1
 * kind: Policy
 * spec:
 *   roles:
 *     - name: admin
 *       permissions: ["create:users", "edit:users", "delete:users"]
 *     - name: editor
 *       permissions: ["edit:users"]
 *   userRoles: [editor]
 * ```
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::errors::AccessError;
use crate::rbac::{AccessContext, RoleAssignment, RoleRegistry};

/// Expected `apiVersion` header
pub const API_VERSION: &str = "accessgate/v1";

/// Expected `kind` header
pub const KIND: &str = "Policy";

/// Policy file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    pub api_version: String,
    pub kind: String,
    pub spec: PolicySpec,
}

/// Policy specification
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicySpec {
    /// Role catalogue
    #[serde(default)]
    pub roles: RoleRegistry,
    /// Roles assigned to the acting user
    #[serde(default)]
    pub user_roles: RoleAssignment,
}

impl PolicyConfig {
    /// Load a policy file from `path`
    ///
    /// # Example
    /// ```no_run
    /// # use access_gate::PolicyConfig;
    /// let config = PolicyConfig::load("policy.yaml")?;
    /// let ctx = config.resolve();
    /// # Ok::<(), access_gate::AccessError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AccessError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AccessError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a policy from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, AccessError> {
        let config: PolicyConfig = serde_yaml::from_str(content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate policy structure
    ///
    /// Ensures:
    /// - apiVersion is "accessgate/v1"
    /// - kind is "Policy"
    /// - every role has a non-empty name
    ///
    /// Empty catalogues and empty assignments are valid. Duplicate role
    /// names are accepted and only logged.
    pub fn validate(&self) -> Result<(), AccessError> {
        if self.api_version != API_VERSION {
            return Err(AccessError::ValidationError(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(AccessError::ValidationError(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if let Some(pos) = self.spec.roles.iter().position(|r| r.name.is_empty()) {
            return Err(AccessError::ValidationError(format!(
                "spec.roles[{}].name cannot be empty",
                pos
            )));
        }

        for name in self.spec.roles.duplicate_names() {
            warn!(role = name, "Role defined more than once; all definitions apply");
        }

        Ok(())
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.spec.roles
    }

    pub fn assignment(&self) -> &RoleAssignment {
        &self.spec.user_roles
    }

    /// Resolve the policy's own assignment against its roles
    pub fn resolve(&self) -> AccessContext {
        AccessContext::resolve(&self.spec.roles, &self.spec.user_roles)
    }

    /// Resolve a different assignment against the policy's roles
    pub fn resolve_as(&self, user_roles: &RoleAssignment) -> AccessContext {
        AccessContext::resolve(&self.spec.roles, user_roles)
    }
}
