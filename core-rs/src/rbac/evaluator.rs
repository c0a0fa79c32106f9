//! Access Evaluator
//!
//! Resolves a role registry and a user role assignment into an immutable
//! `AccessContext` that answers permission and role questions.
//!
//! Resolution never fails: unknown assigned roles, an empty registry and an
//! empty assignment are all ordinary inputs that simply grant nothing.

use crate::rbac::role::{Permission, Role, RoleAssignment, RoleRegistry};
use serde::Serialize;
use tracing::debug;

/// Resolved Access Context - snapshot of what the acting user may do
///
/// Built from scratch for every registry/assignment pair and never mutated
/// afterwards. Share it behind an `Arc` and resolve a new one when either
/// input changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessContext {
    granted_roles: Vec<Role>,
    assignment: RoleAssignment,
}

impl AccessContext {
    /// Resolve the roles granted to the user
    ///
    /// # Arguments
    /// * `registry` - Catalogue of known roles
    /// * `assignment` - Role names assigned to the user
    ///
    /// # Returns
    /// Context whose granted roles are the registry entries named in the
    /// assignment, in registry order (every duplicate occurrence included)
    pub fn resolve(registry: &RoleRegistry, assignment: &RoleAssignment) -> Self {
        let granted_roles: Vec<Role> = registry
            .iter()
            .filter(|role| assignment.contains(&role.name))
            .cloned()
            .collect();

        let context = AccessContext {
            granted_roles,
            assignment: assignment.clone(),
        };

        debug!(
            registry = registry.len(),
            assigned = assignment.len(),
            granted = context.granted_roles.len(),
            unknown = ?context.unknown_roles(),
            "Resolved access context"
        );

        context
    }

    /// Context with no roles: every check returns false
    pub fn empty() -> Self {
        AccessContext {
            granted_roles: Vec::new(),
            assignment: RoleAssignment::new(),
        }
    }

    /// Check if any granted role lists `permission`
    ///
    /// Exact, case-sensitive comparison with no normalization.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.granted_roles.iter().any(|role| role.grants(permission))
    }

    /// Check if `role_name` appears in the raw assignment
    ///
    /// Answers from the assignment list, not from the granted roles: a name
    /// that matches no registry entry still satisfies `has_role` while
    /// granting no permissions.
    pub fn has_role(&self, role_name: &str) -> bool {
        self.assignment.contains(role_name)
    }

    /// Check if the user holds at least one of the roles
    pub fn has_any_role(&self, role_names: &[&str]) -> bool {
        role_names.iter().any(|name| self.has_role(name))
    }

    /// Check if the user holds all of the roles
    ///
    /// An empty list is vacuously satisfied.
    pub fn has_all_roles(&self, role_names: &[&str]) -> bool {
        role_names.iter().all(|name| self.has_role(name))
    }

    /// Registry roles granted to the user, in registry order
    pub fn granted_roles(&self) -> &[Role] {
        &self.granted_roles
    }

    /// The assignment this context was resolved from
    pub fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    /// Sorted, de-duplicated permissions held via granted roles
    pub fn permissions(&self) -> Vec<Permission> {
        let mut perms: Vec<Permission> = self
            .granted_roles
            .iter()
            .flat_map(|role| role.permissions.iter().cloned())
            .collect();
        perms.sort();
        perms.dedup();
        perms
    }

    /// Assigned role names that matched no registry entry
    pub fn unknown_roles(&self) -> Vec<&str> {
        self.assignment
            .iter()
            .filter(|name| !self.granted_roles.iter().any(|role| &role.name == *name))
            .map(String::as_str)
            .collect()
    }
}
