//! Access Gate
//!
//! Chooses between protected content and a fallback based on an optional
//! required permission and an optional required role. The decision is made
//! fresh on every call from the current context; nothing is cached.

use crate::errors::Result;
use crate::rbac::evaluator::AccessContext;
use crate::rbac::role::Permission;
use crate::rbac::scope::use_permissions;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Outcome of a gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Granted,
    Denied,
}

impl Decision {
    pub fn is_granted(self) -> bool {
        self == Decision::Granted
    }
}

impl From<bool> for Decision {
    fn from(granted: bool) -> Self {
        if granted {
            Decision::Granted
        } else {
            Decision::Denied
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Granted => write!(f, "GRANTED"),
            Decision::Denied => write!(f, "DENIED"),
        }
    }
}

/// Gate guarded by an optional permission and an optional role
///
/// Both constraints are independent and combined with AND. A gate with
/// neither constraint always grants.
///
/// # Example
/// ```
/// use access_gate::{with_permissions, Gate, Role, RoleAssignment, RoleRegistry};
///
/// let roles = RoleRegistry::from(vec![Role::new("editor", ["edit:users"])]);
/// let user_roles = RoleAssignment::from(vec!["editor"]);
///
/// let shown = with_permissions(&roles, &user_roles, || {
///     Gate::new().permission("edit:users").render_or("Edit form", "Access denied")
/// });
/// assert_eq!(shown.unwrap(), "Edit form");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<String>,
}

impl Gate {
    /// Gate with no constraints
    pub fn new() -> Self {
        Gate::default()
    }

    /// Require `permission` via some granted role
    pub fn permission(mut self, permission: impl Into<Permission>) -> Self {
        self.required_permission = Some(permission.into());
        self
    }

    /// Require `role` in the user's assignment
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.required_role = Some(role.into());
        self
    }

    /// Apply the decision rule against `context`
    pub fn decide(&self, context: &AccessContext) -> Decision {
        let permission_ok = self
            .required_permission
            .as_deref()
            .map_or(true, |p| context.has_permission(p));
        let role_ok = self
            .required_role
            .as_deref()
            .map_or(true, |r| context.has_role(r));

        let decision = Decision::from(permission_ok && role_ok);
        trace!(
            permission = ?self.required_permission,
            role = ?self.required_role,
            %decision,
            "Gate evaluated"
        );
        decision
    }

    /// Pick `protected` or `fallback` for an explicit context
    pub fn select<T>(&self, context: &AccessContext, protected: T, fallback: T) -> T {
        match self.decide(context) {
            Decision::Granted => protected,
            Decision::Denied => fallback,
        }
    }

    /// Decide against the current scope's context
    ///
    /// # Errors
    /// `AccessError::ScopeMissing` outside any permission scope
    pub fn check(&self) -> Result<Decision> {
        let context = use_permissions()?;
        Ok(self.decide(&context))
    }

    /// Protected content, or nothing when access is denied
    pub fn render<T>(&self, protected: T) -> Result<Option<T>> {
        Ok(self.check()?.is_granted().then_some(protected))
    }

    /// Protected content, or `fallback` when access is denied
    pub fn render_or<T>(&self, protected: T, fallback: T) -> Result<T> {
        let context = use_permissions()?;
        Ok(self.select(&context, protected, fallback))
    }

    /// Build only the selected branch
    pub fn render_with<T>(
        &self,
        protected: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> Result<T> {
        Ok(match self.check()? {
            Decision::Granted => protected(),
            Decision::Denied => fallback(),
        })
    }
}
