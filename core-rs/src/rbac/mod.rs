//! RBAC (Role-Based Access Control) module
//!
//! Resolves a role registry and a user's role assignment into an access
//! context, exposes that context to nested code through permission scopes,
//! and gates content on permission and role checks.

pub mod evaluator;
pub mod gate;
pub mod role;
pub mod scope;

pub use evaluator::AccessContext;
pub use gate::{Decision, Gate};
pub use role::{Permission, Role, RoleAssignment, RoleRegistry};
pub use scope::{in_scope, use_permissions, with_context, with_permissions, PermissionScope, ScopeGuard};
