//! # Access Gate - role and permission checks for scoped content
//!
//! Declares the acting user's roles once, then lets nested code ask
//! "does the user have permission X?" or "does the user have role Y?" and
//! choose between protected content and a fallback.
//!
//! ## Pieces
//!
//! - **Role Registry** (`RoleRegistry`) - catalogue of roles and their permissions
//! - **Role Assignment** (`RoleAssignment`) - role names granted to the user
//! - **Access Evaluator** (`AccessContext::resolve`) - immutable snapshot answering checks
//! - **Permission Scope** (`with_permissions`, `use_permissions`) - thread-local context
//! - **Access Gate** (`Gate`) - branch selection guarded by permission and/or role
//!
//! ```text
//!   RoleRegistry + RoleAssignment
//!              │
//!              ▼
//!       AccessContext (Arc, immutable)
//!              │  with_permissions / PermissionScope::enter
//!              ▼
//!     use_permissions() ──► Gate::render_or(protected, fallback)
//! ```
//!
//! ## Example
//!
//! ```
//! use access_gate::{use_permissions, with_permissions, Gate, Role, RoleAssignment, RoleRegistry};
//!
//! let roles = RoleRegistry::from(vec![
//!     Role::new("admin", ["create:users", "edit:users", "delete:users"]),
//!     Role::new("editor", ["edit:users"]),
//! ]);
//! let user_roles = RoleAssignment::from(vec!["editor"]);
//!
//! with_permissions(&roles, &user_roles, || {
//!     let ctx = use_permissions().unwrap();
//!     assert!(ctx.has_permission("edit:users"));
//!     assert!(!ctx.has_role("admin"));
//!
//!     let shown = Gate::new().role("admin").render("Admin panel").unwrap();
//!     assert_eq!(shown, None);
//! });
//! ```

pub mod config;
pub mod errors;
pub mod rbac;

pub use config::PolicyConfig;
pub use errors::AccessError;
pub use rbac::{
    in_scope, use_permissions, with_context, with_permissions, AccessContext, Decision, Gate,
    Permission, PermissionScope, Role, RoleAssignment, RoleRegistry, ScopeGuard,
};

/// Version of the policy file format
pub const VERSION: &str = "0.1.0";
