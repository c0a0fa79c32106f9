//! Permission scopes
//!
//! Makes an `AccessContext` available to code nested inside a scope without
//! threading it through every call. Scopes live on a thread-local stack:
//! entering pushes, dropping the guard pops, and the innermost scope shadows
//! outer ones until it ends. Nothing here is process-global.
//!
//! Code that already holds an `AccessContext` can skip scopes entirely and
//! call `Gate::decide` or `Gate::select` directly.

use crate::errors::{AccessError, Result};
use crate::rbac::evaluator::AccessContext;
use crate::rbac::role::{RoleAssignment, RoleRegistry};
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

thread_local! {
    static SCOPE_STACK: RefCell<Vec<(u64, Arc<AccessContext>)>> = const { RefCell::new(Vec::new()) };
    static NEXT_SCOPE_ID: Cell<u64> = const { Cell::new(0) };
}

/// Entry point for establishing permission scopes
pub struct PermissionScope;

impl PermissionScope {
    /// Make `context` the current context until the guard is dropped
    pub fn enter(context: Arc<AccessContext>) -> ScopeGuard {
        let id = NEXT_SCOPE_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        let depth = SCOPE_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push((id, context));
            stack.len()
        });
        trace!(id, depth, "Entered permission scope");

        ScopeGuard {
            id,
            depth,
            _not_send: PhantomData,
        }
    }

    /// Resolve a context from `roles`/`user_roles` and enter it
    pub fn enter_resolved(roles: &RoleRegistry, user_roles: &RoleAssignment) -> ScopeGuard {
        Self::enter(Arc::new(AccessContext::resolve(roles, user_roles)))
    }
}

/// Ends the scope it was created for when dropped
///
/// Bound to the thread that entered the scope.
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct ScopeGuard {
    id: u64,
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl ScopeGuard {
    /// Nesting depth of this scope when it was entered (1 for the outermost)
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPE_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            // Cut at this guard's own entry, taking any leaked inner scopes with
            // it. If an outer guard already removed the entry, newer scopes at
            // the same depth belong to live guards and stay.
            if let Some(pos) = stack.iter().position(|(id, _)| *id == self.id) {
                stack.truncate(pos);
            }
        });
        trace!(id = self.id, depth = self.depth, "Left permission scope");
    }
}

/// Run `f` inside a scope resolved from `roles` and `user_roles`
///
/// The scope ends when `f` returns or unwinds.
pub fn with_permissions<R>(
    roles: &RoleRegistry,
    user_roles: &RoleAssignment,
    f: impl FnOnce() -> R,
) -> R {
    let _guard = PermissionScope::enter_resolved(roles, user_roles);
    f()
}

/// Run `f` inside a scope for an already resolved context
pub fn with_context<R>(context: Arc<AccessContext>, f: impl FnOnce() -> R) -> R {
    let _guard = PermissionScope::enter(context);
    f()
}

/// Current access context
///
/// # Errors
/// `AccessError::ScopeMissing` when called outside any permission scope
pub fn use_permissions() -> Result<Arc<AccessContext>> {
    SCOPE_STACK
        .with(|stack| stack.borrow().last().map(|(_, ctx)| ctx.clone()))
        .ok_or(AccessError::ScopeMissing)
}

/// Check if a permission scope is active on this thread
pub fn in_scope() -> bool {
    SCOPE_STACK.with(|stack| !stack.borrow().is_empty())
}
