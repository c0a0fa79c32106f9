// Permission Scope Contract Tests
//
// Context access outside a scope is a programming mistake and must fail fast
// with a stable message. It must never silently default to "no access".

use access_gate::{
    in_scope, use_permissions, with_permissions, AccessError, Decision, Gate, PermissionScope,
    Role, RoleAssignment, RoleRegistry,
};

fn registry() -> RoleRegistry {
    RoleRegistry::from(vec![
        Role::new("admin", ["create:users", "edit:users", "delete:users"]),
        Role::new("editor", ["edit:users"]),
        Role::new("viewer", ["view:users"]),
    ])
}

/// WHY: Missing scope surfaces as ScopeMissing with a fixed message
/// BREAKS: Integration mistakes going unnoticed as silent denials
#[test]
fn context_access_outside_scope_fails_with_stable_message() {
    match use_permissions() {
        Err(AccessError::ScopeMissing) => {}
        other => panic!("Expected ScopeMissing, got {:?}", other.map(|_| ())),
    }

    let err = Gate::new().permission("edit:users").render("x").unwrap_err();
    assert_eq!(err.to_string(), "use_permissions must be used within a permission scope");
}

/// WHY: Gates inside a scope render protected content, fallback, or nothing
#[test]
fn gates_inside_scope_render_per_decision() {
    let roles = registry();
    let user_roles = RoleAssignment::from(vec!["editor"]);

    with_permissions(&roles, &user_roles, || {
        let shown = Gate::new().permission("edit:users").render("Protected Content").unwrap();
        assert_eq!(shown, Some("Protected Content"));

        let shown = Gate::new()
            .permission("delete:users")
            .render_or("Protected Content", "Access Denied")
            .unwrap();
        assert_eq!(shown, "Access Denied");

        let shown = Gate::new().role("admin").render("Admin Only").unwrap();
        assert_eq!(shown, None);
    });
}

/// WHY: A new assignment means a new scope; the old snapshot is not reused
#[test]
fn reassignment_is_observed_by_new_scope() {
    let roles = registry();
    let gate = Gate::new().permission("edit:users").role("editor");

    let before = with_permissions(&roles, &RoleAssignment::from(vec!["editor"]), || gate.check().unwrap());
    let after = with_permissions(&roles, &RoleAssignment::from(vec!["admin"]), || gate.check().unwrap());

    assert_eq!(before, Decision::Granted);
    assert_eq!(after, Decision::Denied);
}

/// WHY: Scopes end at their boundary
/// BREAKS: Contexts leaking into unrelated code after a subtree is done
#[test]
fn scope_ends_with_guard() {
    {
        let _guard = PermissionScope::enter_resolved(&registry(), &RoleAssignment::from(vec!["viewer"]));
        assert!(in_scope());
        assert!(use_permissions().unwrap().has_permission("view:users"));
    }

    assert!(!in_scope());
    assert!(use_permissions().is_err());
}
