//! Role data model
//!
//! Roles are named bundles of opaque permission tokens. The registry is the
//! catalogue of known roles, the assignment is the list of role names granted
//! to the acting user. Both are supplied by the surrounding application.

use serde::{Deserialize, Serialize};

/// Opaque, case-sensitive capability token (e.g. `"edit:users"`)
pub type Permission = String;

/// Named bundle of permissions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Role name, the lookup key within a registry
    pub name: String,

    /// Permissions granted by this role (treated as a set)
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Create a role from a name and its permissions
    pub fn new<N, I, P>(name: N, permissions: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Role {
            name: name.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this role lists the permission (exact match)
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Ordered catalogue of roles, keyed by name
///
/// Duplicate names are tolerated: every occurrence takes part in resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RoleRegistry(Vec<Role>);

impl RoleRegistry {
    pub fn new() -> Self {
        RoleRegistry(Vec::new())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Role> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First role registered under `name`
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.0.iter().find(|r| r.name == name)
    }

    /// Role names in registry order
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|r| r.name.as_str()).collect()
    }

    /// Names that occur more than once, in order of first repetition
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut dupes: Vec<&str> = Vec::new();
        for (i, role) in self.0.iter().enumerate() {
            let name = role.name.as_str();
            if self.0[..i].iter().any(|r| r.name == name) && !dupes.contains(&name) {
                dupes.push(name);
            }
        }
        dupes
    }

    pub fn as_slice(&self) -> &[Role] {
        &self.0
    }
}

impl From<Vec<Role>> for RoleRegistry {
    fn from(roles: Vec<Role>) -> Self {
        RoleRegistry(roles)
    }
}

impl FromIterator<Role> for RoleRegistry {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        RoleRegistry(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RoleRegistry {
    type Item = &'a Role;
    type IntoIter = std::slice::Iter<'a, Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Role names granted to the acting user, in assignment order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RoleAssignment(Vec<String>);

impl RoleAssignment {
    pub fn new() -> Self {
        RoleAssignment(Vec::new())
    }

    /// Check if `name` was assigned (exact match)
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for RoleAssignment {
    fn from(names: Vec<String>) -> Self {
        RoleAssignment(names)
    }
}

impl From<Vec<&str>> for RoleAssignment {
    fn from(names: Vec<&str>) -> Self {
        RoleAssignment(names.into_iter().map(str::to_string).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for RoleAssignment {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        RoleAssignment(iter.into_iter().map(Into::into).collect())
    }
}
