use serde::{Deserialize, Serialize};

use crate::{AccountId, Permission};

/// The acting subject of an access check.
///
/// Construction is decoupled from sessions and storage: callers build the
/// account from whatever authentication source they have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    permissions: Vec<Permission>,
}

impl Account {
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            permissions: Vec::new(),
        }
    }

    /// A fresh account holding no permissions.
    pub fn anonymous() -> Self {
        Self::new(AccountId::new())
    }

    pub fn with_permission(mut self, permission: impl Into<Permission>) -> Self {
        let permission = permission.into();
        if !self.permissions.contains(&permission) {
            self.permissions.push(permission);
        }
        self
    }

    pub fn with_permissions<I, P>(self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        permissions
            .into_iter()
            .fold(self, |account, p| account.with_permission(p))
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Whether the account holds `permission`, directly or via the wildcard.
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| p.is_wildcard() || p == permission)
    }
}
