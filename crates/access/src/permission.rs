use accessdep_core::{Account, Permission};

use crate::{AccessResult, Accessible};

/// Leaf that allows any operation to accounts holding a permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    permission: Permission,
}

impl PermissionCheck {
    pub fn new(permission: impl Into<Permission>) -> Self {
        Self {
            permission: permission.into(),
        }
    }

    pub fn permission(&self) -> &Permission {
        &self.permission
    }
}

impl Accessible for PermissionCheck {
    fn access(&self, _operation: &str, account: &Account, detailed: bool) -> AccessResult {
        let result = AccessResult::allowed_if_has_permission(account, &self.permission);
        if detailed { result } else { result.without_reason() }
    }
}
