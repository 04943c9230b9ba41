use std::sync::Arc;

use accessdep_core::Account;

use crate::{AccessGroupAnd, AccessResult, Accessible};

/// What an owning object's access depends on.
///
/// Only AND groups are special-cased when merging, so the set of variants is
/// closed: a leaf wrapping any [`Accessible`], or an [`AccessGroupAnd`].
#[derive(Clone)]
pub enum AccessDependency {
    Leaf(Arc<dyn Accessible>),
    And(AccessGroupAnd),
}

impl AccessDependency {
    pub fn leaf<A>(accessible: A) -> Self
    where
        A: Accessible + 'static,
    {
        Self::Leaf(Arc::new(accessible))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::And(_))
    }

    pub fn as_leaf(&self) -> Option<&Arc<dyn Accessible>> {
        match self {
            Self::Leaf(accessible) => Some(accessible),
            Self::And(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&AccessGroupAnd> {
        match self {
            Self::And(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    /// Identity comparison: leaves must share the same allocation, groups
    /// must hold pairwise identical children in the same order.
    pub fn ptr_eq(&self, other: &AccessDependency) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Arc::ptr_eq(a, b),
            (Self::And(a), Self::And(b)) => {
                a.len() == b.len()
                    && a
                        .dependencies()
                        .iter()
                        .zip(b.dependencies())
                        .all(|(x, y)| x.ptr_eq(y))
            }
            _ => false,
        }
    }
}

impl Accessible for AccessDependency {
    fn access(&self, operation: &str, account: &Account, detailed: bool) -> AccessResult {
        match self {
            Self::Leaf(accessible) => accessible.access(operation, account, detailed),
            Self::And(group) => group.access(operation, account, detailed),
        }
    }
}

impl core::fmt::Debug for AccessDependency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Leaf(accessible) => f
                .debug_tuple("Leaf")
                .field(&Arc::as_ptr(accessible))
                .finish(),
            Self::And(group) => f.debug_tuple("And").field(group).finish(),
        }
    }
}

impl From<Arc<dyn Accessible>> for AccessDependency {
    fn from(value: Arc<dyn Accessible>) -> Self {
        Self::Leaf(value)
    }
}

impl From<AccessGroupAnd> for AccessDependency {
    fn from(value: AccessGroupAnd) -> Self {
        Self::And(value)
    }
}

impl From<AccessResult> for AccessDependency {
    fn from(value: AccessResult) -> Self {
        Self::leaf(value)
    }
}
