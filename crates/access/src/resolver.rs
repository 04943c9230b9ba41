//! Per-owner storage of a single, composed access dependency.
//!
//! Owning types embed an [`AccessDependencyResolver`] and implement
//! [`DependentAccess`] / [`RefinableDependentAccess`] to expose it; the traits
//! forward `get`/`set`/`add` to the embedded resolver.

use crate::{AccessDependency, AccessGroupAnd};

/// Holds zero or one access dependency.
///
/// Multiple dependencies are only ever represented as an [`AccessGroupAnd`]
/// inside the single slot.
#[derive(Debug, Clone, Default)]
pub struct AccessDependencyResolver {
    current: Option<AccessDependency>,
}

impl AccessDependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access_dependency(&self) -> Option<&AccessDependency> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Replace whatever was stored. The previous dependency is dropped, not merged.
    pub fn set_access_dependency(&mut self, dependency: impl Into<AccessDependency>) {
        let dependency = dependency.into();
        tracing::trace!(
            replaced = self.current.is_some(),
            group = dependency.is_group(),
            "access dependency set"
        );
        self.current = Some(dependency);
    }

    /// Merge `dependency` into the stored one with AND semantics.
    ///
    /// - nothing stored: same as [`Self::set_access_dependency`]
    /// - a group stored: `dependency` is appended to that group
    /// - anything else stored: a new group `[stored, dependency]` replaces it
    pub fn add_access_dependency(&mut self, dependency: impl Into<AccessDependency>) {
        let dependency = dependency.into();
        match self.current.as_mut() {
            None => {
                tracing::trace!("access dependency added to empty resolver");
                self.current = Some(dependency);
            }
            Some(AccessDependency::And(group)) => {
                group.add_dependency(dependency);
                tracing::trace!(children = group.len(), "access dependency appended to group");
            }
            Some(AccessDependency::Leaf(_)) => {
                let Some(old) = self.current.take() else {
                    return;
                };
                let group = AccessGroupAnd::new()
                    .with_dependency(old)
                    .with_dependency(dependency);
                tracing::trace!("access dependency wrapped with existing one in a new group");
                self.current = Some(group.into());
            }
        }
    }

    /// Remove and return the stored dependency, leaving the resolver empty.
    pub fn take_access_dependency(&mut self) -> Option<AccessDependency> {
        self.current.take()
    }
}

/// An object whose access depends on another access decision.
pub trait DependentAccess {
    fn access_dependency_resolver(&self) -> &AccessDependencyResolver;

    fn access_dependency(&self) -> Option<&AccessDependency> {
        self.access_dependency_resolver().access_dependency()
    }
}

/// A [`DependentAccess`] object whose dependency can be replaced or refined.
pub trait RefinableDependentAccess: DependentAccess {
    fn access_dependency_resolver_mut(&mut self) -> &mut AccessDependencyResolver;

    fn set_access_dependency(&mut self, dependency: impl Into<AccessDependency>)
    where
        Self: Sized,
    {
        self.access_dependency_resolver_mut()
            .set_access_dependency(dependency);
    }

    fn add_access_dependency(&mut self, dependency: impl Into<AccessDependency>)
    where
        Self: Sized,
    {
        self.access_dependency_resolver_mut()
            .add_access_dependency(dependency);
    }
}

impl DependentAccess for AccessDependencyResolver {
    fn access_dependency_resolver(&self) -> &AccessDependencyResolver {
        self
    }
}

impl RefinableDependentAccess for AccessDependencyResolver {
    fn access_dependency_resolver_mut(&mut self) -> &mut AccessDependencyResolver {
        self
    }
}
