//! AND composition of access dependencies.

use accessdep_core::Account;

use crate::{AccessDependency, AccessResult, Accessible};

/// Ordered AND group: every member must allow, any member may veto.
///
/// Children are evaluated in insertion order; the first forbidding child ends
/// evaluation and its reason is surfaced.
#[derive(Debug, Clone, Default)]
pub struct AccessGroupAnd {
    dependencies: Vec<AccessDependency>,
}

impl AccessGroupAnd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dependency after the existing ones.
    pub fn add_dependency(&mut self, dependency: impl Into<AccessDependency>) -> &mut Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<AccessDependency>) -> Self {
        self.add_dependency(dependency);
        self
    }

    pub fn dependencies(&self) -> &[AccessDependency] {
        &self.dependencies
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl Accessible for AccessGroupAnd {
    fn access(&self, operation: &str, account: &Account, detailed: bool) -> AccessResult {
        let mut children = self.dependencies.iter().enumerate();

        // Seed with the first child so an all-allowed group stays allowed.
        let Some((_, first)) = children.next() else {
            return AccessResult::neutral(None);
        };
        let mut combined = first.access(operation, account, true);

        if !combined.is_forbidden() {
            for (index, dependency) in children {
                combined = combined.and_if(dependency.access(operation, account, true));
                if combined.is_forbidden() {
                    tracing::debug!(
                        operation,
                        account = %account.id(),
                        index,
                        "access group stopped at forbidding dependency"
                    );
                    break;
                }
            }
        }

        tracing::trace!(
            operation,
            verdict = %combined.verdict(),
            children = self.dependencies.len(),
            "access group evaluated"
        );

        if detailed { combined } else { combined.without_reason() }
    }
}

impl FromIterator<AccessDependency> for AccessGroupAnd {
    fn from_iter<I: IntoIterator<Item = AccessDependency>>(iter: I) -> Self {
        Self {
            dependencies: iter.into_iter().collect(),
        }
    }
}

impl Extend<AccessDependency> for AccessGroupAnd {
    fn extend<I: IntoIterator<Item = AccessDependency>>(&mut self, iter: I) {
        self.dependencies.extend(iter);
    }
}
