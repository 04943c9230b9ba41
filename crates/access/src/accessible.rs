use accessdep_core::Account;

use crate::AccessResult;

/// Anything that can decide access for an operation performed by an account.
///
/// `detailed` asks for a result that explains itself; implementations may skip
/// building a reason when it is `false`.
pub trait Accessible: Send + Sync {
    fn access(&self, operation: &str, account: &Account, detailed: bool) -> AccessResult;
}

/// A fixed decision, regardless of operation or account.
impl Accessible for AccessResult {
    fn access(&self, _operation: &str, _account: &Account, detailed: bool) -> AccessResult {
        if detailed {
            self.clone()
        } else {
            self.clone().without_reason()
        }
    }
}

/// Adapter turning a closure into an [`Accessible`].
#[derive(Clone)]
pub struct AccessFn<F>(F);

impl<F> core::fmt::Debug for AccessFn<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AccessFn")
    }
}

impl<F> Accessible for AccessFn<F>
where
    F: Fn(&str, &Account, bool) -> AccessResult + Send + Sync,
{
    fn access(&self, operation: &str, account: &Account, detailed: bool) -> AccessResult {
        (self.0)(operation, account, detailed)
    }
}

pub fn access_fn<F>(f: F) -> AccessFn<F>
where
    F: Fn(&str, &Account, bool) -> AccessResult + Send + Sync,
{
    AccessFn(f)
}
