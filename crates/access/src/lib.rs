//! `accessdep-access` — composable access dependencies.
//!
//! An owning object declares which access decision its own access depends on.
//! Dependencies can be replaced outright or merged into an AND group, and the
//! stored dependency is evaluated like any other [`Accessible`].
//!
//! This crate is intentionally decoupled from storage, sessions and transport.

pub mod accessible;
pub mod dependency;
pub mod error;
pub mod group;
pub mod permission;
pub mod resolver;
pub mod result;

pub use accessible::{AccessFn, Accessible, access_fn};
pub use dependency::AccessDependency;
pub use error::{AccessDenied, ParseVerdictError};
pub use group::AccessGroupAnd;
pub use permission::PermissionCheck;
pub use resolver::{AccessDependencyResolver, DependentAccess, RefinableDependentAccess};
pub use result::{AccessResult, Cacheability, MaxAge, Verdict};
