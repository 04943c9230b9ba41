//! `accessdep-core` — identity and permission primitives shared by the access layer.
//!
//! This crate has no knowledge of how access is decided; it only models *who*
//! is acting and *what* they were granted.

pub mod account;
pub mod error;
pub mod id;
pub mod permission;

pub use account::Account;
pub use error::{DomainError, DomainResult};
pub use id::AccountId;
pub use permission::Permission;
