//! Access results: a three-valued verdict plus the metadata needed to cache it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use accessdep_core::{Account, Permission};

use crate::error::{AccessDenied, ParseVerdictError};

/// Cache context that varies a result by the account's permissions.
pub const PERMISSIONS_CACHE_CONTEXT: &str = "user.permissions";

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Allowed,
    Neutral,
    Forbidden,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Neutral => "neutral",
            Self::Forbidden => "forbidden",
        }
    }
}

impl core::fmt::Display for Verdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allowed" => Ok(Self::Allowed),
            "neutral" => Ok(Self::Neutral),
            "forbidden" => Ok(Self::Forbidden),
            _ => Err(ParseVerdictError(s.to_string())),
        }
    }
}

/// How long a result may be cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxAge {
    #[default]
    Permanent,
    Seconds(u32),
}

impl MaxAge {
    /// The stricter of two lifetimes.
    pub fn min(self, other: MaxAge) -> MaxAge {
        match (self, other) {
            (MaxAge::Permanent, other) | (other, MaxAge::Permanent) => other,
            (MaxAge::Seconds(a), MaxAge::Seconds(b)) => MaxAge::Seconds(a.min(b)),
        }
    }
}

/// Cacheability metadata carried by every [`AccessResult`].
///
/// Contexts name the request dimensions the result varies by, tags name the
/// data whose invalidation must invalidate the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cacheability {
    pub contexts: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub max_age: MaxAge,
}

impl Cacheability {
    /// Union of contexts and tags, minimum of the max-ages.
    pub fn merge(mut self, other: &Cacheability) -> Cacheability {
        self.contexts.extend(other.contexts.iter().cloned());
        self.tags.extend(other.tags.iter().cloned());
        self.max_age = self.max_age.min(other.max_age);
        self
    }
}

/// Result of evaluating access for an operation.
///
/// A value type: builders consume `self` and return a new result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessResult {
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    cacheability: Cacheability,
}

impl AccessResult {
    fn with_verdict(verdict: Verdict, reason: Option<String>) -> Self {
        Self {
            verdict,
            reason,
            cacheability: Cacheability::default(),
        }
    }

    pub fn allowed() -> Self {
        Self::with_verdict(Verdict::Allowed, None)
    }

    /// No opinion. The reason, if any, explains what would have been needed.
    pub fn neutral(reason: impl Into<Option<String>>) -> Self {
        Self::with_verdict(Verdict::Neutral, reason.into())
    }

    pub fn forbidden(reason: impl Into<Option<String>>) -> Self {
        Self::with_verdict(Verdict::Forbidden, reason.into())
    }

    /// Allowed when `condition` holds, neutral otherwise.
    pub fn allowed_if(condition: bool) -> Self {
        if condition {
            Self::allowed()
        } else {
            Self::neutral(None)
        }
    }

    /// Forbidden with `reason` when `condition` holds, neutral otherwise.
    pub fn forbidden_if(condition: bool, reason: impl Into<String>) -> Self {
        if condition {
            Self::forbidden(Some(reason.into()))
        } else {
            Self::neutral(None)
        }
    }

    /// Allowed when the account holds `permission`.
    ///
    /// Varies by the account's permissions, so the result carries the
    /// [`PERMISSIONS_CACHE_CONTEXT`] cache context either way.
    pub fn allowed_if_has_permission(account: &Account, permission: &Permission) -> Self {
        let result = if account.has_permission(permission) {
            Self::allowed()
        } else {
            Self::neutral(Some(format!("The '{permission}' permission is required.")))
        };
        result.add_cache_context(PERMISSIONS_CACHE_CONTEXT)
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn cacheability(&self) -> &Cacheability {
        &self.cacheability
    }

    pub fn is_allowed(&self) -> bool {
        self.verdict == Verdict::Allowed
    }

    pub fn is_neutral(&self) -> bool {
        self.verdict == Verdict::Neutral
    }

    pub fn is_forbidden(&self) -> bool {
        self.verdict == Verdict::Forbidden
    }

    /// Same verdict and cacheability, reason dropped.
    pub fn without_reason(mut self) -> Self {
        self.reason = None;
        self
    }

    pub fn add_cache_context(mut self, context: impl Into<String>) -> Self {
        self.cacheability.contexts.insert(context.into());
        self
    }

    pub fn add_cache_tag(mut self, tag: impl Into<String>) -> Self {
        self.cacheability.tags.insert(tag.into());
        self
    }

    pub fn with_max_age(mut self, max_age: MaxAge) -> Self {
        self.cacheability.max_age = max_age;
        self
    }

    /// AND composition.
    ///
    /// - either operand forbidden: the first forbidden operand wins
    /// - both allowed: allowed
    /// - otherwise neutral, with the first neutral operand's reason
    ///
    /// When both operands share the winning verdict and the first has no
    /// reason, the second one's reason is used. Cacheability of both operands
    /// is always merged.
    pub fn and_if(self, other: AccessResult) -> AccessResult {
        let cacheability = self.cacheability.merge(&other.cacheability);
        let (verdict, reason) = match (self.verdict, other.verdict) {
            (Verdict::Forbidden, Verdict::Forbidden) => {
                (Verdict::Forbidden, self.reason.or(other.reason))
            }
            (Verdict::Forbidden, _) => (Verdict::Forbidden, self.reason),
            (_, Verdict::Forbidden) => (Verdict::Forbidden, other.reason),
            (Verdict::Allowed, Verdict::Allowed) => (Verdict::Allowed, None),
            (Verdict::Neutral, Verdict::Neutral) => (Verdict::Neutral, self.reason.or(other.reason)),
            (Verdict::Neutral, _) => (Verdict::Neutral, self.reason),
            (_, Verdict::Neutral) => (Verdict::Neutral, other.reason),
        };

        AccessResult {
            verdict,
            reason,
            cacheability,
        }
    }

    /// Translate into a hard failure: only an allowed result is `Ok`.
    pub fn into_result(self) -> Result<(), AccessDenied> {
        match self.verdict {
            Verdict::Allowed => Ok(()),
            Verdict::Forbidden => Err(AccessDenied::Forbidden {
                reason: self.reason,
            }),
            Verdict::Neutral => Err(AccessDenied::NotAllowed {
                reason: self.reason,
            }),
        }
    }
}

impl From<bool> for AccessResult {
    fn from(value: bool) -> Self {
        Self::allowed_if(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_wins_over_everything() {
        let result = AccessResult::neutral(Some("I have no opinion".to_string()))
            .and_if(AccessResult::forbidden(Some("Because I said so".to_string())));
        assert!(result.is_forbidden());
        assert_eq!(result.reason(), Some("Because I said so"));

        let result = AccessResult::allowed().and_if(AccessResult::forbidden(None));
        assert!(result.is_forbidden());
    }

    #[test]
    fn first_forbidden_reason_is_kept() {
        let result = AccessResult::forbidden(Some("first".to_string()))
            .and_if(AccessResult::forbidden(Some("second".to_string())));
        assert_eq!(result.reason(), Some("first"));
    }

    #[test]
    fn missing_first_reason_falls_back_to_second() {
        let result = AccessResult::forbidden(None)
            .and_if(AccessResult::forbidden(Some("Because I said so".to_string())));
        assert!(result.is_forbidden());
        assert_eq!(result.reason(), Some("Because I said so"));

        let result = AccessResult::neutral(None)
            .and_if(AccessResult::neutral(Some("I have no opinion".to_string())));
        assert!(result.is_neutral());
        assert_eq!(result.reason(), Some("I have no opinion"));

        // A reasonless forbidden operand still beats a neutral one's reason.
        let result = AccessResult::forbidden(None)
            .and_if(AccessResult::neutral(Some("I have no opinion".to_string())));
        assert!(result.is_forbidden());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn allowed_requires_both_operands() {
        assert!(AccessResult::allowed().and_if(AccessResult::allowed()).is_allowed());

        let result = AccessResult::allowed().and_if(AccessResult::neutral(Some("nope".to_string())));
        assert!(result.is_neutral());
        assert_eq!(result.reason(), Some("nope"));
    }

    #[test]
    fn and_if_merges_cacheability() {
        let a = AccessResult::allowed()
            .add_cache_context("workspace")
            .with_max_age(MaxAge::Seconds(60));
        let b = AccessResult::neutral(None)
            .add_cache_context("user.permissions")
            .add_cache_tag("workspace:vultures")
            .with_max_age(MaxAge::Seconds(30));

        let combined = a.and_if(b);
        let contexts: Vec<_> = combined.cacheability().contexts.iter().map(String::as_str).collect();
        assert_eq!(contexts, ["user.permissions", "workspace"]);
        assert!(combined.cacheability().tags.contains("workspace:vultures"));
        assert_eq!(combined.cacheability().max_age, MaxAge::Seconds(30));
    }

    #[test]
    fn max_age_min_prefers_finite_lifetimes() {
        assert_eq!(MaxAge::Permanent.min(MaxAge::Seconds(5)), MaxAge::Seconds(5));
        assert_eq!(MaxAge::Seconds(5).min(MaxAge::Permanent), MaxAge::Seconds(5));
        assert_eq!(MaxAge::Permanent.min(MaxAge::Permanent), MaxAge::Permanent);
    }

    #[test]
    fn permission_check_varies_by_permissions() {
        let permission = Permission::new("view own workspace");
        let account = Account::anonymous();

        let result = AccessResult::allowed_if_has_permission(&account, &permission);
        assert!(result.is_neutral());
        assert_eq!(result.reason(), Some("The 'view own workspace' permission is required."));
        assert!(result.cacheability().contexts.contains(PERMISSIONS_CACHE_CONTEXT));

        let account = account.with_permission(permission.clone());
        let result = AccessResult::allowed_if_has_permission(&account, &permission);
        assert!(result.is_allowed());
        assert!(result.cacheability().contexts.contains(PERMISSIONS_CACHE_CONTEXT));
    }

    #[test]
    fn conditional_constructors() {
        assert!(AccessResult::allowed_if(true).is_allowed());
        assert!(AccessResult::allowed_if(false).is_neutral());
        assert!(AccessResult::from(true).is_allowed());

        let result = AccessResult::forbidden_if(true, "locked");
        assert!(result.is_forbidden());
        assert_eq!(result.reason(), Some("locked"));
        assert!(AccessResult::forbidden_if(false, "locked").is_neutral());
    }

    #[test]
    fn into_result_only_passes_allowed() {
        assert!(AccessResult::allowed().into_result().is_ok());
        assert_eq!(
            AccessResult::forbidden(Some("Because I said so".to_string())).into_result(),
            Err(AccessDenied::Forbidden {
                reason: Some("Because I said so".to_string())
            })
        );
        assert!(matches!(
            AccessResult::neutral(None).into_result(),
            Err(AccessDenied::NotAllowed { reason: None })
        ));
    }

    #[test]
    fn verdict_parses_case_insensitively() {
        assert_eq!(" Forbidden ".parse::<Verdict>().unwrap(), Verdict::Forbidden);
        assert_eq!("neutral".parse::<Verdict>().unwrap(), Verdict::Neutral);
        assert_eq!("maybe".parse::<Verdict>(), Err(ParseVerdictError("maybe".to_string())));
    }

    #[test]
    fn serializes_for_audit() {
        let result = AccessResult::forbidden(Some("Because I said so".to_string()))
            .add_cache_tag("workspace:gravity");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["verdict"], "forbidden");
        assert_eq!(json["reason"], "Because I said so");
        assert_eq!(json["cacheability"]["tags"][0], "workspace:gravity");
        assert_eq!(json["cacheability"]["max_age"], "permanent");

        let json = serde_json::to_value(AccessResult::allowed()).unwrap();
        assert!(json.get("reason").is_none());
    }
}
