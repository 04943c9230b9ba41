use thiserror::Error;

/// Hard failure derived from a non-allowed [`crate::AccessResult`].
///
/// Access checks never fail on their own; callers that need to abort a
/// request translate the result with [`crate::AccessResult::into_result`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("forbidden: {}", describe(.reason))]
    Forbidden { reason: Option<String> },

    #[error("not allowed: {}", describe(.reason))]
    NotAllowed { reason: Option<String> },
}

impl AccessDenied {
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Forbidden { reason } | Self::NotAllowed { reason } => reason.as_deref(),
        }
    }
}

fn describe(reason: &Option<String>) -> &str {
    reason.as_deref().unwrap_or("no reason given")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown access verdict '{0}'")]
pub struct ParseVerdictError(pub String);
