use alloc::borrow::Cow;
use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// AccessError

/// Errors reported by accessors, the accessor cache and dynamic objects.
///
/// All of them are contract violations of the caller, reported synchronously.
/// When argument validation is disabled, the descriptive variants
/// (`InvalidArgument`, `MemberNotFound`, `TypeMismatch`) are not produced on
/// the hot path; whatever the underlying assignment or binding reports
/// (usually [`InvalidCast`](Self::InvalidCast)) is returned instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("Invalid argument `{param}`: {reason}")]
    InvalidArgument {
        param: &'static str,
        reason: Cow<'static, str>,
    },

    #[error("Member `{member}` not found")]
    MemberNotFound { member: String },

    #[error("Value for member `{member}` must be of type `{expected}`, found `{found}`")]
    TypeMismatch {
        member: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("Unable to cast `{found}` to `{expected}`")]
    InvalidCast {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Late-bound object does not contain a definition for `{member}`")]
    LateBinding { member: String },
}

impl AccessError {
    #[inline]
    pub(crate) fn invalid_argument(
        param: &'static str,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn member_not_found(member: &str) -> Self {
        Self::MemberNotFound {
            member: member.into(),
        }
    }
}
