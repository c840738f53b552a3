use thiserror::Error;

use reify_types::ClassId;

/// Why a type reference could not be grounded.
///
/// Every variant means the same thing to callers: no descriptor was produced. The
/// resolver never falls back to a default type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeResolutionError {
    /// No declared supertype of the holder binds the variable.
    #[error("couldn't resolve actual type of type variable `{var}` from `{holder}`")]
    Unresolved { var: String, holder: String },
    /// More than one declared supertype binds the variable, to different types.
    #[error(
        "type variable `{var}` is ambiguous from `{holder}`: candidates {}",
        .candidates.join(", ")
    )]
    Ambiguous {
        var: String,
        holder: String,
        candidates: Vec<String>,
    },
    #[error("unknown class #{}", .0.to_raw())]
    UnknownClass(ClassId),
    #[error("`{class}` declares {expected} type parameter(s) but {found} type argument(s) were supplied")]
    ArityMismatch {
        class: String,
        expected: usize,
        found: usize,
    },
    /// Resolving the variable required resolving the variable itself.
    #[error("type variable `{var}` is bound in a cycle")]
    Cyclic { var: String },
    #[error("type resolution exceeded the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    #[error("`{holder}` has no member named `{name}`")]
    UnknownMember { holder: String, name: String },
}
