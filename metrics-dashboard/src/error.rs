use std::time::Duration;

use thiserror::Error;

/// Errors that could occur while registering a metric definition.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RegisterError {
    /// The definition has an empty identifier.
    #[error("metric definition identifier must not be empty")]
    EmptyId,

    /// The definition has an empty label key.
    #[error("metric definition `{id}` has an empty label key")]
    EmptyLabelKey {
        /// Identifier of the rejected definition.
        id: String,
    },
}

/// Errors that could occur while talking to the storage collaborator.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum StorageError {
    /// A connection could not be opened.
    #[error("storage unavailable: {reason}")]
    Unavailable {
        /// Details about the failure.
        reason: String,
    },

    /// The storage did not answer within its configured budget.
    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),

    /// A query against a named set failed.
    #[error("failed to query set `{set}`: {reason}")]
    Query {
        /// Name of the queried set.
        set: String,
        /// Details about the failure.
        reason: String,
    },
}

/// Errors that could occur while computing a single metric.
///
/// A computation error is scoped to the metric that produced it: the render pass logs it, omits
/// the metric, and carries on with the remaining definitions.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ComputeError {
    /// The storage collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Any other unexpected failure raised by a user-provided computation.
    #[error("{0}")]
    Other(String),
}

impl ComputeError {
    /// Creates a [`ComputeError::Other`] from anything displayable.
    pub fn other<E: std::fmt::Display>(error: E) -> Self {
        ComputeError::Other(error.to_string())
    }
}

/// Errors that could occur while configuring a [`Locale`][crate::Locale].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LocaleError {
    /// The failed count template does not contain the `{count}` placeholder.
    #[error("failed count template must contain the `{{count}}` placeholder")]
    MissingCountPlaceholder,
}
