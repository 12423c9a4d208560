use std::{borrow::Cow, fmt, sync::Arc};

use crate::{context::RenderContext, error::ComputeError, metric::Metric};

/// Result of a metric computation.
///
/// `Ok(None)` means the metric has nothing to show right now and should be omitted from display.
pub type ComputeResult = Result<Option<Metric>, ComputeError>;

type ComputeFn = dyn Fn(&RenderContext<'_>) -> ComputeResult + Send + Sync;

/// A named, deferred metric computation.
///
/// A definition pairs a stable identifier and a display label key with a function that computes
/// a [`Metric`] from a [`RenderContext`].  The identifier and label key never change after
/// construction.  The computation may be invoked any number of times, from any number of threads
/// at once, and must not keep state between calls.
///
/// Cloning a definition is cheap: the computation itself is shared.
#[derive(Clone)]
pub struct MetricDefinition {
    id: Cow<'static, str>,
    label_key: Cow<'static, str>,
    compute: Arc<ComputeFn>,
}

impl MetricDefinition {
    /// Creates a new `MetricDefinition`.
    ///
    /// By convention, identifiers look like `<subject>:<kind>`, such as `servers:count`, with
    /// `<subject>:count-or-null` reserved for metrics that may opt out of display.
    pub fn new<I, L, F>(id: I, label_key: L, compute: F) -> Self
    where
        I: Into<Cow<'static, str>>,
        L: Into<Cow<'static, str>>,
        F: Fn(&RenderContext<'_>) -> ComputeResult + Send + Sync + 'static,
    {
        MetricDefinition { id: id.into(), label_key: label_key.into(), compute: Arc::new(compute) }
    }

    /// Gets the identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the display label key.
    pub fn label_key(&self) -> &str {
        &self.label_key
    }

    /// Computes the metric against the given context.
    ///
    /// # Errors
    ///
    /// If a collaborator fails unexpectedly during the computation, an error is returned.
    pub fn evaluate(&self, context: &RenderContext<'_>) -> ComputeResult {
        (self.compute)(context)
    }

    /// Returns `true` if both definitions share the same computation.
    pub fn same_computation(&self, other: &MetricDefinition) -> bool {
        Arc::ptr_eq(&self.compute, &other.compute)
    }
}

impl fmt::Debug for MetricDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricDefinition")
            .field("id", &self.id)
            .field("label_key", &self.label_key)
            .finish_non_exhaustive()
    }
}
