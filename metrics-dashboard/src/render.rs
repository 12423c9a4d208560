use std::sync::Arc;

use tracing::warn;

use crate::{
    builder::DashboardBuilder,
    context::{RenderContext, Statistics},
    locale::Locale,
    metric::Metric,
    registry::MetricRegistry,
    storage::Storage,
    telemetry::Telemetry,
};

/// Order of the metrics returned by a render pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MetricOrder {
    /// The order in which definitions were first registered.
    #[default]
    Registration,
    /// Alphabetical by identifier.
    Id,
}

/// A metric produced by a render pass, alongside the definition metadata needed to lay it out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedMetric {
    id: String,
    label_key: String,
    metric: Metric,
}

impl RenderedMetric {
    /// Gets the identifier of the definition that produced this metric.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the display label key, to be resolved by the caller.
    pub fn label_key(&self) -> &str {
        &self.label_key
    }

    /// Gets the metric.
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// Consumes this value, returning the metric.
    pub fn into_metric(self) -> Metric {
        self.metric
    }
}

/// Renders the metrics of a registry against live statistics and storage.
///
/// Each call to [`render`](Dashboard::render) is an independent pass: it takes its own snapshot
/// of the registry and evaluates every definition in it. A definition with nothing to show is
/// left out, and so is a definition whose computation fails: the failure is logged and the pass
/// carries on with the remaining definitions.
#[derive(Debug)]
pub struct Dashboard {
    registry: Arc<MetricRegistry>,
    locale: Locale,
    order: MetricOrder,
    telemetry: bool,
}

impl Dashboard {
    /// Creates a [`DashboardBuilder`].
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    pub(crate) fn from_parts(
        registry: Arc<MetricRegistry>,
        locale: Locale,
        order: MetricOrder,
        telemetry: bool,
    ) -> Self {
        Dashboard { registry, locale, order, telemetry }
    }

    /// Gets the registry this dashboard renders from.
    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    /// Gets the display conventions used by this dashboard.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Runs a render pass.
    pub fn render(&self, statistics: &Statistics, storage: &dyn Storage) -> Vec<RenderedMetric> {
        let ctx = RenderContext::new(statistics, storage, &self.locale);
        let telemetry = self.telemetry.then(Telemetry::new);

        let definitions = self.registry.list_all();
        let mut rendered = Vec::with_capacity(definitions.len());
        for definition in definitions {
            match definition.evaluate(&ctx) {
                Ok(Some(metric)) => {
                    if let Some(telemetry) = &telemetry {
                        telemetry.increment_rendered();
                    }
                    rendered.push(RenderedMetric {
                        id: definition.id().to_owned(),
                        label_key: definition.label_key().to_owned(),
                        metric,
                    });
                }
                Ok(None) => {
                    if let Some(telemetry) = &telemetry {
                        telemetry.increment_skipped();
                    }
                }
                Err(e) => {
                    warn!(metric_id = definition.id(), error = %e, "Failed to compute metric.");
                    if let Some(telemetry) = &telemetry {
                        telemetry.increment_failed(definition.id());
                    }
                }
            }
        }

        if self.order == MetricOrder::Id {
            rendered.sort_by(|a, b| a.id.cmp(&b.id));
        }

        rendered
    }
}
