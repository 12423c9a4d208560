use std::sync::Arc;

use crate::{
    locale::Locale,
    registry::MetricRegistry,
    render::{Dashboard, MetricOrder},
};

/// Builder for a [`Dashboard`].
pub struct DashboardBuilder {
    registry: Option<Arc<MetricRegistry>>,
    locale: Locale,
    order: MetricOrder,
    telemetry: bool,
}

impl DashboardBuilder {
    /// Sets the registry the dashboard renders from.
    ///
    /// Sharing a registry lets other components register their own definitions after the
    /// dashboard has been built.
    ///
    /// Defaults to a fresh registry holding the built-in definitions.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<MetricRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the display conventions used when computing metrics.
    ///
    /// Defaults to [`Locale::default`].
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the order in which rendered metrics are returned.
    ///
    /// Defaults to [`MetricOrder::Registration`].
    #[must_use]
    pub fn with_order(mut self, order: MetricOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets whether or not to emit internal telemetry for each render pass.
    ///
    /// Telemetry is emitted through the `metrics` facade as the `dashboard.metrics.rendered`,
    /// `dashboard.metrics.skipped` and `dashboard.metrics.failed` counters.
    ///
    /// Defaults to `true`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: bool) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Builds the dashboard.
    pub fn build(self) -> Dashboard {
        let registry = self.registry.unwrap_or_else(|| Arc::new(MetricRegistry::with_builtins()));
        Dashboard::from_parts(registry, self.locale, self.order, self.telemetry)
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        DashboardBuilder {
            registry: None,
            locale: Locale::default(),
            order: MetricOrder::Registration,
            telemetry: true,
        }
    }
}
