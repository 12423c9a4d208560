/// Visual severity of a rendered metric.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MetricStyle {
    /// Neutral.
    #[default]
    Default,
    /// Informational.
    Info,
    /// Positive outcome.
    Success,
    /// Needs attention.
    Warning,
    /// Something is failing.
    Danger,
}

impl MetricStyle {
    /// Gets the CSS class name a status page uses for this style.
    pub fn class_name(self) -> &'static str {
        match self {
            MetricStyle::Default => "metric-default",
            MetricStyle::Info => "metric-info",
            MetricStyle::Success => "metric-success",
            MetricStyle::Warning => "metric-warning",
            MetricStyle::Danger => "metric-danger",
        }
    }
}

/// A rendered metric.
///
/// `Metric` is the display-ready output of a [`MetricDefinition`][crate::MetricDefinition]: a
/// formatted value, an optional raw value for consumers that sort or aggregate, a style, an
/// emphasis flag, and an optional explanatory title.
///
/// Metrics are immutable once built and carry no reference back to the definition or registry
/// that produced them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metric {
    value: String,
    int_value: Option<u64>,
    style: MetricStyle,
    highlighted: bool,
    title: Option<String>,
}

impl Metric {
    /// Creates a new `Metric` with the given formatted value.
    ///
    /// The metric starts out with the default style, no raw value, no highlight and no title.
    pub fn new<V: Into<String>>(value: V) -> Self {
        Metric {
            value: value.into(),
            int_value: None,
            style: MetricStyle::Default,
            highlighted: false,
            title: None,
        }
    }

    /// Sets the raw integer value.
    #[must_use]
    pub fn with_int_value(mut self, int_value: u64) -> Self {
        self.int_value = Some(int_value);
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: MetricStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets whether or not the metric should be highlighted.
    #[must_use]
    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Sets the explanatory title.
    #[must_use]
    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Gets the formatted value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Gets the raw integer value, if any.
    pub fn int_value(&self) -> Option<u64> {
        self.int_value
    }

    /// Gets the style.
    pub fn style(&self) -> MetricStyle {
        self.style
    }

    /// Returns `true` if the metric should be drawn with special emphasis.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Gets the explanatory title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{Metric, MetricStyle};

    #[test]
    fn defaults() {
        let metric = Metric::new("42");
        assert_eq!(metric.value(), "42");
        assert_eq!(metric.int_value(), None);
        assert_eq!(metric.style(), MetricStyle::Default);
        assert!(!metric.is_highlighted());
        assert_eq!(metric.title(), None);
    }

    #[test]
    fn builder() {
        let metric = Metric::new("1,234")
            .with_int_value(1234)
            .with_style(MetricStyle::Danger)
            .with_highlighted(true)
            .with_title("1,234 failed");

        assert_eq!(metric.int_value(), Some(1234));
        assert_eq!(metric.style(), MetricStyle::Danger);
        assert!(metric.is_highlighted());
        assert_eq!(metric.title(), Some("1,234 failed"));
    }

    #[test]
    fn class_names() {
        let cases = [
            (MetricStyle::Default, "metric-default"),
            (MetricStyle::Info, "metric-info"),
            (MetricStyle::Success, "metric-success"),
            (MetricStyle::Warning, "metric-warning"),
            (MetricStyle::Danger, "metric-danger"),
        ];

        for (style, expected) in cases {
            assert_eq!(style.class_name(), expected);
        }
    }
}
