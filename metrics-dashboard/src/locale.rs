use std::borrow::Cow;

use crate::error::LocaleError;

const COUNT_PLACEHOLDER: &str = "{count}";
const DEFAULT_GROUP_SEPARATOR: &str = ",";
const DEFAULT_NO_ACTIVE_SERVERS: &str = "No active servers found. Jobs will not be processed.";
const DEFAULT_FAILED_COUNT: &str = "{count} failed job(s) found. Retry or delete them manually.";

/// Display conventions used when computing metrics.
///
/// Covers how counts are grouped (`1,234` vs `1.234` vs `1 234`) and the explanatory strings
/// attached to warning and danger metrics. Label keys are never resolved here: they are handed
/// to the rendering layer untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Locale {
    group_separator: Cow<'static, str>,
    no_active_servers: Cow<'static, str>,
    failed_count: Cow<'static, str>,
}

impl Locale {
    /// Sets the thousands separator.
    ///
    /// Defaults to `,`.
    #[must_use]
    pub fn with_group_separator<S>(mut self, separator: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.group_separator = separator.into();
        self
    }

    /// Sets the title shown when no servers are alive.
    #[must_use]
    pub fn with_no_active_servers_title<S>(mut self, title: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.no_active_servers = title.into();
        self
    }

    /// Sets the template used for the title of failed count metrics.
    ///
    /// The template must contain a `{count}` placeholder, which is replaced with the formatted
    /// count.
    ///
    /// # Errors
    ///
    /// If the template does not contain the placeholder, an error is returned.
    pub fn with_failed_count_template<S>(mut self, template: S) -> Result<Self, LocaleError>
    where
        S: Into<Cow<'static, str>>,
    {
        let template = template.into();
        if !template.contains(COUNT_PLACEHOLDER) {
            return Err(LocaleError::MissingCountPlaceholder);
        }

        self.failed_count = template;
        Ok(self)
    }

    /// Formats a count with thousands grouping and no decimal places.
    pub fn format_count(&self, count: u64) -> String {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(count);

        let separators = (digits.len() - 1) / 3;
        let mut out = String::with_capacity(digits.len() + separators * self.group_separator.len());

        // The leading group holds whatever is left after splitting the rest into threes.
        let lead = digits.len() - separators * 3;
        out.push_str(&digits[..lead]);
        for group in digits.as_bytes()[lead..].chunks(3) {
            out.push_str(&self.group_separator);
            // Digits are ASCII, so every chunk boundary is a char boundary.
            out.extend(group.iter().map(|b| char::from(*b)));
        }

        out
    }

    /// Gets the title shown when no servers are alive.
    pub fn no_active_servers_title(&self) -> &str {
        &self.no_active_servers
    }

    /// Renders the title for a failed count metric.
    pub fn failed_count_title(&self, count: u64) -> String {
        self.failed_count.replace(COUNT_PLACEHOLDER, &self.format_count(count))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            group_separator: Cow::Borrowed(DEFAULT_GROUP_SEPARATOR),
            no_active_servers: Cow::Borrowed(DEFAULT_NO_ACTIVE_SERVERS),
            failed_count: Cow::Borrowed(DEFAULT_FAILED_COUNT),
        }
    }
}
