//! Built-in metric definitions.
//!
//! Ten definitions ship with the crate: server liveness, the retry backlog, and for each
//! [`Channel`] the processing, succeeded and failed counts, plus a failed count that hides itself
//! when nothing has failed.
use tracing::debug;

use crate::{
    context::{Channel, RenderContext},
    definition::{ComputeResult, MetricDefinition},
    metric::{Metric, MetricStyle},
};

/// Identifier of the live server count.
pub const SERVERS_COUNT: &str = "servers:count";
/// Identifier of the retry backlog.
pub const RETRIES_COUNT: &str = "retries:count";
/// Identifier of the published failed count, omitted when zero.
pub const PUBLISHED_FAILED_COUNT_OR_NULL: &str = "published_failed:count-or-null";
/// Identifier of the received failed count, omitted when zero.
pub const RECEIVED_FAILED_COUNT_OR_NULL: &str = "received_failed:count-or-null";
/// Identifier of the published processing count.
pub const PUBLISHED_PROCESSING_COUNT: &str = "published_processing:count";
/// Identifier of the received processing count.
pub const RECEIVED_PROCESSING_COUNT: &str = "received_processing:count";
/// Identifier of the published succeeded count.
pub const PUBLISHED_SUCCEEDED_COUNT: &str = "published_succeeded:count";
/// Identifier of the received succeeded count.
pub const RECEIVED_SUCCEEDED_COUNT: &str = "received_succeeded:count";
/// Identifier of the published failed count.
pub const PUBLISHED_FAILED_COUNT: &str = "published_failed:count";
/// Identifier of the received failed count.
pub const RECEIVED_FAILED_COUNT: &str = "received_failed:count";

/// Label key of the live server count.
pub const LABEL_SERVERS: &str = "Metrics_Servers";
/// Label key of the retry backlog.
pub const LABEL_RETRIES: &str = "Metrics_Retries";
/// Label key of the failed counts.
pub const LABEL_FAILED_JOBS: &str = "Metrics_FailedJobs";
/// Label key of the processing counts.
pub const LABEL_PROCESSING_JOBS: &str = "Metrics_ProcessingJobs";
/// Label key of the succeeded counts.
pub const LABEL_SUCCEEDED_JOBS: &str = "Metrics_SucceededJobs";

/// Name of the storage set holding messages waiting to be retried.
pub const RETRY_SET: &str = "retries";

/// Gets all built-in definitions, in registration order.
pub fn definitions() -> Vec<MetricDefinition> {
    let mut definitions = vec![servers_count(), retries_count()];
    definitions.extend(Channel::ALL.into_iter().map(failed_count_or_null));
    definitions.extend(Channel::ALL.into_iter().map(processing_count));
    definitions.extend(Channel::ALL.into_iter().map(succeeded_count));
    definitions.extend(Channel::ALL.into_iter().map(failed_count));
    definitions
}

/// Number of live servers.
///
/// Warns, with an explanatory title, when no server is alive, since nothing will be processed.
pub fn servers_count() -> MetricDefinition {
    MetricDefinition::new(SERVERS_COUNT, LABEL_SERVERS, |ctx| {
        let servers = ctx.statistics().servers;
        let metric = Metric::new(ctx.locale().format_count(servers));

        Ok(Some(if servers == 0 {
            metric
                .with_style(MetricStyle::Warning)
                .with_highlighted(true)
                .with_title(ctx.locale().no_active_servers_title())
        } else {
            metric
        }))
    })
}

/// Number of messages waiting to be retried.
///
/// Read from the storage's retry set. Omitted when the storage connection cannot query sets.
pub fn retries_count() -> MetricDefinition {
    MetricDefinition::new(RETRIES_COUNT, LABEL_RETRIES, compute_retries)
}

fn compute_retries(ctx: &RenderContext<'_>) -> ComputeResult {
    let retries = {
        let connection = ctx.storage().connect()?;
        let Some(sets) = connection.as_set_queries() else {
            debug!(metric_id = RETRIES_COUNT, "Storage connection cannot query sets.");
            return Ok(None);
        };

        sets.set_cardinality(RETRY_SET)?
    };

    Ok(Some(
        Metric::new(ctx.locale().format_count(retries)).with_style(warning_if_positive(retries)),
    ))
}

/// Failed count for the given channel, omitted entirely when nothing has failed.
pub fn failed_count_or_null(channel: Channel) -> MetricDefinition {
    let id = channel_id(channel, "failed:count-or-null");
    MetricDefinition::new(id, LABEL_FAILED_JOBS, move |ctx| {
        let failed = ctx.statistics().channel(channel).failed;
        if failed == 0 {
            return Ok(None);
        }

        let locale = ctx.locale();
        Ok(Some(
            Metric::new(locale.format_count(failed))
                .with_style(MetricStyle::Danger)
                .with_highlighted(true)
                .with_title(locale.failed_count_title(failed)),
        ))
    })
}

/// Processing count for the given channel.
pub fn processing_count(channel: Channel) -> MetricDefinition {
    let id = channel_id(channel, "processing:count");
    MetricDefinition::new(id, LABEL_PROCESSING_JOBS, move |ctx| {
        let processing = ctx.statistics().channel(channel).processing;
        Ok(Some(
            Metric::new(ctx.locale().format_count(processing))
                .with_style(warning_if_positive(processing)),
        ))
    })
}

/// Succeeded count for the given channel.
pub fn succeeded_count(channel: Channel) -> MetricDefinition {
    let id = channel_id(channel, "succeeded:count");
    MetricDefinition::new(id, LABEL_SUCCEEDED_JOBS, move |ctx| {
        let succeeded = ctx.statistics().channel(channel).succeeded;
        Ok(Some(Metric::new(ctx.locale().format_count(succeeded)).with_int_value(succeeded)))
    })
}

/// Failed count for the given channel, always shown.
pub fn failed_count(channel: Channel) -> MetricDefinition {
    let id = channel_id(channel, "failed:count");
    MetricDefinition::new(id, LABEL_FAILED_JOBS, move |ctx| {
        let failed = ctx.statistics().channel(channel).failed;
        let style = if failed > 0 { MetricStyle::Danger } else { MetricStyle::Default };
        Ok(Some(
            Metric::new(ctx.locale().format_count(failed))
                .with_int_value(failed)
                .with_style(style)
                .with_highlighted(failed > 0),
        ))
    })
}

// Channel metrics are identified as `<channel>_<kind>`, e.g. `received_failed:count`.
fn channel_id(channel: Channel, kind: &str) -> String {
    format!("{channel}_{kind}")
}

fn warning_if_positive(count: u64) -> MetricStyle {
    if count > 0 {
        MetricStyle::Warning
    } else {
        MetricStyle::Default
    }
}
