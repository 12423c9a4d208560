use std::sync::Arc;

use metrics_dashboard::{
    builtin, ChannelStatistics, Dashboard, InMemoryStorage, Locale, Metric, MetricDefinition,
    MetricOrder, MetricRegistry, MetricStyle, Statistics,
};
use tracing::info;

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let registry = Arc::new(MetricRegistry::with_builtins());
    registry
        .register(MetricDefinition::new("servers:capacity", "Metrics_Capacity", |ctx| {
            let capacity = ctx.statistics().servers.saturating_mul(16);
            Ok(Some(Metric::new(ctx.locale().format_count(capacity)).with_style(MetricStyle::Info)))
        }))
        .expect("definition is valid");

    let dashboard = Dashboard::builder()
        .with_registry(Arc::clone(&registry))
        .with_locale(Locale::default().with_group_separator(" "))
        .with_order(MetricOrder::Id)
        .build();

    let storage = InMemoryStorage::new();
    for i in 0..3 {
        storage.add_to_set(builtin::RETRY_SET, format!("message-{i}"));
    }

    let snapshots = [
        Statistics::default(),
        Statistics {
            servers: 4,
            published: ChannelStatistics { processing: 12, succeeded: 184_223, failed: 0 },
            received: ChannelStatistics { processing: 0, succeeded: 90_412, failed: 1_337 },
        },
    ];

    for statistics in &snapshots {
        info!(definitions = dashboard.registry().len(), "Rendering status page.");
        for rendered in dashboard.render(statistics, &storage) {
            let metric = rendered.metric();
            println!(
                "{:<32} {:<24} {:>12}  [{}{}]{}",
                rendered.id(),
                rendered.label_key(),
                metric.value(),
                metric.style().class_name(),
                if metric.is_highlighted() { ", highlighted" } else { "" },
                metric.title().map(|t| format!("  {t}")).unwrap_or_default(),
            );
        }
        println!();
    }
}
