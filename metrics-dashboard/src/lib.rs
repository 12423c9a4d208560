//! A registry of named, lazily-computed metrics for operator-facing status pages.
//!
//! `metrics-dashboard` separates three concerns:
//!
//! - *what* metrics exist, held as [`MetricDefinition`]s in a [`MetricRegistry`],
//! - *how* a metric is computed, a function evaluated against live state at render time,
//! - *how* a metric is displayed, a small [`Metric`] value with a [`MetricStyle`].
//!
//! Nothing is cached between renders: every render pass takes a fresh snapshot of the registry
//! and recomputes each metric from the [`Statistics`] and [`Storage`] it is handed.
//!
//! # Usage
//!
//! ```
//! # use metrics_dashboard::{Dashboard, InMemoryStorage, Statistics};
//! // The default dashboard renders the built-in metrics.
//! let dashboard = Dashboard::builder().build();
//!
//! let storage = InMemoryStorage::new();
//! let statistics = Statistics { servers: 3, ..Default::default() };
//!
//! for rendered in dashboard.render(&statistics, &storage) {
//!     println!("{} ({}): {}", rendered.id(), rendered.label_key(), rendered.metric().value());
//! }
//! ```
//!
//! # Custom metrics
//!
//! Any component holding the registry can add its own definitions at any time:
//!
//! ```
//! # use std::sync::Arc;
//! # use metrics_dashboard::{
//! #     Dashboard, InMemoryStorage, Metric, MetricDefinition, MetricRegistry, MetricStyle,
//! #     Statistics,
//! # };
//! let registry = Arc::new(MetricRegistry::with_builtins());
//! registry
//!     .register(MetricDefinition::new("servers:capacity", "Metrics_Capacity", |ctx| {
//!         let capacity = ctx.statistics().servers.saturating_mul(16);
//!         Ok(Some(Metric::new(ctx.locale().format_count(capacity)).with_style(MetricStyle::Info)))
//!     }))
//!     .expect("definition is valid");
//!
//! let dashboard = Dashboard::builder().with_registry(registry).build();
//! # let statistics = Statistics { servers: u64::MAX, ..Default::default() };
//! # let rendered = dashboard.render(&statistics, &InMemoryStorage::new());
//! # let capacity = rendered.iter().find(|r| r.id() == "servers:capacity").expect("rendered");
//! # assert_eq!(capacity.metric().value(), "18,446,744,073,709,551,615");
//! ```
//!
//! # Failures
//!
//! A computation may return `Ok(None)` when it has nothing to show, which simply omits it. A
//! computation that fails returns an error; the render pass logs it through `tracing`, omits that
//! metric, and keeps evaluating the rest. Operators never see raw errors.
//!
//! # Telemetry
//!
//! When enabled, each render pass reports `dashboard.metrics.rendered`,
//! `dashboard.metrics.skipped` and `dashboard.metrics.failed` counters through the [`metrics`]
//! facade.
#![deny(clippy::all)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod builder;
pub use self::builder::DashboardBuilder;

pub mod builtin;

mod context;
pub use self::context::{Channel, ChannelStatistics, RenderContext, Statistics};

mod definition;
pub use self::definition::{ComputeResult, MetricDefinition};

mod error;
pub use self::error::{ComputeError, LocaleError, RegisterError, StorageError};

mod locale;
pub use self::locale::Locale;

mod metric;
pub use self::metric::{Metric, MetricStyle};

mod registry;
pub use self::registry::MetricRegistry;

mod render;
pub use self::render::{Dashboard, MetricOrder, RenderedMetric};

pub mod storage;
pub use self::storage::{InMemoryStorage, SetQueries, Storage, StorageConnection};

mod telemetry;
