use std::{
    sync::{Arc, Barrier},
    thread,
};

use metrics_dashboard::{
    builtin, ChannelStatistics, ComputeError, Dashboard, InMemoryStorage, Metric,
    MetricDefinition, MetricRegistry, MetricStyle, Statistics, StorageError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn concurrent_registration_loses_no_writes() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let registry = Arc::new(MetricRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let id = format!("thread{t}_metric{i}:count");
                    registry
                        .register(MetricDefinition::new(id, "Label", |_| Ok(None)))
                        .expect("definition is valid");
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().expect("registering thread panicked");
    }

    let snapshot = registry.list_all();
    assert_eq!(snapshot.len(), THREADS * PER_THREAD);

    let mut ids = snapshot.iter().map(|d| d.id().to_owned()).collect::<Vec<_>>();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), THREADS * PER_THREAD);
}

#[test]
fn concurrent_replacement_never_duplicates() {
    let registry = Arc::new(MetricRegistry::new());
    let handles = (0..4)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..200 {
                    let value = format!("{t}-{i}");
                    registry
                        .register(MetricDefinition::new("shared:count", "Label", move |_| {
                            Ok(Some(Metric::new(value.clone())))
                        }))
                        .expect("definition is valid");
                    assert_eq!(registry.list_all().len(), 1);
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().expect("registering thread panicked");
    }

    assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_render_passes() {
    init_tracing();

    let dashboard = Arc::new(Dashboard::builder().with_telemetry(false).build());
    let storage = Arc::new(InMemoryStorage::new());
    storage.add_to_set(builtin::RETRY_SET, "message-1");

    let handles = (0..4u64)
        .map(|t| {
            let dashboard = Arc::clone(&dashboard);
            let storage = Arc::clone(&storage);
            thread::spawn(move || {
                let statistics = Statistics {
                    servers: t + 1,
                    published: ChannelStatistics { failed: t, ..Default::default() },
                    ..Default::default()
                };
                for _ in 0..100 {
                    let rendered = dashboard.render(&statistics, storage.as_ref());
                    let servers = rendered
                        .iter()
                        .find(|r| r.id() == builtin::SERVERS_COUNT)
                        .expect("servers metric is always rendered");
                    assert_eq!(servers.metric().value(), (t + 1).to_string());

                    let shows_failures = rendered
                        .iter()
                        .any(|r| r.id() == builtin::PUBLISHED_FAILED_COUNT_OR_NULL);
                    assert_eq!(shows_failures, t > 0);
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().expect("render thread panicked");
    }

    assert_eq!(storage.open_connections(), 0);
    assert_eq!(storage.total_connections(), 400);
}

#[test]
fn failed_storage_only_hides_retries() {
    init_tracing();

    let registry = Arc::new(MetricRegistry::with_builtins());
    registry
        .register(MetricDefinition::new("queue:depth", "Metrics_Queue", |ctx| {
            let connection = ctx.storage().connect()?;
            let sets = connection
                .as_set_queries()
                .ok_or_else(|| ComputeError::other("set queries unsupported"))?;
            let depth = sets.set_cardinality("queue")?;
            Ok(Some(Metric::new(ctx.locale().format_count(depth))))
        }))
        .expect("definition is valid");

    let dashboard = Dashboard::builder().with_registry(registry).build();
    let storage = InMemoryStorage::new();
    let statistics = Statistics {
        servers: 1,
        received: ChannelStatistics { failed: 2, ..Default::default() },
        ..Default::default()
    };

    storage.set_unavailable(true);
    let rendered = dashboard.render(&statistics, &storage);
    assert!(rendered.iter().all(|r| r.id() != builtin::RETRIES_COUNT && r.id() != "queue:depth"));
    assert!(rendered.iter().any(|r| r.id() == builtin::RECEIVED_FAILED_COUNT_OR_NULL));

    storage.set_unavailable(false);
    storage.set_queries_enabled(false);
    let rendered = dashboard.render(&statistics, &storage);
    assert!(rendered.iter().all(|r| r.id() != builtin::RETRIES_COUNT && r.id() != "queue:depth"));

    storage.set_queries_enabled(true);
    storage.add_to_set("queue", "a");
    let rendered = dashboard.render(&statistics, &storage);
    let depth = rendered.iter().find(|r| r.id() == "queue:depth").expect("queue depth rendered");
    assert_eq!(depth.metric().value(), "1");
    let retries = rendered
        .iter()
        .find(|r| r.id() == builtin::RETRIES_COUNT)
        .expect("retries rendered");
    assert_eq!(retries.metric().style(), MetricStyle::Default);

    assert_eq!(storage.open_connections(), 0);
}

#[test]
fn storage_timeouts_are_isolated() {
    init_tracing();

    let registry = Arc::new(MetricRegistry::new());
    registry
        .register(MetricDefinition::new("slow:count", "Label", |_| {
            Err(StorageError::Timeout(std::time::Duration::from_secs(1)).into())
        }))
        .expect("definition is valid");
    registry
        .register(MetricDefinition::new("fast:count", "Label", |_| Ok(Some(Metric::new("1")))))
        .expect("definition is valid");

    let dashboard = Dashboard::builder().with_registry(registry).with_telemetry(false).build();
    let rendered = dashboard.render(&Statistics::default(), &InMemoryStorage::new());

    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].id(), "fast:count");
}
