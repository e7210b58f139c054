//! slotcache - Fixed-capacity cache simulators
//!
//! Runs the scenario suites, replays a deterministic workload against every
//! cache variant and prints a report.

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slotcache::cache::{ArcCache, LfuCache, LruCache, TtlCache, TwoLevelCache, WriteCache};
use slotcache::config::ReportFormat;
use slotcache::report::RunReport;
use slotcache::store::BackingStore;
use slotcache::workload::{simulate, SimReport, Workload};
use slotcache::{scenarios, Cache, Config};

/// Entry point for the simulator.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Run the scenario suites
/// 4. Replay the workload against every variant
/// 5. Print the report; fail if any scenario suite failed
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting slotcache simulator");

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: capacity={}, l1={}, l2={}, arc={}/{}, ttl={}, workload={}",
        config.cache_capacity,
        config.l1_capacity,
        config.l2_capacity,
        config.arc_recent,
        config.arc_frequent,
        config.ttl_ticks,
        config.workload_length
    );

    let outcomes = scenarios::run_all();
    for outcome in &outcomes {
        info!(
            "Scenario suite {}: {}/{} checks passed",
            outcome.variant, outcome.passed, outcome.total
        );
    }

    let workload = Workload::skewed(
        config.workload_length,
        config.key_space,
        config.hot_keys,
        config.hot_percent,
    );
    let simulations = run_simulations(&config, &workload)?;

    let report = RunReport::new(outcomes, simulations);
    match config.report_format {
        ReportFormat::Json => println!("{}", report.to_json().context("serializing report")?),
        ReportFormat::Text => print!("{}", report.to_text()),
    }

    let failed = scenarios::failed(&report.scenarios);
    if !failed.is_empty() {
        for outcome in &failed {
            warn!("Suite {} failed {} checks", outcome.variant, outcome.total - outcome.passed);
        }
        bail!("{} scenario suite(s) failed", failed.len());
    }

    info!("Run complete");
    Ok(())
}

fn run_simulations(config: &Config, workload: &Workload) -> anyhow::Result<Vec<SimReport>> {
    let mut variants: Vec<Box<dyn Cache>> = vec![
        Box::new(LruCache::lru(config.cache_capacity)),
        Box::new(LfuCache::lfu(config.cache_capacity)),
        Box::new(TtlCache::ttl(config.cache_capacity, config.ttl_ticks)),
        Box::new(ArcCache::new(config.arc_recent, config.arc_frequent)),
        Box::new(TwoLevelCache::new(config.l1_capacity, config.l2_capacity)),
        Box::new(WriteCache::write_back(
            config.cache_capacity,
            BackingStore::new(config.store_size),
        )),
        Box::new(WriteCache::write_through(
            config.cache_capacity,
            BackingStore::new(config.store_size),
        )),
    ];

    variants
        .iter_mut()
        .map(|cache| -> anyhow::Result<SimReport> {
            let report = simulate(cache.as_mut(), workload)
                .with_context(|| format!("simulating {}", cache.name()))?;
            info!(
                "Simulated {}: hit_rate={:.3} evictions={}",
                report.variant, report.hit_rate, report.stats.evictions
            );
            Ok(report)
        })
        .collect()
}
