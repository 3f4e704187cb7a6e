//! benchkv Workload Driver
//!
//! Loads a keyspace into the reference engine and runs a deterministic
//! mixed read/scan/update workload across worker threads, one adapter
//! instance per thread.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use benchkv::{
    BenchError, Config, EngineContext, FieldFilter, KvAdapter, MemoryEngine, Record, Result,
    WorkloadAdapter,
};

/// benchkv workload driver
#[derive(Parser, Debug)]
#[command(name = "benchkv-workload")]
#[command(about = "Mixed key-value workload over the reference engine")]
#[command(version)]
struct Args {
    /// Number of records to load
    #[arg(short, long, default_value = "10000")]
    records: usize,

    /// Number of operations per worker thread
    #[arg(short, long, default_value = "10000")]
    operations: usize,

    /// Number of worker threads (one adapter each)
    #[arg(short, long, default_value = "4")]
    threads: usize,

    /// Every Nth operation is a range scan
    #[arg(long, default_value = "10")]
    scan_every: usize,

    /// Records requested per scan
    #[arg(long, default_value = "100")]
    scan_length: usize,

    /// Fields per record
    #[arg(long, default_value = "10")]
    field_count: usize,

    /// Bytes per field value
    #[arg(long, default_value = "100")]
    field_length: usize,

    /// Scan partition prefix length (0 disables prefix-scoped scans)
    #[arg(long, default_value = "7")]
    prefix_length: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,benchkv=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("benchkv workload driver v{}", benchkv::VERSION);
    tracing::info!(
        "{} records, {} threads x {} operations",
        args.records,
        args.threads,
        args.operations
    );

    let config = match Config::builder()
        .prefix_length(args.prefix_length)
        .field_count(args.field_count)
        .field_length(args.field_length)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let context = match EngineContext::new(MemoryEngine::new(), config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to create engine context: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&context, &args) {
        tracing::error!("Workload failed: {}", e);
        std::process::exit(1);
    }
}

fn run(context: &Arc<EngineContext<MemoryEngine>>, args: &Args) -> Result<()> {
    // Held across both phases so the engine stays open between the load
    // adapter detaching and the workers attaching.
    let mut driver = KvAdapter::attach(context)?;

    // Load phase
    let start = Instant::now();
    load(&mut driver, args)?;
    tracing::info!(
        "Loaded {} records in {:.2?}",
        args.records,
        start.elapsed()
    );

    // Run phase: one adapter per worker thread
    let start = Instant::now();

    crossbeam::thread::scope(|s| {
        let mut workers = Vec::with_capacity(args.threads);
        for worker_id in 0..args.threads {
            let context = Arc::clone(context);
            workers.push(s.spawn(move |_| run_worker(&context, worker_id, args)));
        }

        for worker in workers {
            worker.join().expect("worker thread panicked")?;
        }

        Ok::<(), BenchError>(())
    })
    .expect("worker scope panicked")?;

    let elapsed = start.elapsed();
    let total_ops = args.threads * args.operations;
    tracing::info!(
        "Ran {} operations in {:.2?} ({:.0} ops/sec)",
        total_ops,
        elapsed,
        total_ops as f64 / elapsed.as_secs_f64()
    );

    Ok(())
}

/// Insert the initial keyspace through the driver's adapter
fn load(adapter: &mut KvAdapter<MemoryEngine>, args: &Args) -> Result<()> {
    let record = template_record(args);

    for i in 0..args.records {
        let key = format!("user{}", i);
        adapter.insert(&key, &record)?;
    }

    Ok(())
}

/// Run one worker's deterministic operation mix
fn run_worker(
    context: &Arc<EngineContext<MemoryEngine>>,
    worker_id: usize,
    args: &Args,
) -> Result<()> {
    let mut adapter = KvAdapter::attach(context)?;
    let record = template_record(args);
    let all_fields = FieldFilter::All;
    let projection = FieldFilter::only(["field0"]);

    let mut reads = 0usize;
    let mut scans = 0usize;
    let mut updates = 0usize;

    for i in 0..args.operations {
        // Deterministic key spread per worker
        let k = (i.wrapping_mul(2654435761).wrapping_add(worker_id * 40503)) % args.records;
        let key = format!("user{}", k);

        if args.scan_every != 0 && i % args.scan_every == 0 {
            adapter.scan(&key, args.scan_length, &all_fields)?;
            scans += 1;
        } else if i % 5 == 1 {
            adapter.update(&key, &record)?;
            updates += 1;
        } else {
            let filter = if i % 2 == 0 { &all_fields } else { &projection };
            adapter.read(&key, filter)?;
            reads += 1;
        }
    }

    tracing::debug!(
        worker_id,
        reads,
        scans,
        updates,
        "worker finished"
    );

    Ok(())
}

/// Build the record every insert/update writes
fn template_record(args: &Args) -> Record {
    (0..args.field_count)
        .map(|f| {
            let fill = b'a' + (f % 26) as u8;
            (
                format!("field{}", f),
                Bytes::from(vec![fill; args.field_length]),
            )
        })
        .collect()
}
