use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use vireodb::{Reading, SensorId, SensorStore, Timestamp, DEFAULT_BUCKET_COUNT};

/// VireoDB command-line interface.
#[derive(Parser)]
#[command(name = "vireodb", author, version, about = "VireoDB CLI", long_about = None)]
struct Cli {
    /// Default log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the sample readings and walk the store's operations.
    Demo {
        /// Number of hash buckets in the sensor table.
        #[arg(long, default_value_t = DEFAULT_BUCKET_COUNT)]
        buckets: usize,

        /// Expire sensor 1 readings older than this cutoff at the end.
        #[arg(long, default_value = "12:35:00")]
        cutoff: Timestamp,

        /// Emit one JSON document instead of plain text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    vireo_log::init(cli.log_level)?;

    match cli.command {
        Commands::Demo {
            buckets,
            cutoff,
            json,
        } => run_demo(buckets, cutoff, json),
    }
}

fn run_demo(buckets: usize, cutoff: Timestamp, json: bool) -> Result<()> {
    let mut store = SensorStore::with_buckets(buckets);

    store.add_point(SensorId(1), Timestamp::new(12, 30, 23), 25.3);
    store.add_point(SensorId(1), Timestamp::new(12, 33, 3), 26.1);
    store.add_point(SensorId(1), Timestamp::new(12, 35, 43), 24.8);
    store.add_point(SensorId(2), Timestamp::new(12, 34, 13), 22.3);
    store.add_point(SensorId(2), Timestamp::new(12, 46, 9), 21.9);
    store.add_point(SensorId(2), Timestamp::new(12, 42, 23), 14.3);
    info!(buckets, readings = 6, "seeded demo store");

    let first = store.retrieve(
        SensorId(1),
        Timestamp::new(12, 30, 0),
        Timestamp::new(12, 35, 0),
    );
    let second = store.retrieve(
        SensorId(2),
        Timestamp::new(12, 40, 0),
        Timestamp::new(12, 50, 0),
    );

    // 12:39:03 was never recorded for sensor 1, so this update is a no-op.
    store.update_point(SensorId(1), Timestamp::new(12, 39, 3), 27.2);
    let after_update = store.retrieve(
        SensorId(1),
        Timestamp::new(12, 30, 0),
        Timestamp::new(12, 35, 0),
    );

    let stats = store.analyze(
        SensorId(1),
        Timestamp::new(12, 30, 0),
        Timestamp::new(12, 50, 0),
    );

    store.delete_before(SensorId(1), cutoff);
    let remaining = store.reading_count(SensorId(1));

    if json {
        let doc = serde_json::json!({
            "sensor1_early": first,
            "sensor2_late": second,
            "sensor1_after_update": after_update,
            "sensor1_stats": stats,
            "sensor1_remaining": remaining,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print_readings("sensor 1, 12:30:00 to 12:35:00", &first);
    print_readings("sensor 2, 12:40:00 to 12:50:00", &second);
    print_readings("sensor 1 after update", &after_update);
    println!(
        "sensor 1 stats: average={:.2} min={:.2} max={:.2}",
        stats.average, stats.min, stats.max
    );
    println!("sensor 1 readings after expiry at {cutoff}: {remaining}");
    Ok(())
}

fn print_readings(label: &str, readings: &[Reading]) {
    println!("{label}: {} readings", readings.len());
    for reading in readings {
        println!("  {}  {:.1}", reading.timestamp, reading.value);
    }
}
