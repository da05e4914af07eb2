//! fwlog-sim - push synthetic firewall logs at a Redis list
//!
//! Usage:
//!   fwlog-sim --count 100 --interval 1.0
//!   fwlog-sim --anomaly-ratio 0.25 --redis-host cache.internal
//!   fwlog-sim --count 50 --interval 0.1 --seed 42

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::error;

use fwlog_sim::{AddressPools, LogGenerator, RedisBroker, RunOptions, Runner, SynthError};

#[derive(Parser)]
#[command(name = "fwlog-sim")]
#[command(about = "Synthetic firewall log generator for anomaly-detector testing")]
struct Cli {
    /// Number of log records to generate
    #[arg(long, default_value_t = 100)]
    count: u64,

    /// Seconds to sleep between records
    #[arg(long, default_value_t = 1.0)]
    interval: f64,

    /// Redis host
    #[arg(long, default_value = "localhost")]
    redis_host: String,

    /// Redis port
    #[arg(long, default_value_t = 6379)]
    redis_port: u16,

    /// Redis database index
    #[arg(long, default_value_t = 0)]
    redis_db: i64,

    /// Probability that a record is anomalous (0.0-1.0)
    #[arg(long, default_value_t = 0.1, value_parser = parse_ratio)]
    anomaly_ratio: f64,

    /// Redis list key the records are pushed onto
    #[arg(long, default_value = "firewall_logs")]
    key: String,

    /// Seed the generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("ratio must be within [0.0, 1.0], got {ratio}"))
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    println!("fwlog-sim - Synthetic Firewall Log Generator");
    println!("============================================");
    println!(
        "Broker:   redis://{}:{}/{} (key: {})",
        cli.redis_host, cli.redis_port, cli.redis_db, cli.key
    );
    println!(
        "Records:  {} (anomaly ratio {:.0}%)",
        cli.count,
        cli.anomaly_ratio * 100.0
    );
    println!("Interval: {:.2}s", cli.interval);
    println!();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let broker = match RedisBroker::connect(&cli.redis_host, cli.redis_port, cli.redis_db) {
        Ok(broker) => broker,
        Err(err) => {
            error!("{err}");
            eprintln!(
                "Could not connect to Redis at {}:{}. Make sure it is running and accessible.",
                cli.redis_host, cli.redis_port
            );
            return 1;
        }
    };

    let generator = LogGenerator::new(AddressPools::sample(&mut rng, AddressPools::DEFAULT_SIZE));
    let mut runner = Runner::new(generator, broker);

    let shutdown = runner.shutdown_flag();
    if let Err(err) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
        error!("failed to install interrupt handler: {err}");
        return 1;
    }

    let opts = RunOptions {
        count: cli.count,
        interval: Duration::from_secs_f64(cli.interval),
        anomaly_ratio: cli.anomaly_ratio,
        key: cli.key,
        ..RunOptions::default()
    };

    match runner.run(&opts, &mut rng) {
        Ok(report) => {
            if report.interrupted {
                println!("\nStopped by user.");
            }
            println!("\n=== Run Summary ===");
            println!("Normal records:    {}", report.normal);
            println!("Anomalous records: {}", report.anomalous);
            println!(
                "Burst batches:     {} ({} records)",
                report.bursts, report.burst_records
            );
            println!("Total pushed:      {}", report.total_published());
            0
        }
        Err(err @ SynthError::BrokerConnectivity { .. }) => {
            error!("{err}");
            eprintln!("Aborting run: {err}");
            1
        }
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            1
        }
    }
}
