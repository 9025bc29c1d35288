//! portgate: check packets against a rule file from the command line.

use clap::{Parser, Subcommand};
use portgate::converter::split_record;
use portgate::{Firewall, FirewallConfig};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "portgate")]
#[command(version)]
#[command(about = "Match packets against static permit rules", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single packet (exit code 0 = accepted, 1 = rejected)
    Check {
        /// Rule file
        #[arg(short, long)]
        rules: PathBuf,

        /// inbound or outbound
        direction: String,

        /// tcp or udp
        protocol: String,

        /// Port number
        port: u32,

        /// IPv4 address
        address: String,
    },

    /// Check every packet listed in a query file, one verdict per line
    Batch {
        /// Rule file
        #[arg(short, long)]
        rules: PathBuf,

        /// Query file (direction,protocol,port,ip_address per line)
        #[arg(short, long)]
        queries: PathBuf,
    },

    /// Print rule store statistics
    Stats {
        /// Rule file
        #[arg(short, long)]
        rules: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Check {
            rules,
            direction,
            protocol,
            port,
            address,
        } => check(&rules, config, &direction, &protocol, port, &address),
        Commands::Batch { rules, queries } => batch(&rules, &queries, config).map(|_| true),
        Commands::Stats { rules, json } => stats(&rules, config, json).map(|_| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn load_config(path: Option<&Path>) -> portgate::Result<FirewallConfig> {
    match path {
        Some(path) => FirewallConfig::load(path),
        None => Ok(FirewallConfig::default()),
    }
}

fn verdict(accepted: bool) -> &'static str {
    if accepted {
        "ACCEPT"
    } else {
        "REJECT"
    }
}

fn check(
    rules: &Path,
    config: FirewallConfig,
    direction: &str,
    protocol: &str,
    port: u32,
    address: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let firewall = Firewall::from_path(rules, config)?;
    let accepted = firewall.accept_packet(direction, protocol, port, address);
    println!("{}", verdict(accepted));
    Ok(accepted)
}

fn batch(
    rules: &Path,
    queries: &Path,
    config: FirewallConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let firewall = Firewall::from_path(rules, config)?;
    let reader = BufReader::new(File::open(queries)?);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut accepted = 0usize;
    let mut total = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let fields = match split_record(&line) {
            Ok(Some(fields)) => fields,
            Ok(None) => continue,
            Err(reason) => {
                log::warn!("query line {}: {}", idx + 1, reason);
                writeln!(out, "{}", verdict(false))?;
                total += 1;
                continue;
            }
        };

        // An unparsable port can never match, same as any other bad field.
        let ok = match fields[2].parse::<u32>() {
            Ok(port) => firewall.accept_packet(fields[0], fields[1], port, fields[3]),
            Err(_) => false,
        };
        writeln!(out, "{}", verdict(ok))?;
        total += 1;
        if ok {
            accepted += 1;
        }
    }
    out.flush()?;

    log::info!("{} of {} packets accepted", accepted, total);
    Ok(())
}

fn stats(
    rules: &Path,
    config: FirewallConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let firewall = Firewall::from_path(rules, config)?;
    let stats = firewall.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("firewall: {}", stats.name);
    println!("rules:    {}", stats.records);
    for bucket in &stats.buckets {
        println!(
            "  {:<14} {:>10} addresses {:>12} nodes {:>8} intervals",
            bucket.bucket.to_string(),
            bucket.addresses,
            bucket.nodes,
            bucket.intervals
        );
    }
    println!(
        "total:    {} addresses, {} nodes, {} intervals",
        stats.total_addresses(),
        stats.total_nodes(),
        stats.total_intervals()
    );
    Ok(())
}
