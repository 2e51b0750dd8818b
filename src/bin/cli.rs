//! btpd CLI Client
//!
//! Command-line interface for controlling a running btpd.

use std::process::ExitCode;

use btpd_client::protocol::parse_torrent_numbers;
use btpd_client::{Client, Config, ErrorCode, Target};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// btpd CLI
#[derive(Parser, Debug)]
#[command(name = "btpd-cli")]
#[command(about = "Control a running btpd daemon")]
#[command(version)]
struct Args {
    /// btpd directory (holds the control socket)
    #[arg(short, long, default_value = "~/.btpd")]
    dir: String,

    /// Socket read/write timeout in milliseconds (0 = wait forever)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a torrent (added inactive)
    Add {
        /// Content directory for the download
        directory: String,

        /// Path to the .torrent file
        torrent: String,
    },

    /// Remove torrents
    Del {
        /// Torrent numbers
        numbers: Vec<String>,
    },

    /// Activate torrents
    Start {
        /// Torrent numbers, or -a for all
        #[arg(allow_hyphen_values = true)]
        targets: Vec<String>,
    },

    /// Deactivate torrents
    Stop {
        /// Torrent numbers, or -a for all
        #[arg(allow_hyphen_values = true)]
        targets: Vec<String>,
    },

    /// Show torrent status
    Stat {
        /// Field tags to print, e.g. -f %# -f %n
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },
}

const DEFAULT_FIELDS: [&str; 3] = ["%#", "%t", "%n"];

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,btpd_client=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every daemon-reported code was success
fn run(args: Args) -> btpd_client::Result<bool> {
    let config = Config::builder()
        .base_dir_str(&args.dir)?
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    tracing::debug!("Using socket {}", config.socket_path().display());
    let mut client = Client::new(&config);

    match args.command {
        Commands::Add { directory, torrent } => {
            let result = client.add_file(&directory, &torrent)?;
            match result.number {
                Some(number) => println!("{}", number),
                None => println!("{}: {}", torrent, result.status),
            }
            Ok(result.status.is_success())
        }
        Commands::Del { numbers } => {
            let numbers = parse_torrent_numbers("drop", &numbers)?;
            let codes = client.drop_torrents(&numbers)?;
            Ok(report(&numbers, &codes))
        }
        Commands::Start { targets } => {
            let target = Target::from_args("start", &targets)?;
            let codes = client.start(&target)?;
            Ok(report_target(&target, &codes))
        }
        Commands::Stop { targets } => {
            let target = Target::from_args("stop", &targets)?;
            let codes = client.stop(&target)?;
            Ok(report_target(&target, &codes))
        }
        Commands::Stat { fields } => {
            let status = client.stat()?;
            if !status.is_success() {
                println!("stat: {}", status);
                return Ok(false);
            }

            let tags: Vec<&str> = if fields.is_empty() {
                DEFAULT_FIELDS.to_vec()
            } else {
                fields.iter().map(String::as_str).collect()
            };

            let columns = client.get_fields(&tags)?;
            let rows = columns.first().map(Vec::len).unwrap_or(0);
            for row in 0..rows {
                let line: Vec<&str> = columns.iter().map(|col| col[row].as_str()).collect();
                println!("{}", line.join("\t"));
            }
            Ok(true)
        }
    }
}

fn report(numbers: &[u32], codes: &[ErrorCode]) -> bool {
    for (number, code) in numbers.iter().zip(codes) {
        if !code.is_success() {
            println!("{}: {}", number, code);
        }
    }
    codes.iter().all(|code| code.is_success())
}

fn report_target(target: &Target, codes: &[ErrorCode]) -> bool {
    match target {
        Target::Numbers(numbers) => report(numbers, codes),
        Target::All => {
            for code in codes.iter().filter(|code| !code.is_success()) {
                println!("all: {}", code);
            }
            codes.iter().all(|code| code.is_success())
        }
    }
}
