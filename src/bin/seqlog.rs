//! SeqLog CLI
//!
//! Drives a sequence session over a log file, one command per invocation, or
//! serves text commands from stdin through a session worker.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use seqlog::append_log::{LogRecovery, RecoveryResult};
use seqlog::config::{Config, OverflowPolicy, SeedPolicy, SyncStrategy};
use seqlog::protocol::Command;
use seqlog::{Result, Session, SessionWorker};
use tracing_subscriber::{fmt, EnvFilter};

/// SeqLog CLI
#[derive(Parser, Debug)]
#[command(name = "seqlog")]
#[command(about = "Append-only sequence log")]
#[command(version)]
struct Args {
    /// Log file
    #[arg(short, long, default_value = "./seqlog_data/sequence.log")]
    path: PathBuf,

    /// First seed
    #[arg(long, default_value = "0")]
    seed0: u32,

    /// Second seed
    #[arg(long, default_value = "1")]
    seed1: u32,

    /// Produce the seeds on the first two steps instead of at init
    #[arg(long)]
    lazy_seeds: bool,

    /// Behavior when a value exceeds u32::MAX
    #[arg(long, value_enum, default_value = "wrap")]
    overflow: Overflow,

    /// fsync after this many appends instead of after every append
    #[arg(long)]
    sync_every: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the log (and seed it unless --lazy-seeds)
    Init,

    /// Append the next value(s)
    Step {
        /// Number of steps
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Print the full sequence
    Get,

    /// Clear the log
    Reset,

    /// Check the log for a torn tail without modifying it
    Verify,

    /// Truncate a torn tail back to the last complete record
    Repair,

    /// Read commands from stdin (`init <path>`, `step`, `getData`, `reset`)
    Run,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Overflow {
    Wrap,
    Fail,
}

impl Args {
    fn config(&self) -> Config {
        let sync_strategy = match self.sync_every {
            Some(count) => SyncStrategy::EveryNEntries { count },
            None => SyncStrategy::EveryWrite,
        };
        let seed_policy = if self.lazy_seeds {
            SeedPolicy::Lazy
        } else {
            SeedPolicy::AtInit
        };
        let overflow_policy = match self.overflow {
            Overflow::Wrap => OverflowPolicy::Wrap,
            Overflow::Fail => OverflowPolicy::Fail,
        };

        Config::builder()
            .sync_strategy(sync_strategy)
            .seeds(self.seed0, self.seed1)
            .seed_policy(seed_policy)
            .overflow_policy(overflow_policy)
            .build()
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging (stderr, so stdout stays parseable)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seqlog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("SeqLog v{}", seqlog::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();

    match &args.command {
        Commands::Init => {
            Session::open(config, &args.path)?;
            println!("OK");
        }
        Commands::Step { count } => {
            let mut session = Session::open(config, &args.path)?;
            for _ in 0..*count {
                println!("{}", session.step()?);
            }
        }
        Commands::Get => {
            let session = Session::open(config, &args.path)?;
            println!("{:?}", session.get_data()?);
        }
        Commands::Reset => {
            let mut session = Session::open(config, &args.path)?;
            println!("{:?}", session.reset()?);
        }
        Commands::Verify => print_recovery(&LogRecovery::verify(&args.path)?),
        Commands::Repair => print_recovery(&LogRecovery::repair(&args.path)?),
        Commands::Run => {
            let worker = SessionWorker::spawn(config)?;
            let handle = worker.handle();
            handle.execute(Command::Init {
                path: args.path.clone(),
            })?;

            let stdin = io::stdin();
            let stdout = io::stdout();
            handle.serve(&mut stdin.lock(), &mut stdout.lock())?;
            worker.shutdown()?;
        }
    }

    Ok(())
}

fn print_recovery(result: &RecoveryResult) {
    println!("records:        {}", result.records);
    println!("valid length:   {}", result.valid_len);
    println!("trailing bytes: {}", result.trailing_bytes);
    println!("truncated:      {}", result.was_truncated);
}
