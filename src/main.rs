use anyhow::{bail, Context, Result};
use clap::Parser;
use memscan::config::{load_config, validate_config, Config, ConfigLoader, DEFAULT_CONFIG_FILE};
use memscan::console::{self, ConsoleOptions};
use memscan::process::{PidResolver, Session};
use memscan::Width;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Scan, narrow and patch values in a running process's memory", long_about = None)]
struct Args {
    /// Name of the target process, resolved with pidof
    #[arg(required_unless_present = "pid", conflicts_with = "pid")]
    process: Option<String>,

    /// Attach to this PID directly
    #[arg(short, long)]
    pid: Option<u32>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting scan width in bits (8, 16, 32, 64)
    #[arg(short, long)]
    width: Option<u32>,
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::new(path)
            .load()
            .with_context(|| format!("loading {}", path.display()))?,
        None => load_config().with_context(|| format!("loading {DEFAULT_CONFIG_FILE}"))?,
    };

    if let Some(bits) = args.width {
        if Width::from_bits(bits).is_none() {
            bail!("unsupported width {bits}, expected 8, 16, 32 or 64");
        }
        config.scanner.default_width = bits;
    }

    validate_config(&config).context("invalid configuration")?;
    Ok(config)
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;
    init_logging(&config.logging.level);

    info!("Starting memscan v{}", env!("CARGO_PKG_VERSION"));

    let (pid, name) = match (args.pid, &args.process) {
        (Some(pid), _) => (pid, pid.to_string()),
        (None, Some(name)) => {
            let pid = PidResolver::new(config.process.pidof_program.as_str())
                .resolve(name)
                .context("resolving process")?;
            (pid, name.clone())
        }
        (None, None) => bail!("a process name or --pid is required"),
    };

    let mut session = Session::attach(pid, name, &config)
        .with_context(|| format!("attaching to process {pid}"))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    console::run(
        &mut session,
        stdin.lock(),
        &mut stdout,
        ConsoleOptions::from(&config.scanner),
    )?;

    info!("Shutting down memscan");
    Ok(())
}
