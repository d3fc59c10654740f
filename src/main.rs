use clap::Parser;
use classlog::logger::{Logger, LoggerFactory, Severity};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classlog")]
#[command(about = "Write one log entry through a configured classlog backend", long_about = None)]
struct Cli {
    /// Properties or JSON configuration; system log at `error` when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Classname the entry is attributed to
    #[arg(long = "class", default_value = "classlog")]
    classname: String,

    /// Severity as a rank (0-7) or label (emergency .. debug)
    #[arg(short, long, default_value = "error")]
    level: String,

    /// Originating line number
    #[arg(long)]
    line: Option<u32>,

    /// Originating method, shown instead of the classname
    #[arg(long)]
    method: Option<String>,

    /// Print the formatted line instead of writing it
    #[arg(long)]
    preview: bool,

    /// Message text
    message: String,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let severity: Severity = cli.level.parse()?;

    let factory = LoggerFactory::new();
    let mut logger = factory.for_class(&cli.classname, cli.config.as_deref())?;

    if cli.preview {
        println!(
            "{}",
            logger.format(&cli.message, severity, cli.line, cli.method.as_deref(), None)
        );
        return Ok(());
    }

    match logger.log(&cli.message, severity, cli.line, cli.method.as_deref())? {
        Some(timestamp) => tracing::debug!(timestamp, "entry written"),
        None => tracing::info!(
            %severity,
            threshold = %logger.threshold(),
            "entry below configured threshold, nothing written"
        ),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("classlog: {}", e);
            ExitCode::FAILURE
        }
    }
}
