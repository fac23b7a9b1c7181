use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wavemaker_stats::config::{AppConfig, Credentials};
use wavemaker_stats::driver::{Driver, RunOptions, DEFAULT_DELAY_SECS, DEFAULT_MAX_RETRIES};
use wavemaker_stats::services::RouterClient;
use wavemaker_stats::sink::open_sink;

#[derive(Parser, Debug)]
#[command(
    name = "wavemaker-stats",
    version,
    about = "Report the signal stats from an Inseego FX2000 Wavemaker"
)]
struct Cli {
    /// Loop over status checks, otherwise one-shot
    #[arg(short = 'l', long = "loop")]
    loop_forever: bool,
    /// Delay between queries when looping, in seconds
    #[arg(short, long, default_value_t = DEFAULT_DELAY_SECS)]
    delay: u64,
    /// Output status to this file instead of stdout, appending if it exists
    #[arg(short = 'f', long = "log")]
    log: Option<PathBuf>,
    /// Number of consecutive GET or POST failures tolerated
    #[arg(short, long, default_value_t = DEFAULT_MAX_RETRIES)]
    retries: u32,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            loop_forever: self.loop_forever,
            delay: Duration::from_secs(self.delay),
            max_retries: self.retries,
        }
    }
}

fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the data rows, so logs always go to stderr.
    match config.log.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // AppConfig::new loads .env, so credentials are read after it.
    let config = AppConfig::new().map_err(|e| {
        anyhow::anyhow!(
            "Failed to load configuration: {e}. Please check your environment variables and configuration."
        )
    })?;
    let credentials = Credentials::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    setup_logging(&config);

    info!("Starting wavemaker-stats v{}", env!("CARGO_PKG_VERSION"));
    info!(
        router = %config.router.base_url,
        timeout_secs = config.http.timeout_secs,
        loop_forever = cli.loop_forever,
        "Config loaded"
    );

    let fields = config.poll.field_names();
    let mut sink = open_sink(cli.log.as_deref()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to open output {}: {e}",
            cli.log
                .as_ref()
                .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
        )
    })?;
    let mut client = RouterClient::from_config(&config, credentials);

    let summary = Driver::new(cli.run_options())
        .run(&mut client, sink.as_mut(), &fields)
        .await?;

    info!(
        cycles = summary.cycles,
        records = summary.records,
        failures = summary.failures,
        "Finished"
    );
    Ok(())
}
