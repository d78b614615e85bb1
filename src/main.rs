//! Relay job — process entry point.
//!
//! Thin bootstrap: parse flags, resolve the PWM pin from configuration,
//! claim the output, bring the job to ready, then block until the process
//! is told to disconnect (SIGINT/SIGTERM). On disconnect the relay is
//! forced off and the PWM output is released before exit.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use biorelay::adapters::file_config::FileConfig;
use biorelay::adapters::log_sink::LogEventSink;
use biorelay::adapters::pwm::SoftPwmOutput;
use biorelay::app::ports::ConfigPort;
use biorelay::app::service::RelayService;
use biorelay::config::JobIdentity;

/// PWM-driven relay power switch job.
#[derive(Parser)]
#[command(name = biorelay::JOB_NAME, version)]
struct Cli {
    /// Whether the relay starts on (overrides the configured default).
    #[arg(short = 's', long)]
    start_on: Option<bool>,

    /// Path to the job configuration file.
    #[arg(long, default_value = "/etc/biorelay/config.json")]
    config: std::path::PathBuf,

    /// Bioreactor unit label.
    #[arg(long, env = "BIOREACTOR_UNIT", default_value = "unit-00")]
    unit: String,

    /// Experiment label.
    #[arg(long, env = "BIOREACTOR_EXPERIMENT", default_value = "default")]
    experiment: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = FileConfig::new(&cli.config)
        .load()
        .context("loading configuration")?;
    if let Some(start_on) = cli.start_on {
        config.start_on = start_on;
    }

    let pin = config.relay_pin().context("resolving PWM channel")?;
    info!(
        "relay on PWM channel {} (GPIO {}), start_on={}",
        config.pwm_channel, pin, config.start_on
    );

    let pwm = SoftPwmOutput::claim(pin, config.pwm_hz).context("claiming PWM output")?;

    let identity = JobIdentity::new(cli.unit, cli.experiment);
    let mut sink = LogEventSink::new();
    let mut service = RelayService::new(config, identity, pwm);

    service.initialize(&mut sink).context("starting relay job")?;

    block_until_disconnected()?;

    service
        .on_disconnected(&mut sink)
        .context("disconnecting relay job")?;
    info!("relay job disconnected");
    Ok(())
}

/// Park the process until SIGINT or SIGTERM arrives.
fn block_until_disconnected() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()
        .context("building signal runtime")?;

    runtime.block_on(async {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut term =
                signal(SignalKind::terminate()).context("installing SIGTERM handler")?;
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        #[cfg(not(unix))]
        tokio::signal::ctrl_c()
            .await
            .context("installing ctrl-c handler")?;

        Ok(())
    })
}
