//! iosniff CLI entry point.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use iosniff::cli::{self, Args};
use iosniff::device::{self, SocketFrameSource};
use iosniff::pcap::PcapWriter;
use iosniff::pktap::ProcessFilter;
use iosniff::sniffer;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let filter_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_level.into()))
        .init();

    // Resolve the filter target and the default output file stem.
    let (target, default_stem) = match (&args.process, &args.apps) {
        (Some(process), _) => {
            if process.is_empty() {
                bail!("--process must not be empty");
            }
            (process.clone(), process.clone())
        }
        (None, Some(catalog_path)) => {
            let apps = device::load_app_catalog(catalog_path)
                .context("failed to load application catalog")?;
            let app = cli::choose_app(&apps).context("application selection failed")?;
            info!(app = %app.display_name, executable = %app.executable, "application selected");
            (app.executable.clone(), app.display_name.clone())
        }
        (None, None) => bail!("either --process or --apps is required"),
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{default_stem}.pcap")));

    let source = SocketFrameSource::connect(&args.connect)
        .with_context(|| format!("failed to connect to capture endpoint {}", args.connect))?;
    let writer = PcapWriter::create(&output)
        .with_context(|| format!("failed to create capture file {}", output.display()))?;
    let filter = ProcessFilter::new(target);

    info!(
        endpoint = %args.connect,
        output = %output.display(),
        target = filter.target(),
        "capture started, press Ctrl-C to stop"
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let pump_cancel = cancel.clone();
    let mut pump =
        tokio::task::spawn_blocking(move || sniffer::run(source, writer, &filter, &pump_cancel));

    let stats = tokio::select! {
        res = &mut pump => res.context("capture task panicked")?,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, stopping capture");
            cancel.store(true, Ordering::Relaxed);
            (&mut pump).await.context("capture task panicked")?
        }
    };
    let stats = stats.context("capture session failed")?;

    eprintln!(
        "{} packets captured to {} ({} frames seen, {} malformed skipped)",
        stats.packets_written,
        output.display(),
        stats.frames_seen,
        stats.parse_errors
    );
    Ok(())
}
