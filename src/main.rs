use anyhow::Result;
use clap::{Arg, Command};
use std::time::Duration;

use wakeguard::core::daemon::{Daemon, DaemonConfig};
use wakeguard::core::lease::LogindLeaseService;
use wakeguard::core::netdev::ProcNetDev;
use wakeguard::core::notify::SystemdNotifier;

fn main() -> Result<()> {
    wakeguard::init_logging();

    let matches = Command::new("wakeguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inhibits sleep and shutdown while network traffic stays busy")
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .value_name("KBPS")
                .help("Traffic level in KB/s above which sleep is inhibited")
                .value_parser(clap::value_parser!(u64))
                .default_value("50"),
        )
        .arg(
            Arg::new("wait")
                .long("wait")
                .value_name("SECONDS")
                .help("Quiet time required before the inhibit is dropped")
                .value_parser(clap::value_parser!(u64))
                .default_value("30"),
        )
        .get_matches();

    let config = DaemonConfig {
        threshold_kib_per_sec: matches.get_one::<u64>("threshold").copied().unwrap_or(50),
        wait_ticks: matches.get_one::<u64>("wait").copied().unwrap_or(30),
        tick_interval: Duration::from_secs(1),
    };

    log::debug!(
        "threshold: {} KB/s, wait: {} s",
        config.threshold_kib_per_sec,
        config.wait_ticks
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(config))
}

async fn run(config: DaemonConfig) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    let mut int = signal(SignalKind::interrupt())?;
    // Resolves when SIGINT or SIGTERM arrives.
    let shutdown = async move {
        tokio::select! {
            _ = term.recv() => {}
            _ = int.recv() => {}
        }
    };

    let leases = LogindLeaseService::connect().await?;
    let daemon = Daemon::new(config, ProcNetDev::new(), leases, SystemdNotifier);

    daemon.run(shutdown).await?;
    Ok(())
}
